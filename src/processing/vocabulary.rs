//! Recognized technology vocabulary
//!
//! The vocabulary is a versioned TOML artifact loaded once at startup and
//! read-only afterwards. Lookups are case-insensitive; the lower-cased term set
//! is computed at load time and cached alongside the original spellings.

use crate::error::{Result, ResumeScorerError};
use log::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

const BUILTIN_VOCABULARY: &str = include_str!("../../vocabulary/default.toml");

const DEFAULT_CATEGORY: &str = "general";

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    version: String,
    terms: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    version: String,
    categories: BTreeMap<String, Vec<String>>,
    lowered: HashSet<String>,
}

impl Vocabulary {
    /// The vocabulary shipped with the binary, parsed on first use.
    pub fn builtin() -> &'static Vocabulary {
        static BUILTIN: OnceLock<Vocabulary> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            Self::from_toml_str(BUILTIN_VOCABULARY).expect("Invalid built-in vocabulary")
        })
    }

    /// Load a vocabulary artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeScorerError::Vocabulary(format!(
                "Failed to read vocabulary '{}': {}",
                path.display(),
                e
            ))
        })?;

        let vocabulary = Self::from_toml_str(&content)?;
        info!(
            "Loaded vocabulary v{} ({} terms) from {}",
            vocabulary.version,
            vocabulary.len(),
            path.display()
        );
        Ok(vocabulary)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: VocabularyFile = toml::from_str(content).map_err(|e| {
            ResumeScorerError::Vocabulary(format!("Failed to parse vocabulary: {}", e))
        })?;

        Self::from_categories(file.version, file.terms)
    }

    /// Build an uncategorized vocabulary from a flat term list.
    pub fn from_terms<I, S>(version: impl Into<String>, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories = BTreeMap::new();
        categories.insert(
            DEFAULT_CATEGORY.to_string(),
            terms.into_iter().map(Into::into).collect(),
        );
        Self::from_categories(version.into(), categories)
    }

    fn from_categories(version: String, categories: BTreeMap<String, Vec<String>>) -> Result<Self> {
        if version.trim().is_empty() {
            return Err(ResumeScorerError::Vocabulary(
                "Vocabulary version must not be empty".to_string(),
            ));
        }

        let mut lowered = HashSet::new();
        let mut cleaned = BTreeMap::new();

        for (category, terms) in categories {
            let mut kept = Vec::with_capacity(terms.len());
            for term in terms {
                let term = term.trim().to_string();
                if term.is_empty() {
                    return Err(ResumeScorerError::Vocabulary(format!(
                        "Blank term in category '{}'",
                        category
                    )));
                }
                // First spelling wins when a term repeats in another case.
                if lowered.insert(term.to_lowercase()) {
                    kept.push(term);
                } else {
                    debug!("Skipping duplicate vocabulary term '{}'", term);
                }
            }
            if !kept.is_empty() {
                cleaned.insert(category, kept);
            }
        }

        if lowered.is_empty() {
            return Err(ResumeScorerError::Vocabulary(
                "Vocabulary contains no terms".to_string(),
            ));
        }

        Ok(Self {
            version,
            categories: cleaned,
            lowered,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.lowered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, term: &str) -> bool {
        self.lowered.contains(&term.to_lowercase())
    }

    /// Lower-cased terms, the set the scorer intersects with.
    pub fn lowered(&self) -> &HashSet<String> {
        &self.lowered
    }

    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// Terms in their curated spelling.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.categories.values().flatten().map(String::as_str)
    }

    pub fn category_of(&self, term: &str) -> Option<&str> {
        let needle = term.to_lowercase();
        self.categories
            .iter()
            .find(|(_, terms)| terms.iter().any(|t| t.to_lowercase() == needle))
            .map(|(category, _)| category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_vocabulary() {
        let vocabulary = Vocabulary::builtin();
        assert_eq!(vocabulary.len(), 100);
        assert!(!vocabulary.version().is_empty());
        assert!(vocabulary.contains("python"));
        assert!(vocabulary.contains("PYTHON"));
        assert!(vocabulary.contains("node.js"));
        assert!(vocabulary.contains("ci/cd"));
        assert!(!vocabulary.contains("cobol"));
        assert_eq!(vocabulary.category_of("react"), Some("frontend"));
        assert_eq!(vocabulary.category_of("Terraform"), Some("devops_cloud"));
    }

    #[test]
    fn test_builtin_is_shared() {
        let first = Vocabulary::builtin() as *const Vocabulary;
        let second = Vocabulary::builtin() as *const Vocabulary;
        assert_eq!(first, second);
    }

    #[test]
    fn test_lowered_set_is_lowercase() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.lowered().iter().all(|t| *t == t.to_lowercase()));
        assert_eq!(vocabulary.terms().count(), vocabulary.len());
    }

    #[test]
    fn test_from_toml_str() {
        let vocabulary = Vocabulary::from_toml_str(
            r#"
            version = "test-1"

            [terms]
            languages = ["Rust", "Python"]
            infra = ["Docker"]
            "#,
        )
        .unwrap();

        assert_eq!(vocabulary.version(), "test-1");
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.categories().len(), 2);
        assert_eq!(vocabulary.category_of("docker"), Some("infra"));
    }

    #[test]
    fn test_duplicates_collapse_case_insensitively() {
        let vocabulary = Vocabulary::from_terms("1", ["React", "react", "REACT", "Redis"]).unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert_eq!(vocabulary.terms().collect::<Vec<_>>(), vec!["React", "Redis"]);
    }

    #[test]
    fn test_rejects_invalid_vocabularies() {
        assert!(matches!(
            Vocabulary::from_terms("1", Vec::<String>::new()),
            Err(ResumeScorerError::Vocabulary(_))
        ));
        assert!(matches!(
            Vocabulary::from_terms("1", ["Rust", "  "]),
            Err(ResumeScorerError::Vocabulary(_))
        ));
        assert!(matches!(
            Vocabulary::from_terms("", ["Rust"]),
            Err(ResumeScorerError::Vocabulary(_))
        ));
        assert!(matches!(
            Vocabulary::from_toml_str("version = 3"),
            Err(ResumeScorerError::Vocabulary(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version = \"file-2\"\n[terms]\ncloud = [\"AWS\", \"GCP\"]").unwrap();

        let vocabulary = Vocabulary::load(file.path()).unwrap();
        assert_eq!(vocabulary.version(), "file-2");
        assert!(vocabulary.contains("aws"));

        let missing = Vocabulary::load(Path::new("/nonexistent/vocabulary.toml"));
        assert!(matches!(missing, Err(ResumeScorerError::Vocabulary(_))));
    }
}

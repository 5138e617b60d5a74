//! Configuration management for the resume scorer

use crate::error::{Result, ResumeScorerError};
use crate::processing::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub vocabulary: VocabularyConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the blob store
    pub root_dir: PathBuf,
    /// Write results to `results/` when the owner's folder cannot be written
    pub fallback_results: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Vocabulary TOML file; the built-in vocabulary is used when unset
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let root_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-scorer")
            .join("store");

        Self {
            storage: StorageConfig {
                root_dir,
                fallback_results: true,
            },
            vocabulary: VocabularyConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            batch: BatchConfig { max_concurrency: 4 },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeScorerError::Configuration(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeScorerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch.max_concurrency == 0 {
            return Err(ResumeScorerError::Configuration(
                "batch.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.storage.root_dir.as_os_str().is_empty() {
            return Err(ResumeScorerError::Configuration(
                "storage.root_dir must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-scorer")
            .join("config.toml")
    }

    /// Resolve the vocabulary for this process: an explicit override, then the
    /// configured file, then the built-in list.
    pub fn load_vocabulary(&self, override_path: Option<&Path>) -> Result<Arc<Vocabulary>> {
        match override_path.or(self.vocabulary.path.as_deref()) {
            Some(path) => Ok(Arc::new(Vocabulary::load(path)?)),
            None => Ok(Arc::new(Vocabulary::builtin().clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(config.storage.fallback_results);
        assert_eq!(config.output.format, OutputFormat::Console);
        assert!(config.storage.root_dir.ends_with("store"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.batch.max_concurrency = 8;
        config.output.format = OutputFormat::Json;
        config.vocabulary.path = Some(PathBuf::from("/etc/vocab.toml"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.batch.max_concurrency, 8);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.vocabulary.path, Some(PathBuf::from("/etc/vocab.toml")));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.batch.max_concurrency = 0;
        config.save_to(&path).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ResumeScorerError::Configuration(_))
        ));

        std::fs::write(&path, "storage = 12").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ResumeScorerError::Configuration(_))
        ));
    }

    #[test]
    fn test_vocabulary_resolution() {
        let config = Config::default();
        let builtin = config.load_vocabulary(None).unwrap();
        assert_eq!(builtin.len(), Vocabulary::builtin().len());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.toml");
        std::fs::write(&path, "version = \"x\"\n[terms]\nlangs = [\"Rust\"]\n").unwrap();

        let custom = config.load_vocabulary(Some(&path)).unwrap();
        assert_eq!(custom.len(), 1);
        assert_eq!(custom.version(), "x");
    }
}

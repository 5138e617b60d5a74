//! Object key layout
//!
//! ```text
//! files/{owner}/uploads/{filename}
//! files/{owner}/job_descriptions/{filename}.txt
//! files/{owner}/results/{filename}.json
//! results/{filename}.json                         (fallback results)
//! ```

use crate::error::{Result, ResumeScorerError};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const FILES_ROOT: &str = "files";
const UPLOADS_DIR: &str = "uploads";
const JOB_DESCRIPTIONS_DIR: &str = "job_descriptions";
const RESULTS_DIR: &str = "results";
const FALLBACK_RESULTS_ROOT: &str = "results";

pub fn uploads_prefix(owner: &str) -> String {
    format!("{}/{}/{}/", FILES_ROOT, owner, UPLOADS_DIR)
}

pub fn upload_key(owner: &str, filename: &str) -> String {
    format!("{}{}", uploads_prefix(owner), filename)
}

pub fn job_description_key(owner: &str, filename: &str) -> String {
    format!("{}/{}/{}/{}.txt", FILES_ROOT, owner, JOB_DESCRIPTIONS_DIR, filename)
}

pub fn result_key(owner: &str, filename: &str) -> String {
    format!("{}/{}/{}/{}.json", FILES_ROOT, owner, RESULTS_DIR, filename)
}

pub fn fallback_result_key(filename: &str) -> String {
    format!("{}/{}.json", FALLBACK_RESULTS_ROOT, filename)
}

/// Owners name a storage folder, so they must be a single non-empty segment.
pub fn validate_owner(owner: &str) -> Result<()> {
    let trimmed = owner.trim();
    if trimmed.is_empty() {
        return Err(ResumeScorerError::InvalidInput("Owner is required".to_string()));
    }
    if trimmed != owner || owner.contains(['/', '\\']) || owner == "." || owner == ".." {
        return Err(ResumeScorerError::InvalidInput(format!("Invalid owner: {:?}", owner)));
    }
    Ok(())
}

/// Stored file names are a single key segment.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.is_empty()
        || filename.contains(['/', '\\'])
        || filename == "."
        || filename == ".."
    {
        return Err(ResumeScorerError::InvalidInput(format!(
            "Invalid file name: {:?}",
            filename
        )));
    }
    Ok(())
}

/// Reduce an uploaded file name to a safe single path segment.
///
/// Path separators and whitespace runs become `_`, non-ASCII and other unsafe
/// characters are dropped, and leading/trailing dots and underscores are
/// trimmed.
pub fn secure_filename(name: &str) -> Result<String> {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars =
        UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("Invalid filename regex"));

    let spaced = name.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = unsafe_chars.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    if trimmed.is_empty() {
        return Err(ResumeScorerError::InvalidInput(format!(
            "File name {:?} has no usable characters",
            name
        )));
    }
    Ok(trimmed.to_string())
}

/// An uploaded resume, addressed by owner and file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadKey {
    pub owner: String,
    pub filename: String,
}

impl UploadKey {
    pub fn new(owner: impl Into<String>, filename: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let filename = filename.into();
        validate_owner(&owner)?;
        validate_filename(&filename)?;
        Ok(Self { owner, filename })
    }

    /// Recover owner and file name from a `files/{owner}/uploads/{filename}` key.
    pub fn parse(key: &str) -> Result<Self> {
        let parts: Vec<&str> = key.split('/').collect();
        match parts.as_slice() {
            [root, owner, dir, filename] if *root == FILES_ROOT && *dir == UPLOADS_DIR => {
                Self::new(*owner, *filename)
            }
            _ => Err(ResumeScorerError::InvalidInput(format!(
                "Not an upload key: {}",
                key
            ))),
        }
    }

    pub fn key(&self) -> String {
        upload_key(&self.owner, &self.filename)
    }

    pub fn job_description_key(&self) -> String {
        job_description_key(&self.owner, &self.filename)
    }

    pub fn result_key(&self) -> String {
        result_key(&self.owner, &self.filename)
    }
}

impl fmt::Display for UploadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(upload_key("a@b.com", "cv.pdf"), "files/a@b.com/uploads/cv.pdf");
        assert_eq!(
            job_description_key("a@b.com", "cv.pdf"),
            "files/a@b.com/job_descriptions/cv.pdf.txt"
        );
        assert_eq!(result_key("a@b.com", "cv.pdf"), "files/a@b.com/results/cv.pdf.json");
        assert_eq!(fallback_result_key("cv.pdf"), "results/cv.pdf.json");
        assert_eq!(uploads_prefix("a@b.com"), "files/a@b.com/uploads/");
    }

    #[test]
    fn test_upload_key_parse() {
        let key = UploadKey::parse("files/a@b.com/uploads/cv.pdf").unwrap();
        assert_eq!(key.owner, "a@b.com");
        assert_eq!(key.filename, "cv.pdf");
        assert_eq!(key.to_string(), "files/a@b.com/uploads/cv.pdf");
        assert_eq!(key.result_key(), "files/a@b.com/results/cv.pdf.json");
    }

    #[test]
    fn test_upload_key_parse_rejects_other_shapes() {
        for key in [
            "files/a@b.com/results/cv.pdf.json",
            "files/a@b.com/uploads/",
            "files//uploads/cv.pdf",
            "uploads/cv.pdf",
            "files/a/uploads/nested/cv.pdf",
            "",
        ] {
            assert!(UploadKey::parse(key).is_err(), "accepted {:?}", key);
        }
    }

    #[test]
    fn test_validate_owner() {
        assert!(validate_owner("someone@example.com").is_ok());
        assert!(validate_owner("").is_err());
        assert!(validate_owner("  ").is_err());
        assert!(validate_owner("a/b").is_err());
        assert!(validate_owner("..").is_err());
        assert!(validate_owner(" padded").is_err());
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("cv.pdf").is_ok());
        assert!(validate_filename("..cv.pdf").is_ok());
        assert!(validate_filename("").is_err());
        assert!(validate_filename("..").is_err());
        assert!(validate_filename("../x").is_err());
        assert!(validate_filename("a\\b.pdf").is_err());
        assert!(UploadKey::new("a@b.com", "../x").is_err());
    }

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My Resume (final).pdf").unwrap(), "My_Resume_final.pdf");
        assert_eq!(secure_filename("../../etc/passwd").unwrap(), "etc_passwd");
        assert_eq!(secure_filename("C:\\docs\\cv.docx").unwrap(), "C_docs_cv.docx");
        assert_eq!(secure_filename("  .hidden_ ").unwrap(), "hidden");
        assert_eq!(secure_filename("résumé.pdf").unwrap(), "rsum.pdf");
        assert!(secure_filename("").is_err());
        assert!(secure_filename("../..").is_err());
        assert!(secure_filename("日本").is_err());
    }
}

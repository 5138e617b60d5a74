//! Document and job description sources backed by the blob store

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_document_text;
use crate::storage::layout::UploadKey;
use crate::storage::BlobStore;
use log::{error, info};
use std::sync::Arc;

/// Turns a stored document into plain text.
///
/// Every failure (missing object, unsupported or corrupt document, backend
/// outage) is reported as `Extraction`.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, key: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Supplies the job description uploaded alongside a resume.
///
/// A missing job description is reported as `NotFound`.
pub trait JobDescriptionSource: Send + Sync {
    fn load_job_description(
        &self,
        upload: &UploadKey,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct StoredDocumentExtractor<S> {
    store: Arc<S>,
}

impl<S> StoredDocumentExtractor<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn as_extraction_error(key: &str, err: ResumeScorerError) -> ResumeScorerError {
    match err {
        ResumeScorerError::Extraction(_) => err,
        other => ResumeScorerError::Extraction(format!("{}: {}", key, other)),
    }
}

impl<S: BlobStore> DocumentTextExtractor for StoredDocumentExtractor<S> {
    async fn extract_text(&self, key: &str) -> Result<String> {
        info!("Extracting text from {}", key);

        let file_type = FileType::from_name(key);
        let bytes = self
            .store
            .get(key)
            .await
            .map_err(|e| as_extraction_error(key, e))?;

        let source = key.to_string();
        let text = tokio::task::spawn_blocking(move || extract_document_text(file_type, &bytes, &source))
            .await
            .map_err(|e| ResumeScorerError::Extraction(format!("{}: extraction task failed: {}", key, e)))?
            .map_err(|e| as_extraction_error(key, e));

        match &text {
            Ok(content) => info!("Extracted {} characters from {}", content.len(), key),
            Err(e) => error!("Failed to extract text from {}: {}", key, e),
        }
        text
    }
}

pub struct StoredJobDescriptions<S> {
    store: Arc<S>,
}

impl<S> StoredJobDescriptions<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: BlobStore> JobDescriptionSource for StoredJobDescriptions<S> {
    async fn load_job_description(&self, upload: &UploadKey) -> Result<String> {
        let key = upload.job_description_key();
        info!("Loading job description from {}", key);

        let bytes = self.store.get(&key).await.map_err(|e| match e {
            ResumeScorerError::NotFound(_) => {
                ResumeScorerError::NotFound(format!("Job description for {}", upload))
            }
            other => other,
        })?;

        String::from_utf8(bytes).map_err(|e| {
            ResumeScorerError::Extraction(format!("Job description {} is not valid UTF-8: {}", key, e))
        })
    }
}

//! Per-owner resume library: uploads, listing, stored results and deletion

use crate::error::{Result, ResumeScorerError};
use crate::input::{StoredDocumentExtractor, StoredJobDescriptions};
use crate::output::sink::{BlobResultSink, StoredResult};
use crate::pipeline::scoring::ScoringPipeline;
use crate::processing::ats_scorer::{AtsScorer, ScoreRecord};
use crate::storage::layout::{
    job_description_key, result_key, secure_filename, upload_key, uploads_prefix, validate_filename,
    validate_owner,
};
use crate::storage::BlobStore;
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Scoring pipeline reading from and writing to one blob store.
pub type StoredScoringPipeline<S> = ScoringPipeline<
    StoredDocumentExtractor<S>,
    StoredJobDescriptions<S>,
    BlobResultSink<S>,
    BlobResultSink<S>,
>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadReceipt {
    pub filename: String,
    pub resume_key: String,
    pub job_description_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub requested: usize,
    pub deleted: usize,
    pub failed: Vec<String>,
}

pub struct ResumeLibrary<S> {
    store: Arc<S>,
}

impl<S> Clone for ResumeLibrary<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: BlobStore + 'static> ResumeLibrary<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Build a scoring pipeline over this library's store. With `fallback`
    /// enabled, results that cannot be written under the owner's folder go to
    /// the flat `results/` prefix.
    pub fn scoring_pipeline(&self, scorer: AtsScorer, fallback: bool) -> StoredScoringPipeline<S> {
        ScoringPipeline::from_parts(
            StoredDocumentExtractor::new(self.store.clone()),
            StoredJobDescriptions::new(self.store.clone()),
            BlobResultSink::per_owner(self.store.clone()),
            fallback.then(|| BlobResultSink::flat(self.store.clone())),
            scorer,
        )
    }

    /// Store a resume and the job description it should be scored against.
    pub async fn upload(
        &self,
        owner: &str,
        filename: &str,
        resume: &[u8],
        job_description: &str,
    ) -> Result<UploadReceipt> {
        validate_owner(owner)?;
        if resume.is_empty() {
            return Err(ResumeScorerError::InvalidInput("Resume file is empty".to_string()));
        }
        if job_description.trim().is_empty() {
            return Err(ResumeScorerError::InvalidInput(
                "Job description is required".to_string(),
            ));
        }

        let filename = secure_filename(filename)?;
        let resume_key = upload_key(owner, &filename);
        let job_description_key = job_description_key(owner, &filename);

        self.store.put(&resume_key, resume).await?;
        self.store
            .put(&job_description_key, job_description.as_bytes())
            .await?;

        info!("Uploaded {} and {}", resume_key, job_description_key);
        Ok(UploadReceipt {
            filename,
            resume_key,
            job_description_key,
        })
    }

    pub async fn list_resumes(&self, owner: &str) -> Result<Vec<String>> {
        validate_owner(owner)?;
        let objects = self.store.list(&uploads_prefix(owner)).await?;
        Ok(objects.iter().map(|o| o.name().to_string()).collect())
    }

    pub async fn fetch_result(&self, owner: &str, filename: &str) -> Result<ScoreRecord> {
        validate_owner(owner)?;
        validate_filename(filename)?;

        let bytes = self
            .store
            .get(&result_key(owner, filename))
            .await
            .map_err(|e| match e {
                ResumeScorerError::NotFound(_) => {
                    ResumeScorerError::NotFound(format!("No ATS result found for {}", filename))
                }
                other => other,
            })?;

        Ok(StoredResult::from_slice(&bytes)?.into_record())
    }

    /// Delete each resume with its job description and result. Files are
    /// removed concurrently; one failing file, including one with an invalid
    /// name, does not stop the others.
    pub async fn delete_resumes(&self, owner: &str, filenames: &[String]) -> Result<DeleteSummary> {
        validate_owner(owner)?;
        if filenames.is_empty() {
            return Err(ResumeScorerError::InvalidInput(
                "At least one filename is required".to_string(),
            ));
        }

        let mut tasks = JoinSet::new();
        for filename in filenames {
            let store = Arc::clone(&self.store);
            let owner = owner.to_string();
            let filename = filename.clone();
            tasks.spawn(async move {
                if let Err(e) = validate_filename(&filename) {
                    return (filename, Err(e));
                }
                let keys = [
                    upload_key(&owner, &filename),
                    job_description_key(&owner, &filename),
                    result_key(&owner, &filename),
                ];
                let mut outcome = Ok(());
                for key in &keys {
                    if let Err(e) = store.delete(key).await {
                        outcome = Err(e);
                        break;
                    }
                }
                (filename, outcome)
            });
        }

        let mut summary = DeleteSummary {
            requested: filenames.len(),
            ..DeleteSummary::default()
        };

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((filename, Ok(()))) => {
                    info!("✅ Deleted {} for {}", filename, owner);
                    summary.deleted += 1;
                }
                Ok((filename, Err(e))) => {
                    error!("❌ Failed to delete {}: {}", filename, e);
                    summary.failed.push(filename);
                }
                Err(e) => error!("❌ Delete task failed: {}", e),
            }
        }

        summary.failed.sort();
        Ok(summary)
    }
}

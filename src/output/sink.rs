//! Result sinks for computed score records

use crate::error::{Result, ResumeScorerError};
use crate::processing::ats_scorer::{ScoreRecord, MAX_RATING, MIN_RATING};
use crate::storage::layout::{fallback_result_key, result_key, validate_owner};
use crate::storage::BlobStore;
use log::info;
use serde::Deserialize;
use std::sync::Arc;

/// Accepts a computed score record for persistence.
pub trait ResultSink: Send + Sync {
    fn store(
        &self,
        owner: &str,
        record: &ScoreRecord,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where a [`BlobResultSink`] places records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultLayout {
    /// `files/{owner}/results/{filename}.json`
    PerOwner,
    /// `results/{filename}.json`
    Flat,
}

/// Reject records that could not have come out of the scorer.
pub fn validate_record(record: &ScoreRecord) -> Result<()> {
    if record.filename.trim().is_empty() {
        return Err(ResumeScorerError::InvalidInput(
            "Score record is missing a filename".to_string(),
        ));
    }
    if record.ats_score > 100 {
        return Err(ResumeScorerError::InvalidInput(format!(
            "ATS score {} is out of range",
            record.ats_score
        )));
    }
    if !(MIN_RATING..=MAX_RATING).contains(&record.rating) {
        return Err(ResumeScorerError::InvalidInput(format!(
            "Rating {} is out of range",
            record.rating
        )));
    }
    Ok(())
}

pub struct BlobResultSink<S> {
    store: Arc<S>,
    layout: ResultLayout,
}

impl<S> BlobResultSink<S> {
    pub fn new(store: Arc<S>, layout: ResultLayout) -> Self {
        Self { store, layout }
    }

    pub fn per_owner(store: Arc<S>) -> Self {
        Self::new(store, ResultLayout::PerOwner)
    }

    pub fn flat(store: Arc<S>) -> Self {
        Self::new(store, ResultLayout::Flat)
    }

    pub fn layout(&self) -> ResultLayout {
        self.layout
    }

    pub fn key_for(&self, owner: &str, filename: &str) -> String {
        match self.layout {
            ResultLayout::PerOwner => result_key(owner, filename),
            ResultLayout::Flat => fallback_result_key(filename),
        }
    }
}

impl<S: BlobStore> ResultSink for BlobResultSink<S> {
    async fn store(&self, owner: &str, record: &ScoreRecord) -> Result<()> {
        validate_record(record)?;
        if self.layout == ResultLayout::PerOwner {
            validate_owner(owner)?;
        }

        let key = self.key_for(owner, &record.filename);
        let body = serde_json::to_vec_pretty(record)?;
        self.store.put(&key, &body).await?;

        info!("✅ Stored ATS result for {} at {}", record.filename, key);
        Ok(())
    }
}

/// A stored result as written by any version of the scorer. Older records
/// may lack `rating` and `suggested_keywords`.
#[derive(Debug, Deserialize)]
pub struct StoredResult {
    pub filename: String,
    pub ats_score: u8,
    #[serde(default)]
    pub matched_keywords: Vec<String>,
    #[serde(default)]
    pub suggested_keywords: Vec<String>,
    pub rating: Option<u8>,
}

impl StoredResult {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn into_record(self) -> ScoreRecord {
        let rating = self
            .rating
            .unwrap_or_else(|| crate::processing::ats_scorer::star_rating(self.ats_score));
        ScoreRecord {
            filename: self.filename,
            ats_score: self.ats_score,
            matched_keywords: self.matched_keywords,
            suggested_keywords: self.suggested_keywords,
            rating,
        }
    }
}

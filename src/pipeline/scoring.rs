//! Upload-triggered scoring
//!
//! For an uploaded resume: extract its text, load the job description stored
//! with it, score, and hand the record to the result sink. If the sink fails
//! and a fallback sink is configured, the record goes there instead. Any
//! extraction or job description failure aborts the attempt.

use crate::error::Result;
use crate::input::document_source::{DocumentTextExtractor, JobDescriptionSource};
use crate::output::sink::ResultSink;
use crate::processing::ats_scorer::{AtsScorer, ScoreRecord};
use crate::storage::layout::UploadKey;
use log::{error, info, warn};
use serde::Serialize;

/// Which sink ended up holding the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoringOutcome {
    pub owner: String,
    pub record: ScoreRecord,
    pub delivery: Delivery,
}

pub struct ScoringPipeline<E, J, K, F = K> {
    extractor: E,
    job_descriptions: J,
    sink: K,
    fallback: Option<F>,
    scorer: AtsScorer,
}

impl<E, J, K> ScoringPipeline<E, J, K, K> {
    pub fn new(extractor: E, job_descriptions: J, sink: K, scorer: AtsScorer) -> Self {
        Self {
            extractor,
            job_descriptions,
            sink,
            fallback: None,
            scorer,
        }
    }
}

impl<E, J, K, F> ScoringPipeline<E, J, K, F> {
    pub fn from_parts(
        extractor: E,
        job_descriptions: J,
        sink: K,
        fallback: Option<F>,
        scorer: AtsScorer,
    ) -> Self {
        Self {
            extractor,
            job_descriptions,
            sink,
            fallback,
            scorer,
        }
    }

    pub fn with_fallback<G>(self, fallback: G) -> ScoringPipeline<E, J, K, G> {
        ScoringPipeline {
            extractor: self.extractor,
            job_descriptions: self.job_descriptions,
            sink: self.sink,
            fallback: Some(fallback),
            scorer: self.scorer,
        }
    }

    pub fn scorer(&self) -> &AtsScorer {
        &self.scorer
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl<E, J, K, F> ScoringPipeline<E, J, K, F>
where
    E: DocumentTextExtractor,
    J: JobDescriptionSource,
    K: ResultSink,
    F: ResultSink,
{
    /// Process a raw `files/{owner}/uploads/{filename}` key.
    pub async fn process_key(&self, key: &str) -> Result<ScoringOutcome> {
        let upload = UploadKey::parse(key)?;
        self.process(&upload).await
    }

    pub async fn process(&self, upload: &UploadKey) -> Result<ScoringOutcome> {
        info!("📥 Processing {} (filename: {})", upload, upload.filename);

        let resume_text = self.extractor.extract_text(&upload.key()).await?;
        let job_text = self.job_descriptions.load_job_description(upload).await?;

        let record = self
            .scorer
            .score_document(&upload.filename, &resume_text, &job_text);
        info!(
            "Scored {}: {}% ({} stars, {} matched, {} suggested)",
            record.filename,
            record.ats_score,
            record.rating,
            record.matched_keywords.len(),
            record.suggested_keywords.len()
        );

        let delivery = self.deliver(&upload.owner, &record).await?;
        Ok(ScoringOutcome {
            owner: upload.owner.clone(),
            record,
            delivery,
        })
    }

    async fn deliver(&self, owner: &str, record: &ScoreRecord) -> Result<Delivery> {
        let primary_err = match self.sink.store(owner, record).await {
            Ok(()) => return Ok(Delivery::Primary),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            error!("❌ Result sink failed for {}: {}", record.filename, primary_err);
            return Err(primary_err);
        };

        warn!(
            "❌ Result sink failed for {}: {}. Saving to fallback sink",
            record.filename, primary_err
        );
        fallback.store(owner, record).await?;
        Ok(Delivery::Fallback)
    }
}

//! Concurrent scoring of local resume files against one job description

use crate::error::ResumeScorerError;
use crate::input::InputManager;
use crate::processing::ats_scorer::{AtsScorer, ScoreRecord};
use indicatif::ProgressBar;
use log::warn;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: ResumeScorerError,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Scored resumes, best first; ties ordered by file name.
    pub records: Vec<ScoreRecord>,
    /// Resumes that could not be read, ordered by path.
    pub failed: Vec<BatchFailure>,
}

/// File name of `path`, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Score every resume with at most `max_concurrency` files in flight.
/// A resume that cannot be read is recorded as a failure and the rest still
/// get scored.
pub async fn score_files(
    scorer: &AtsScorer,
    job_text: Arc<String>,
    resumes: Vec<PathBuf>,
    max_concurrency: usize,
    progress: &ProgressBar,
) -> BatchOutcome {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    for resume in resumes {
        let scorer = scorer.clone();
        let job_text = Arc::clone(&job_text);
        let semaphore = Arc::clone(&semaphore);

        tasks.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    let error = ResumeScorerError::InvalidInput(format!("Batch cancelled: {}", e));
                    return Err((resume, error));
                }
            };

            let text = InputManager::new()
                .with_cache(false)
                .extract_text(&resume)
                .await;
            match text {
                Ok(text) => Ok(scorer.score_document(&display_name(&resume), &text, &job_text)),
                Err(e) => Err((resume, e)),
            }
        });
    }

    let mut outcome = BatchOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(record)) => {
                progress.set_message(record.filename.clone());
                outcome.records.push(record);
            }
            Ok(Err((path, error))) => {
                progress.println(format!("⚠️  {}: {}", path.display(), error));
                outcome.failed.push(BatchFailure { path, error });
            }
            Err(e) => warn!("Scoring task failed: {}", e),
        }
        progress.inc(1);
    }

    outcome.records.sort_by(|a, b| {
        b.ats_score
            .cmp(&a.ats_score)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    outcome.failed.sort_by(|a, b| a.path.cmp(&b.path));
    outcome
}

//! Orchestration around the scorer: upload-triggered scoring, batch scoring
//! and the resume library

pub mod batch;
pub mod library;
pub mod scoring;

pub use batch::{score_files, BatchFailure, BatchOutcome};
pub use library::{DeleteSummary, ResumeLibrary, StoredScoringPipeline, UploadReceipt};
pub use scoring::{Delivery, ScoringOutcome, ScoringPipeline};

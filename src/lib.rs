//! Resume scorer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod storage;

pub use config::Config;
pub use error::{Result, ResumeScorerError};
pub use processing::ats_scorer::{score, AtsScore, AtsScorer, ScoreRecord};
pub use processing::keywords::{extract_keywords, KeywordExtractor};
pub use processing::vocabulary::Vocabulary;

//! Keyword extraction, vocabulary and ATS scoring

pub mod ats_scorer;
pub mod keywords;
pub mod vocabulary;

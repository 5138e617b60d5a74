//! Input processing module
//! Handles file detection, text extraction, and document sources

pub mod document_source;
pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use document_source::{
    DocumentTextExtractor, JobDescriptionSource, StoredDocumentExtractor, StoredJobDescriptions,
};
pub use manager::InputManager;

//! Text extraction from raw document bytes

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::FileType;
use pulldown_cmark::{Event, Parser, Tag};

pub trait TextExtractor {
    /// Decode `bytes` into plain text. `source` names the document in errors.
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            ResumeScorerError::Extraction(format!(
                "Failed to extract text from PDF '{}': {}",
                source, e
            ))
        })
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            ResumeScorerError::Extraction(format!("'{}' is not valid UTF-8: {}", source, e))
        })
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8], source: &str) -> Result<String> {
        let markdown = PlainTextExtractor.extract(bytes, source)?;
        Ok(self.markdown_to_text(&markdown))
    }
}

impl MarkdownExtractor {
    fn markdown_to_text(&self, markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(content) | Event::Code(content) => text.push_str(&content),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Decode a document according to its detected type.
pub fn extract_document_text(file_type: FileType, bytes: &[u8], source: &str) -> Result<String> {
    match file_type {
        FileType::Pdf => PdfExtractor.extract(bytes, source),
        FileType::Text => PlainTextExtractor.extract(bytes, source),
        FileType::Markdown => MarkdownExtractor.extract(bytes, source),
        FileType::Unknown => Err(ResumeScorerError::UnsupportedFormat(format!(
            "Unsupported file type for: {}",
            source
        ))),
    }
}

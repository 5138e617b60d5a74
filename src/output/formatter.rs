//! Output formatters for score records

use crate::config::OutputFormat;
use crate::error::Result;
use crate::processing::ats_scorer::{ScoreRecord, MAX_RATING};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting score records
pub trait OutputFormatter {
    fn format_record(&self, record: &ScoreRecord) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and star ratings
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter producing the wire format
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing results
pub struct MarkdownFormatter;

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

pub fn star_glyphs(rating: u8) -> String {
    let filled = rating.min(MAX_RATING) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(MAX_RATING as usize - filled))
}

fn score_label(score: u8) -> (&'static str, Color) {
    match score {
        90..=100 => ("EXCELLENT", Color::Green),
        80..=89 => ("VERY GOOD", Color::BrightGreen),
        70..=79 => ("GOOD", Color::Yellow),
        60..=69 => ("FAIR", Color::BrightYellow),
        50..=59 => ("BELOW AVG", Color::Red),
        _ => ("POOR", Color::BrightRed),
    }
}

fn sorted(keywords: &[String]) -> Vec<&str> {
    let mut keywords: Vec<&str> = keywords.iter().map(String::as_str).collect();
    keywords.sort_unstable();
    keywords
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = score_label(score);
        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_keyword_list(&self, keywords: &[String], color: Color) -> String {
        if keywords.is_empty() {
            return self.colorize("none", Color::BrightBlack);
        }
        sorted(keywords)
            .into_iter()
            .map(|k| self.colorize(k, color))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_record(&self, record: &ScoreRecord) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&format!("📊 ATS SCORE: {}", record.filename)));
        output.push_str(&format!(
            "Score:  {}% {}\n",
            record.ats_score,
            self.format_score_badge(record.ats_score)
        ));
        output.push_str(&format!(
            "Rating: {} ({}/{})\n",
            self.colorize(&star_glyphs(record.rating), Color::Yellow),
            record.rating,
            MAX_RATING
        ));

        let job_terms = record.matched_keywords.len() + record.suggested_keywords.len();
        if job_terms == 0 {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize(
                    "⚠️  The job description mentions no recognized technology terms.",
                    Color::Yellow
                )
            ));
            return Ok(output);
        }

        output.push_str(&format!(
            "\n✅ Matched ({}): {}\n",
            record.matched_keywords.len(),
            self.format_keyword_list(&record.matched_keywords, Color::Green)
        ));
        output.push_str(&format!(
            "💡 Suggested ({}): {}\n",
            record.suggested_keywords.len(),
            self.format_keyword_list(&record.suggested_keywords, Color::Red)
        ));

        if self.detailed {
            output.push_str(&format!(
                "\nCoverage: {} of {} technology terms from the job description\n",
                record.matched_keywords.len(),
                job_terms
            ));
            if !record.suggested_keywords.is_empty() {
                output.push_str("Consider adding, where truthful:\n");
                for keyword in sorted(&record.suggested_keywords) {
                    output.push_str(&format!("  • {}\n", keyword));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &ScoreRecord) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(record)?)
        } else {
            Ok(serde_json::to_string(record)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_record(&self, record: &ScoreRecord) -> Result<String> {
        let (label, _) = score_label(record.ats_score);
        let mut output = format!("# ATS Score: {}\n\n", record.filename);

        output.push_str("| Metric | Value |\n|---|---|\n");
        output.push_str(&format!("| Score | {}% ({}) |\n", record.ats_score, label));
        output.push_str(&format!(
            "| Rating | {} ({}/{}) |\n",
            star_glyphs(record.rating),
            record.rating,
            MAX_RATING
        ));

        output.push_str("\n## Matched keywords\n\n");
        if record.matched_keywords.is_empty() {
            output.push_str("_None_\n");
        }
        for keyword in sorted(&record.matched_keywords) {
            output.push_str(&format!("- {}\n", keyword));
        }

        output.push_str("\n## Suggested keywords\n\n");
        if record.suggested_keywords.is_empty() {
            output.push_str("_None_\n");
        }
        for keyword in sorted(&record.suggested_keywords) {
            output.push_str(&format!("- {}\n", keyword));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter,
        }
    }

    pub fn generate(&self, record: &ScoreRecord, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_record(record),
            OutputFormat::Json => self.json_formatter.format_record(record),
            OutputFormat::Markdown => self.markdown_formatter.format_record(record),
        }
    }

    /// Several records at once; JSON output becomes a single array.
    pub fn generate_batch(&self, records: &[ScoreRecord], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json if self.json_formatter.pretty => {
                Ok(serde_json::to_string_pretty(records)?)
            }
            OutputFormat::Json => Ok(serde_json::to_string(records)?),
            _ => {
                let parts = records
                    .iter()
                    .map(|record| self.generate(record, format))
                    .collect::<Result<Vec<_>>>()?;
                Ok(parts.join("\n"))
            }
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

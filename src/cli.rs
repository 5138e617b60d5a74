//! CLI interface for the resume scorer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Keyword-based ATS scoring of resumes against job descriptions")]
#[command(long_about = "Score how many of a job description's recognized technology terms a resume mentions, with matched and suggested keywords and a 1-5 star rating")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume file against a job description file
    Score {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Vocabulary file overriding the configured one
        #[arg(long)]
        vocabulary: Option<PathBuf>,

        /// Show coverage details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Score several resumes against one job description
    Batch {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD)
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Vocabulary file overriding the configured one
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },

    /// Upload a resume with its job description and score it
    Upload {
        /// Owner of the upload (e.g. an email address)
        #[arg(long)]
        owner: String,

        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show the stored result for an uploaded resume
    #[command(name = "result")]
    FetchResult {
        #[arg(long)]
        owner: String,

        #[arg(short, long)]
        filename: String,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List uploaded resumes
    List {
        #[arg(long)]
        owner: String,
    },

    /// Delete uploaded resumes with their job descriptions and results
    Delete {
        #[arg(long)]
        owner: String,

        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Show the technology vocabulary
    Vocabulary {
        /// Show only one category
        #[arg(long)]
        category: Option<String>,

        /// Vocabulary file overriding the configured one
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

//! Resume scorer: keyword-based ATS scoring of resumes against job descriptions

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::pipeline::batch::display_name;
use resume_scorer::pipeline::{score_files, Delivery, ResumeLibrary};
use resume_scorer::storage::FsBlobStore;
use resume_scorer::AtsScorer;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];
const JOB_EXTENSIONS: &[&str] = &["txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone();
    let config = match config_path.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            vocabulary,
            detailed,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let vocabulary = config
                .load_vocabulary(vocabulary.as_deref())
                .context("Failed to load vocabulary")?;
            info!("Using vocabulary v{} ({} terms)", vocabulary.version(), vocabulary.len());

            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let scorer = AtsScorer::new(vocabulary);
            let record = scorer.score_document(&display_name(&resume), &resume_text, &job_text);

            let generator = ReportGenerator::with_options(
                config.output.color_output,
                detailed || config.output.detailed,
                true,
            );
            let report = generator.generate(&record, &format)?;
            println!("{}", report);

            if let Some(path) = save {
                let content = if format == OutputFormat::Console {
                    ReportGenerator::with_options(false, true, true).generate(&record, &format)?
                } else {
                    report
                };
                save_report_to_file(&content, &path)
                    .with_context(|| format!("Failed to save report to {}", path.display()))?;
                println!("💾 Saved report to {}", path.display());
            }
        }

        Commands::Batch {
            job,
            resumes,
            output,
            vocabulary,
        } => {
            cli::validate_file_extension(&job, JOB_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let vocabulary = config
                .load_vocabulary(vocabulary.as_deref())
                .context("Failed to load vocabulary")?;
            let job_text = InputManager::new()
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            let outcome = score_files(
                &AtsScorer::new(vocabulary),
                Arc::new(job_text),
                resumes,
                config.batch.max_concurrency,
                &progress,
            )
            .await;
            progress.finish_and_clear();

            if outcome.records.is_empty() {
                bail!("No resume could be scored");
            }
            if !outcome.failed.is_empty() {
                warn!("{} resume(s) could not be scored", outcome.failed.len());
            }

            let generator = ReportGenerator::with_options(config.output.color_output, false, true);
            println!("{}", generator.generate_batch(&outcome.records, &format)?);
        }

        Commands::Upload {
            owner,
            resume,
            job,
            output,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let resume_bytes = tokio::fs::read(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let job_text = InputManager::new()
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let library = open_library(&config);
            let receipt = library
                .upload(&owner, &display_name(&resume), &resume_bytes, &job_text)
                .await?;
            println!("📤 Uploaded {} as {}", resume.display(), receipt.resume_key);

            let scorer = AtsScorer::new(config.load_vocabulary(None)?);
            let pipeline = library.scoring_pipeline(scorer, config.storage.fallback_results);
            let outcome = pipeline.process_key(&receipt.resume_key).await?;

            if outcome.delivery == Delivery::Fallback {
                warn!("Result was written to the fallback location");
            }

            let generator = ReportGenerator::with_options(config.output.color_output, false, true);
            println!("{}", generator.generate(&outcome.record, &format)?);
        }

        Commands::FetchResult {
            owner,
            filename,
            output,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let record = open_library(&config).fetch_result(&owner, &filename).await?;

            let generator = ReportGenerator::with_options(config.output.color_output, false, true);
            println!("{}", generator.generate(&record, &format)?);
        }

        Commands::List { owner } => {
            let resumes = open_library(&config).list_resumes(&owner).await?;
            if resumes.is_empty() {
                println!("No resumes uploaded for {}", owner);
            } else {
                println!("📄 Resumes for {}:", owner);
                for name in resumes {
                    println!("  • {}", name);
                }
            }
        }

        Commands::Delete { owner, filenames } => {
            let summary = open_library(&config).delete_resumes(&owner, &filenames).await?;
            println!(
                "🗑️  Deleted {} of {} resume(s) for {}",
                summary.deleted, summary.requested, owner
            );
            for failed in &summary.failed {
                println!("  ❌ {}", failed);
            }
            if !summary.failed.is_empty() {
                bail!("{} deletion(s) failed", summary.failed.len());
            }
        }

        Commands::Vocabulary { category, path } => {
            let vocabulary = config
                .load_vocabulary(path.as_deref())
                .context("Failed to load vocabulary")?;
            println!(
                "📚 Vocabulary v{} ({} terms)",
                vocabulary.version(),
                vocabulary.len()
            );

            let mut shown = 0;
            for (name, terms) in vocabulary.categories() {
                if category.as_deref().is_some_and(|c| c != name.as_str()) {
                    continue;
                }
                shown += 1;
                println!("\n{} ({}):", name, terms.len());
                println!("  {}", terms.join(", "));
            }

            if let (Some(category), 0) = (&category, shown) {
                bail!("Unknown vocabulary category: {}", category);
            }
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action.unwrap_or(ConfigAction::Show) {
                ConfigAction::Show => {
                    println!("# {}", path.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }
                ConfigAction::Reset => {
                    Config::default().save_to(&path)?;
                    println!("✅ Configuration reset: {}", path.display());
                }
                ConfigAction::Path => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn resolve_format(requested: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

fn open_library(config: &Config) -> ResumeLibrary<FsBlobStore> {
    info!("Using blob store at {}", config.storage.root_dir.display());
    ResumeLibrary::new(Arc::new(FsBlobStore::new(config.storage.root_dir.clone())))
}

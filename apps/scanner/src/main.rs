use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_scanner::models::UploadDocument;
use resume_scanner::report::{render_batch, render_documents, render_result};
use resume_scanner::session::ConfigurationState;
use resume_scanner::{Config, HttpEvaluationService, Session, Tab};

#[derive(Debug, Parser)]
#[command(name = "resume-scanner", version, about = "Evaluate resumes against a job description")]
struct Cli {
    /// Base URL of the evaluation service (overrides SCANNER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Job description to score against (overrides SCANNER_JOB_DESCRIPTION)
    #[arg(long, global = true)]
    job_description: Option<String>,

    /// Comma-separated skills (overrides SCANNER_SKILLS)
    #[arg(long, global = true)]
    skills: Option<String>,

    /// Print per-dimension explanations
    #[arg(long, global = true)]
    details: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that the service is reachable
    Health,
    /// List the date folders in the collection
    Folders,
    /// List the resumes in a folder (root if omitted)
    List {
        #[arg(long)]
        folder: Option<String>,
    },
    /// Upload a PDF and score it immediately
    ScanUpload { file: PathBuf },
    /// Score resumes already in the collection
    Scan {
        #[arg(long)]
        folder: Option<String>,
        /// Select every resume in the folder
        #[arg(long, conflicts_with = "paths")]
        all: bool,
        /// Storage paths to select
        paths: Vec<String>,
    },
    /// Store a PDF in the collection without scoring it
    Upload { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume_scanner={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Resume Scanner v{} using {}",
        env!("CARGO_PKG_VERSION"),
        config.api_url
    );

    let service = Arc::new(HttpEvaluationService::new(&config)?);
    let session = Session::new(
        service,
        ConfigurationState::new(config.job_description.clone(), config.skills.clone()),
    );
    if let Some(text) = cli.job_description.clone() {
        session.set_job_description(text);
    }
    if let Some(text) = cli.skills.clone() {
        session.set_skills(text);
    }

    run(cli.command, &session, cli.details).await
}

async fn run(command: Command, session: &Session, details: bool) -> Result<()> {
    match command {
        Command::Health => {
            let health = session.health().await?;
            println!("{}", health.status);
        }
        Command::Folders => {
            session.select_tab(Tab::Collection).await;
            let state = session.snapshot();
            if state.browser.folders().is_empty() {
                println!("No folders found");
            }
            for folder in state.browser.folders() {
                println!("{folder}");
            }
        }
        Command::List { folder } => {
            session.select_folder(folder).await;
            let state = session.snapshot();
            print!(
                "{}",
                render_documents(state.browser.documents(), |p| state.selection.is_selected(p))
            );
        }
        Command::ScanUpload { file } => {
            let upload = UploadDocument::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            if upload.is_empty() {
                bail!("{} is empty", file.display());
            }
            if let Some(result) = session.evaluate_upload(upload).await {
                print!("{}", render_result(&result, true));
            }
        }
        Command::Scan { folder, all, paths } => {
            session.select_folder(folder).await;
            if all {
                session.toggle_all_documents();
            } else {
                for path in &paths {
                    session.toggle_document(path);
                }
            }
            match session.scan_selected().await {
                Some(batch) => print!("{}", render_batch(&batch, details)),
                None => println!("Nothing selected"),
            }
        }
        Command::Upload { file } => {
            let upload = UploadDocument::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let receipt = session.upload_document(upload).await?;
            println!(
                "{}",
                receipt
                    .storage_path
                    .or(receipt.filename)
                    .unwrap_or_default()
            );
        }
    }
    Ok(())
}

mod config;
mod logging;
mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use summarizer_core::{FileDescriptor, LifecycleState, SubmissionInput};
use summarizer_engine::SubmissionController;
use summarizer_logging::{summarizer_info, summarizer_warn};

use crate::logging::LogDestination;

/// Exit status after Ctrl-C, following the shell convention for SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "summarizer")]
#[command(author, version, about = "Generate a title and summary for text or a document")]
struct Cli {
    /// Text to summarize (read from stdin when neither --text nor --file is given)
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Document to upload (.pdf or .docx)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// RON configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILENAME)]
    config: PathBuf,

    /// Summarization service URL (overrides config)
    #[arg(long)]
    service_url: Option<String>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    log: LogDestination,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(cli.log, level);

    let mut config = config::load(&cli.config)?;
    if let Some(url) = &cli.service_url {
        config.service_url = url.clone();
    }
    summarizer_info!("Using summarization service at {}", config.service_url);

    let input = read_input(&cli, config.max_file_bytes)?;
    let controller =
        SubmissionController::with_reqwest(config.executor_settings(), config.policy())?;

    controller.submit(input);
    if controller.lifecycle().is_active() {
        eprintln!("{}", render::render(&controller.lifecycle()));
    }

    let final_state = tokio::select! {
        state = controller.settled() => state,
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            summarizer_warn!("Interrupted; cancelling the submission");
            controller.cancel_active();
            controller.lifecycle()
        }
    };

    println!("{}", render::render(&final_state));
    Ok(exit_code(&final_state))
}

fn read_input(cli: &Cli, max_file_bytes: u64) -> Result<SubmissionInput> {
    if let Some(path) = &cli.file {
        return Ok(SubmissionInput::File(read_file(path, max_file_bytes)?));
    }

    let text = match &cli.text {
        Some(text) => text.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read text from stdin")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("nothing to summarize: pass --text, --file or pipe text on stdin");
    }
    Ok(SubmissionInput::Text(text))
}

/// Files over the limit are described by metadata only; validation rejects them
/// without reading the content.
fn read_file(path: &Path, max_file_bytes: u64) -> Result<FileDescriptor> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let size = std::fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    if size > max_file_bytes {
        return Ok(FileDescriptor::metadata_only(name, size));
    }
    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(FileDescriptor::from_bytes(name, content))
}

fn exit_code(state: &LifecycleState) -> ExitCode {
    match state {
        LifecycleState::Succeeded(_) => ExitCode::SUCCESS,
        LifecycleState::Idle => ExitCode::from(EXIT_INTERRUPTED),
        _ => ExitCode::FAILURE,
    }
}

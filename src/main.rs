//! panekit - Entry Point

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// panekit - multi-pane terminal status screen
#[derive(Parser, Debug)]
#[command(name = "panekit")]
#[command(version)]
#[command(about = "Browse a TOML or JSON screen description in a multi-pane terminal UI")]
pub struct Args {
    /// Screen description file (.toml, or .json)
    pub screen_file: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Screen reader mode (e.g. "orca"); an empty value turns it off
    #[arg(long, value_name = "MODE")]
    pub screen_reader: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] panekit::config::ConfigError),
    #[error(transparent)]
    Logging(#[from] panekit::logging::LoggingError),
    #[error(transparent)]
    Content(#[from] panekit::model::ContentError),
    #[error(transparent)]
    Tui(#[from] panekit::view::TuiError),
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "panekit exited with an error");
            eprintln!("panekit: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = panekit::config::load_config_with_precedence(args.config.clone())?;
        let merged = panekit::config::merge_config(config_file);
        let with_env = panekit::config::apply_env_overrides(merged);
        panekit::config::apply_cli_overrides(with_env, args.screen_reader.clone())
    };
    config.validate()?;

    panekit::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let colors = panekit::view::ColorConfig::from_env_and_args(args.no_color);
    let options = panekit::view::SessionOptions::from_config(&config, colors)?;

    let source = panekit::source::FileContent::open(&args.screen_file)?;
    panekit::view::run_with_source(source, options)?;

    Ok(())
}

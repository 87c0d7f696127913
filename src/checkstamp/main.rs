use checkstamp::api::{CmdResult, ConfigAction, StampApi, StampPaths};
use checkstamp::config::StampConfig;
use checkstamp::error::{Result, StampError};
use checkstamp::store::fs::FileStore;
use clap::Parser;
use directories::ProjectDirs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod args;
mod cli;
use args::{Cli, Commands};
use cli::print::{eprint_messages, print_config, print_messages};
use cli::progress::TerminalProgress;

const HOME_ENV: &str = "CHECKSTAMP_HOME";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(result) if result.has_errors() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<CmdResult> {
    let cli = Cli::parse();
    let paths = StampPaths {
        config_dir: config_dir()?,
    };
    let loaded = StampConfig::load(&paths.config_dir);
    let debug = cli.verbose || loaded.as_ref().is_ok_and(|c| c.enable_debug_logging);
    init_tracing(debug);

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        StampConfig::default()
    });

    match cli.command {
        Commands::File { path } => handle_file(config, paths, path),
        Commands::Vault { root, extensions } => {
            handle_vault(config, paths, root, extensions).await
        }
        Commands::Text { date } => handle_text(config, paths, date),
        Commands::Live { path, line } => handle_live(config, paths, path, line),
        Commands::Config { key, value } => handle_config(config, paths, key, value),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "checkstamp", "checkstamp")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| StampError::Config("Could not determine config dir".into()))
}

/// Logs go to stderr so `text` can stream its result on stdout.
fn init_tracing(debug: bool) {
    let default = if debug {
        "checkstamp=debug"
    } else {
        "checkstamp=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn handle_file(config: StampConfig, paths: StampPaths, path: PathBuf) -> Result<CmdResult> {
    let (store, id) = FileStore::for_file(&path)?;
    let api = StampApi::new(store, config, paths);
    let result = api.stamp_document(&id)?;
    print_messages(&result.messages);
    Ok(result)
}

async fn handle_vault(
    config: StampConfig,
    paths: StampPaths,
    root: Option<PathBuf>,
    extensions: Vec<String>,
) -> Result<CmdResult> {
    let root = root.unwrap_or_else(|| PathBuf::from("."));
    let store = FileStore::new(root).with_extensions(extensions);
    let api = StampApi::new(store, config, paths);

    let mut progress = TerminalProgress::stderr();
    let result = api.stamp_corpus(&mut progress).await?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_text(config: StampConfig, paths: StampPaths, date: Option<String>) -> Result<CmdResult> {
    let input = std::io::read_to_string(std::io::stdin()).map_err(StampError::Io)?;
    let api = StampApi::new(FileStore::new("."), config, paths);
    let result = api.stamp_text(&input, date.as_deref())?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(result.text.as_deref().unwrap_or_default().as_bytes())
        .map_err(StampError::Io)?;
    stdout.flush().map_err(StampError::Io)?;

    eprint_messages(&result.messages);
    Ok(result)
}

fn handle_live(
    config: StampConfig,
    paths: StampPaths,
    path: PathBuf,
    line: usize,
) -> Result<CmdResult> {
    let (store, id) = FileStore::for_file(&path)?;
    let api = StampApi::new(store, config, paths);
    let result = api.stamp_live_document(&id, line)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_config(
    config: StampConfig,
    paths: StampPaths,
    key: Option<String>,
    value: Option<String>,
) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let api = StampApi::new(FileStore::new("."), config, paths);
    let result = api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(result)
}

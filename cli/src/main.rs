//! CLI entrypoint for pollster
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod app;
mod logging;

use anyhow::{Context, Result, anyhow, bail};
use app::{App, Status};
use chrono::Utc;
use clap::Parser;
use pollster_application::{AuditLogger, NoAuditLogger};
use pollster_domain::{ConfigIssue, OutputFormat, PollRepository, Severity};
use pollster_infrastructure::{
    ConfigLoader, FileConfig, InMemoryPollStore, JsonFilePollStore, JsonlAuditLogger,
};
use pollster_presentation::Cli;
use pollster_presentation::output::formatter::formatter_for;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => eprintln!("config warning: {}", issue.message),
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Invalid configuration");
    }

    let log_dir = config
        .logging
        .directory
        .as_deref()
        .filter(|d| !d.as_os_str().is_empty());
    let _log_guard = logging::init(cli.verbose, log_dir);

    info!("Starting pollster");

    let Some(command) = cli.command else {
        bail!("No command given. Run `pollster --help` for usage.");
    };

    let format = cli.output.map(OutputFormat::from).unwrap_or(config.output.format);
    if !config.output.color || format == OutputFormat::Json {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let repository = open_store(&config).await?;
    let audit_logger = open_audit_log(&config);

    let app = App::new(
        repository,
        config.listing.to_listing_params(),
        audit_logger,
        formatter_for(format),
    );

    let now = cli.now.unwrap_or_else(Utc::now);
    let response = app.handle(command, now).await?;

    match response.status {
        Status::NotFound => eprint!("{}", response.body),
        Status::Success | Status::Rejected => print!("{}", response.body),
    }

    Ok(response.status.into())
}

async fn open_store(config: &FileConfig) -> Result<Arc<dyn PollRepository>> {
    match config.store.file_path() {
        Some(path) => {
            let store = JsonFilePollStore::open(path)
                .await
                .with_context(|| format!("Failed to open poll store {}", path.display()))?;
            info!("Using poll store {}", store.path().display());
            Ok(Arc::new(store))
        }
        None => {
            info!("In-memory store, nothing is kept after exit");
            Ok(Arc::new(InMemoryPollStore::new()))
        }
    }
}

fn open_audit_log(config: &FileConfig) -> Arc<dyn AuditLogger> {
    let Some(path) = config
        .logging
        .audit_log
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
    else {
        return Arc::new(NoAuditLogger);
    };

    match JsonlAuditLogger::open(path) {
        Ok(logger) => {
            info!("Audit log: {}", logger.path().display());
            Arc::new(logger)
        }
        Err(e) => {
            warn!("Could not open audit log {}: {}", path.display(), e);
            Arc::new(NoAuditLogger)
        }
    }
}

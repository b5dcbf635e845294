//! Hook host entry point: JSON in on stdin, JSON out on stdout.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use quadgate::pipeline::GateHost;
use quadgate::protocol::{HookInput, HookOutput};
use quadgate_audit::{AuditLogger, default_audit_dir, resolve_session_id};
use quadgate_settings::{GateSettings, load_settings, load_settings_from};

#[derive(Debug, Parser)]
#[command(name = "quadgate", about = "Content gate hook host")]
struct Args {
    /// Explicit settings file, replacing the user and project layers.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the review time budget in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Project root for settings discovery and the research sweep.
    /// Defaults to the request's `cwd`, then the current directory.
    #[arg(long)]
    project_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries exactly one JSON object.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let mut raw = String::new();
    let _ = tokio::io::stdin().read_to_string(&mut raw).await?;

    let input: HookInput = match serde_json::from_str(&raw) {
        Ok(input) => input,
        Err(e) => {
            tracing::warn!(error = %e, "unparsable hook input, approving");
            return write_output(&HookOutput::approve()).await;
        }
    };

    let project_root = args
        .project_root
        .clone()
        .or_else(|| input.cwd.as_deref().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let settings = load(&args, &project_root);

    let session_id = resolve_session_id(input.session_id.as_deref());
    let audit_dir = settings
        .audit
        .log_dir
        .clone()
        .unwrap_or_else(|| default_audit_dir(&project_root));
    let logger = AuditLogger::new(settings.audit.enabled, audit_dir, session_id);

    let mut host = GateHost::new(settings, logger, project_root);
    if let Some(ms) = args.timeout_ms {
        host = host.with_timeout(Duration::from_millis(ms));
    }

    let output = host.handle(&input).await;
    write_output(&output).await
}

/// Load settings, degrading to defaults if every layer fails.
fn load(args: &Args, project_root: &std::path::Path) -> GateSettings {
    let loaded = match &args.settings {
        Some(path) => load_settings_from(path, std::path::Path::new("")),
        None => load_settings(project_root),
    };
    match loaded {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            GateSettings::default()
        }
    }
}

async fn write_output(output: &HookOutput) -> Result<()> {
    let encoded = serde_json::to_string(output)?;
    let mut stdout = tokio::io::stdout();
    stdout.write_all(encoded.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

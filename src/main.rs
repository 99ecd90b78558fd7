use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use blobstore_render::cli::{handle_check_command, handle_render_command, CheckArgs, RenderArgs};
use blobstore_render::config::RenderSettings;

#[derive(Parser)]
#[command(
    name = "blobstore-render",
    version,
    about = "Validate blobstore bucket declarations and render backup/restore configuration",
    long_about = "blobstore-render checks the bucket roles declared in a job manifest for a \
                  single storage backend (versioned S3, unversioned S3, GCS or Azure) and, \
                  when they are safe to use, writes the JSON configuration the backup and \
                  restore scripts read."
)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "BLOBSTORE_RENDER_LOG")]
    log_level: Option<String>,

    /// Settings file (YAML or JSON)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest and write config/buckets.json
    Render(RenderArgs),

    /// Validate the manifest and print the bucket roles without writing anything
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = RenderSettings::load_or_default(cli.settings.as_deref())?;
    init_tracing(settings.resolve_log_level(cli.log_level.as_deref()));

    match cli.command {
        Commands::Render(args) => handle_render_command(&settings, args)?,
        Commands::Check(args) => handle_check_command(&settings, args)?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let log_level: tracing::Level = log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

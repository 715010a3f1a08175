//! Textcue - plain text to timed captions
//!
//! Command-line entry point: loads configuration, applies command-line
//! overrides, and runs single-file or batch conversions.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use textcue::cli::{Args, Commands, ConfigAction};
use textcue::config::Config;
use textcue::error::TextcueError;
use textcue::workflow::Workflow;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logging to both console and file
    setup_logging(args.verbose)?;

    // Load configuration
    let mut config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if Path::new("config.toml").exists() {
                info!("Found config.toml in current directory, loading...");
                Config::from_file("config.toml")?
            } else {
                Config::default()
            }
        }
    };

    match args.command {
        Commands::Convert { input, output_dir, overrides } => {
            overrides.apply(&mut config)?;
            let workflow = Workflow::new(config)?;

            let report = workflow.convert_file(&input, output_dir.as_ref()).await?;
            for output in &report.outputs {
                println!("{}", output.display());
            }
            if report.outputs.is_empty() {
                println!("No captions generated for {}", input.display());
            }
        }
        Commands::Batch { input_dir, output_dir, overrides } => {
            overrides.apply(&mut config)?;
            let workflow = Workflow::new(config)?;

            let reports = workflow.convert_directory(&input_dir, output_dir.as_ref()).await?;
            let cue_total: usize = reports.iter().map(|r| r.cue_count).sum();
            println!(
                "Converted {} documents into {} captions",
                reports.len(),
                cue_total
            );
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Init { path, force } => {
                if path.exists() && !force {
                    return Err(TextcueError::OutputExists(path.display().to_string()).into());
                }
                Config::default().save_to_file(&path)?;
                println!("Wrote default configuration to {}", path.display());
            }
        },
    }

    info!("Textcue completed successfully");
    Ok(())
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = std::env::current_dir()?.join(".textcue").join("log");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = rolling::daily(&log_dir, "textcue.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);
    std::mem::forget(guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    // Console output goes to stderr so stdout stays clean for `config show`
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(
        "Logging initialized - console: {}, file: {}",
        log_level,
        log_dir.join("textcue.log").display()
    );

    Ok(())
}

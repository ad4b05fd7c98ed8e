//! exifview CLI - upload a photograph, read its EXIF tags and get a resized
//! preview.
//!
//! # Usage
//!
//! ```bash
//! # Run the upload page on the configured address
//! exifview serve
//!
//! # Run the pipeline on local files and print JSON
//! exifview process holiday.jpg --pretty
//!
//! # View configuration
//! exifview config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

/// exifview - EXIF viewer and preview generator for uploaded photographs.
#[derive(Parser, Debug)]
#[command(name = "exifview")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the upload page over HTTP
    Serve(cli::serve::ServeArgs),

    /// Run the upload pipeline on local files
    Process(cli::process::ProcessArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to stderr directly.
    let config = match exifview_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `exifview config path`."
            );
            exifview_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("exifview v{}", exifview_core::VERSION);

    match cli.command {
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}

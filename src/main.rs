//! Binary entry point for influmatch.
//!
//! CLI for serving the match API, running one-shot matches, and loading
//! influencer metric spreadsheets into the candidate store.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow unnecessary_wraps for consistent command function signatures
#![allow(clippy::unnecessary_wraps)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::multiple_crate_versions)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use influmatch::config::MatchConfig;
use influmatch::ingest::{CsvImporter, ImportOptions};
use influmatch::models::{MatchRequest, Platform};
use influmatch::observability;
use influmatch::services::MatchService;
use influmatch::storage::{CandidateStore, SqliteStore};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Influmatch - influencer matching by weighted cosine similarity.
#[derive(Parser)]
#[command(name = "influmatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP match API.
    Serve {
        /// Port to bind (overrides config).
        #[arg(short, long)]
        port: Option<u16>,

        /// Candidate database path (overrides config).
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Rank stored candidates against a target vector.
    Match {
        /// Target vector as comma-separated numbers.
        target: String,

        /// Weight vector as comma-separated numbers.
        weights: String,

        /// Maximum number of results.
        #[arg(short = 'k', long, default_value = "5")]
        top_k: usize,

        /// Platform to rank: facebook, youtube, or tiktok.
        #[arg(short, long, default_value = "facebook")]
        platform: Platform,

        /// Candidate database path (overrides config).
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Import an influencer metrics CSV into the store.
    Import {
        /// Path to the CSV file.
        file: PathBuf,

        /// Platform the metrics belong to.
        #[arg(short, long, default_value = "facebook")]
        platform: Platform,

        /// Clear the platform's existing candidates first.
        #[arg(long)]
        replace: bool,

        /// Candidate database path (overrides config).
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Show candidate counts per platform.
    Status {
        /// Candidate database path (overrides config).
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    observability::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(
    command: Commands,
    config: MatchConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Serve { port, db } => cmd_serve(config, port, db).await,

        Commands::Match {
            target,
            weights,
            top_k,
            platform,
            db,
        } => cmd_match(&config, &target, &weights, top_k, platform, db),

        Commands::Import {
            file,
            platform,
            replace,
            db,
        } => cmd_import(&config, &file, platform, replace, db),

        Commands::Status { db } => cmd_status(&config, db),

        Commands::Completions { shell } => cmd_completions(shell),
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<MatchConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return MatchConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("INFLUMATCH_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return MatchConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, load from default location
    Ok(MatchConfig::load_default())
}

/// Opens the candidate store, preferring an explicit `--db` override.
fn open_store(
    config: &MatchConfig,
    db: Option<PathBuf>,
) -> Result<Arc<SqliteStore>, Box<dyn std::error::Error>> {
    let db_path = db.unwrap_or_else(|| config.db_path.clone());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(Arc::new(SqliteStore::new(db_path)?))
}

/// Parses a comma-separated vector argument.
fn parse_vector(arg: &str) -> Result<Vec<f32>, Box<dyn std::error::Error>> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f32>()
                .map_err(|_| format!("'{s}' is not a number").into())
        })
        .collect()
}

/// Serve command.
async fn cmd_serve(
    config: MatchConfig,
    port: Option<u16>,
    db: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match port {
        Some(port) => config.with_port(port),
        None => config,
    };

    let store = open_store(&config, db)?;
    let service = Arc::new(MatchService::new(store));
    let addr = config.bind_addr()?;

    influmatch::http::serve(service, addr).await?;
    Ok(())
}

/// Match command.
fn cmd_match(
    config: &MatchConfig,
    target: &str,
    weights: &str,
    top_k: usize,
    platform: Platform,
    db: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = MatchRequest::new(parse_vector(target)?, parse_vector(weights)?)
        .with_top_k(top_k)
        .with_platform(platform);

    let store = open_store(config, db)?;
    let service = MatchService::new(store);
    let matches = service.match_candidates(&request)?;

    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

/// Import command.
fn cmd_import(
    config: &MatchConfig,
    file: &std::path::Path,
    platform: Platform,
    replace: bool,
    db: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config, db)?;
    let reader = std::fs::File::open(file)?;

    let importer = CsvImporter::new(store);
    let summary = importer.import_from_reader(
        std::io::BufReader::new(reader),
        ImportOptions { platform, replace },
    )?;

    println!(
        "Imported {} candidates for {platform} ({} rows skipped)",
        summary.imported, summary.skipped
    );
    Ok(())
}

/// Status command.
fn cmd_status(
    config: &MatchConfig,
    db: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_path = db.unwrap_or_else(|| config.db_path.clone());
    let store = open_store(config, Some(db_path.clone()))?;

    println!("Candidate store: {}", db_path.display());
    for platform in Platform::all() {
        println!("  {platform}: {} candidates", store.count(*platform)?);
    }
    Ok(())
}

/// Completions command.
fn cmd_completions(shell: Shell) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}

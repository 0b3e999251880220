//! TrackStats - descriptive statistics over a music track dataset
//!
//! A CLI tool that loads one CSV of tracks and derives seven summary
//! tables (genre volume, feature correlations, normalization, temporal
//! trends, hit/non-hit comparison, feature diversity), writing each as
//! a small CSV for downstream display.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing input, bad flags, parse or write failure)

mod cli;
mod config;
mod dataset;
mod models;
mod output;
mod stats;
mod transforms;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use dataset::Dataset;
use output::TableWriter;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use transforms::AnalysisOptions;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config and --list early (no logging needed)
    if args.init_config {
        exit_on_error(handle_init_config());
        return;
    }
    if args.list {
        handle_list();
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("TrackStats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    exit_on_error(run_pipeline(args));
}

fn exit_on_error(result: Result<()>) {
    if let Err(e) = result {
        error!("Pipeline failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .trackstats.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".trackstats.toml");

    if path.exists() {
        eprintln!("⚠️  .trackstats.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .trackstats.toml")?;

    println!("✅ Created .trackstats.toml with default settings.");
    println!("   Edit it to customize input path, output directories, and analysis options.");
    Ok(())
}

/// Handle --list: print the transform registry.
fn handle_list() {
    println!("Available transforms:\n");
    for transform in transforms::ALL {
        println!("   {:<42} {}", transform.name, transform.description);
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete pipeline: load, transform, write.
fn run_pipeline(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let input_path = config.input_path();

    // Step 1: Load the dataset
    println!("📥 Loading dataset: {}", input_path.display());
    let dataset = Dataset::load(&input_path).context("Failed to load dataset")?;
    info!("Loaded {} tracks", dataset.len());
    if dataset.is_empty() {
        warn!("Dataset has no records; tables will be empty");
    }

    // Step 2: Resolve the transform selection
    let options = AnalysisOptions::from(&config.analysis);
    let selected: Vec<&transforms::Transform> = match args.only {
        Some(ref names) => transforms::select(names)?,
        None => transforms::ALL.iter().collect(),
    };
    debug!(
        "Hit quantile: {}, features: {:?}",
        options.hit_quantile, options.features
    );

    // Handle --dry-run: compute row counts and exit without writing
    if args.dry_run {
        return handle_dry_run(&dataset, &options, &selected);
    }

    // Step 3: Run the transforms and write the tables
    let tables_dir = PathBuf::from(&config.output.tables_dir);
    let web_dir = PathBuf::from(&config.output.web_dir);
    let writer = TableWriter::new(tables_dir.clone(), web_dir.clone());

    println!("\n🔬 Running {} transforms...\n", selected.len());
    for transform in &selected {
        let table = (transform.run)(&dataset, &options);
        writer.write(transform.name, &table)?;
        println!("   📄 {} ({} rows)", transform.name, table.row_count());
    }

    let duration = start_time.elapsed().as_secs_f64();
    println!(
        "\n✅ Done in {:.1}s. Tables written to {} and {}",
        duration,
        tables_dir.display(),
        web_dir.display()
    );

    Ok(())
}

/// Handle --dry-run: compute each table, print row counts, write nothing.
fn handle_dry_run(
    dataset: &Dataset,
    options: &AnalysisOptions,
    selected: &[&transforms::Transform],
) -> Result<()> {
    println!("\n🔍 Dry run: computing tables (no files written)...\n");
    println!("   Dataset: {} tracks", dataset.len());

    for transform in selected {
        let table = (transform.run)(dataset, options);
        println!(
            "   📄 {} -> {} rows x {} columns",
            transform.name,
            table.row_count(),
            table.columns.len()
        );
    }

    println!("\n✅ Dry run complete. No files were written.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .trackstats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

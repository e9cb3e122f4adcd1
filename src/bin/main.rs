//! Cubesmith CLI - Generate semantic cubes from schema snapshots
//!
//! Usage:
//!   cubesmith generate <snapshot.json> [--config <file>] [--output <file>] [--role-descriptions] [--pretty]
//!   cubesmith classify <snapshot.json> [--config <file>]
//!   cubesmith check-config <file>
//!
//! Examples:
//!   cubesmith generate shop.json --pretty
//!   cubesmith generate shop.json --schema sales --output model.json
//!   RUST_LOG=debug cubesmith classify shop.json

use clap::{Parser, Subcommand};
use cubesmith::config::Settings;
use cubesmith::generate::{GenerationOutput, Generator};
use cubesmith::metadata::SnapshotSource;
use cubesmith::model::CubeDefinition;
use cubesmith::synthesis::RoleAwareDescriptions;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cubesmith")]
#[command(about = "Cubesmith - Generate semantic cube models from database metadata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate cubes and views from a schema snapshot
    Generate {
        /// Path to the JSON snapshot
        snapshot: PathBuf,

        /// Rule configuration (defaults to the usual search path)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Schema to generate for (defaults to the snapshot's schema)
        #[arg(short, long)]
        schema: Option<String>,

        /// Write the bundle here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sample rows to fetch per table for descriptions
        #[arg(long, default_value_t = 5)]
        samples: usize,

        /// Describe cubes and dimensions by table role and column name
        #[arg(long)]
        role_descriptions: bool,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the role of every table in a snapshot
    Classify {
        /// Path to the JSON snapshot
        snapshot: PathBuf,

        /// Rule configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Load and validate a configuration file
    CheckConfig {
        /// Path to the TOML file
        file: PathBuf,
    },
}

/// What `generate` writes: cubes without their classification metadata.
#[derive(Serialize)]
struct Bundle<'a> {
    domain: &'a str,
    cubes: Vec<&'a CubeDefinition>,
    views: &'a [cubesmith::ViewDefinition],
    stats: &'a cubesmith::generate::GenerationStats,
    cube_issues: &'a [cubesmith::generate::ValidationIssue],
    view_issues: &'a [cubesmith::generate::ValidationIssue],
    failures: &'a [cubesmith::generate::TableFailure],
}

impl<'a> From<&'a GenerationOutput> for Bundle<'a> {
    fn from(output: &'a GenerationOutput) -> Self {
        Self {
            domain: &output.domain,
            cubes: output.cube_definitions().collect(),
            views: &output.views,
            stats: &output.stats,
            cube_issues: &output.cube_issues,
            view_issues: &output.view_issues,
            failures: &output.failures,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr).compact())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            snapshot,
            config,
            schema,
            output,
            samples,
            role_descriptions,
            pretty,
        } => {
            cmd_generate(snapshot, config, schema, output, samples, role_descriptions, pretty).await
        }
        Commands::Classify { snapshot, config } => cmd_classify(snapshot, config),
        Commands::CheckConfig { file } => cmd_check_config(file),
    }
}

fn load_settings(config: Option<&Path>) -> Option<Settings> {
    let result = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };

    match result {
        Ok(settings) => Some(settings),
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            None
        }
    }
}

fn load_snapshot(path: &Path) -> Option<SnapshotSource> {
    match SnapshotSource::from_file(path) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading snapshot '{}': {}", path.display(), e);
            None
        }
    }
}

async fn cmd_generate(
    snapshot: PathBuf,
    config: Option<PathBuf>,
    schema: Option<String>,
    output: Option<PathBuf>,
    samples: usize,
    role_descriptions: bool,
    pretty: bool,
) -> ExitCode {
    let Some(settings) = load_settings(config.as_deref()) else {
        return ExitCode::FAILURE;
    };
    let Some(source) = load_snapshot(&snapshot) else {
        return ExitCode::FAILURE;
    };

    let generator = if role_descriptions {
        Generator::with_provider(&settings, Arc::new(RoleAwareDescriptions))
    } else {
        Generator::new(&settings)
    };
    let generator = match generator {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let schema = schema
        .or_else(|| source.default_schema().map(str::to_string))
        .unwrap_or_else(|| "public".to_string());

    let result = match generator.generate_from_source(&source, &schema, samples).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Generation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let bundle = Bundle::from(&result);
    let json = if pretty {
        serde_json::to_string_pretty(&bundle)
    } else {
        serde_json::to_string(&bundle)
    };
    let json = match json {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, json) {
                eprintln!("Error writing '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            eprintln!(
                "Wrote {} cubes and {} views to {}",
                result.stats.cubes,
                result.stats.views,
                path.display()
            );
        }
        None => println!("{}", json),
    }

    for issue in result.cube_issues.iter().chain(result.view_issues.iter()) {
        for error in &issue.errors {
            eprintln!("warning: {}: {}", issue.artifact, error);
        }
    }
    for failure in &result.failures {
        eprintln!("warning: skipped {}: {}", failure.table, failure.reason);
    }

    ExitCode::SUCCESS
}

fn cmd_classify(snapshot: PathBuf, config: Option<PathBuf>) -> ExitCode {
    let Some(settings) = load_settings(config.as_deref()) else {
        return ExitCode::FAILURE;
    };
    let Some(source) = load_snapshot(&snapshot) else {
        return ExitCode::FAILURE;
    };

    let classifier = cubesmith::inference::TableClassifier::new(settings.classification);
    for table in source.tables() {
        let result = classifier.explain(table);
        println!("{}\t{}\t{:?}", table.qualified_name(), result.role, result.reason);
    }

    ExitCode::SUCCESS
}

fn cmd_check_config(file: PathBuf) -> ExitCode {
    match Settings::from_file(&file) {
        Ok(settings) => {
            println!("OK: {} is valid", file.display());
            println!("  {} measure rules", settings.measures.rules.len());
            println!("  {} segment rules", settings.segments.rules.len());
            println!("  {} domain profiles", settings.domains.profiles.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            ExitCode::FAILURE
        }
    }
}

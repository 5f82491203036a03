//! vartable: design-token variable tables from host snapshots.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vartable::{
    cli,
    config::{self, AppConfig, CliOverrides, Validatable},
    pipeline::{exit_code_for, exit_codes},
    reports::ReportFormat,
    table::TableTheme,
};

#[derive(Parser)]
#[command(name = "vartable")]
#[command(version)]
#[command(about = "Build grouped tables of design-token variables", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    2  Unknown collection or mode, missing parameters, or nothing selected
    3  Error occurred

EXAMPLES:
    # List collections in an exported snapshot
    vartable collections variables.json

    # Groups of one collection
    vartable groups variables.json --collection VariableCollectionId:1:2

    # Markdown table of two groups in the light and dark modes
    vartable table variables.json --collection VariableCollectionId:1:2 \\
        --mode 1:0 --mode 1:1 --group color --group spacing -o markdown

    # Drive the plugin protocol over stdin/stdout
    vartable session variables.json < messages.jsonl")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `table` subcommand
#[derive(Parser)]
struct TableArgs {
    /// Variables snapshot exported from the host
    snapshot: PathBuf,

    /// Collection id
    #[arg(short, long)]
    collection: String,

    /// Mode id to include as a column (repeatable; all modes if omitted)
    #[arg(short, long = "mode", value_name = "MODE_ID")]
    modes: Vec<String>,

    /// Group to include: a name prefix or an individual variable name
    /// (repeatable; all groups if omitted)
    #[arg(short, long = "group", value_name = "GROUP")]
    groups: Vec<String>,

    /// Table title (defaults to the collection name)
    #[arg(long)]
    title: Option<String>,

    /// Colour theme
    #[arg(long, value_enum)]
    theme: Option<TableTheme>,

    /// Hide the dev-token column
    #[arg(long)]
    no_dev_token: bool,

    /// Hide colour swatches
    #[arg(long)]
    no_swatches: bool,

    /// Output format (auto: table on a terminal, summary otherwise)
    #[arg(short, long)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Maximum rows shown per group in text reports
    #[arg(long)]
    max_rows: Option<usize>,

    /// Also place the table on an in-memory canvas and write its nodes here
    #[arg(long, value_name = "PATH")]
    canvas_dump: Option<PathBuf>,
}

/// Arguments for the `session` subcommand
#[derive(Parser)]
struct SessionArgs {
    /// Variables snapshot exported from the host
    snapshot: PathBuf,

    /// Preferences file (defaults to the user config directory)
    #[arg(long, env = "VARTABLE_PREFERENCES")]
    preferences: Option<PathBuf>,

    /// Write the canvas nodes as JSON here when the session ends
    #[arg(long, value_name = "PATH")]
    canvas_dump: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the collections of a snapshot
    Collections {
        snapshot: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the groups of a collection
    Groups {
        snapshot: PathBuf,
        #[arg(short, long)]
        collection: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build a variables table and render it
    Table(TableArgs),

    /// Answer UI protocol messages read as JSON lines from stdin
    Session(SessionArgs),

    /// Show the effective configuration
    Config {
        /// Print the JSON Schema of the config file instead
        #[arg(long, conflicts_with = "example")]
        schema: bool,
        /// Print an example config file instead
        #[arg(long)]
        example: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) if code == exit_codes::SUCCESS => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(exit_code_for(&err));
        }
    }
}

/// Load the config file and apply `overrides`, refusing invalid settings.
fn effective_config(path: Option<&std::path::Path>, overrides: &CliOverrides) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_overrides(path, overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }
    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Collections { snapshot, json } => cli::run_collections(&snapshot, json),

        Commands::Groups {
            snapshot,
            collection,
            json,
        } => cli::run_groups(&snapshot, &collection, json),

        Commands::Table(args) => {
            let overrides = CliOverrides {
                theme: args.theme,
                show_dev_token: args.no_dev_token.then_some(false),
                show_swatches: args.no_swatches.then_some(false),
                format: args.output,
                file: args.output_file,
            };
            let app = effective_config(cli.config.as_deref(), &overrides)?;
            cli::run_table(cli::TableConfig {
                snapshot: args.snapshot,
                collection: args.collection,
                title: args.title,
                modes: args.modes,
                groups: args.groups,
                app,
                max_rows: args.max_rows,
                canvas_dump: args.canvas_dump,
                quiet: cli.quiet,
            })
        }

        Commands::Session(args) => {
            let app = effective_config(cli.config.as_deref(), &CliOverrides::default())?;
            cli::run_session(cli::SessionConfig {
                snapshot: args.snapshot,
                preferences: args.preferences,
                layout: app.layout,
                canvas_dump: args.canvas_dump,
                quiet: cli.quiet,
            })
        }

        Commands::Config { schema, example } => {
            if schema {
                println!("{}", config::generate_json_schema());
            } else if example {
                print!("{}", config::generate_example_config());
            } else {
                let (config, loaded_from) = config::load_or_default(cli.config.as_deref());
                match &loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "vartable", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}

mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, section::SectionSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mdt",
    about = "Markdown tickets: read and edit sections, resolve titles, move status",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .mdt-config.yaml or .git/)
    #[arg(long, global = true, env = "MDT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every section of a ticket with its line range
    Sections {
        /// Ticket key, e.g. MDT-012
        key: String,
    },

    /// Read or modify one section of a ticket
    Section {
        #[command(subcommand)]
        subcommand: SectionSubcommand,
    },

    /// Print a ticket's title
    Title { key: String },

    /// Print a ticket with its metadata header
    Show { key: String },

    /// Show a ticket's status, or move it to a new one
    Status {
        key: String,
        /// Target status, e.g. "In Progress" or in_progress
        status: Option<String>,
    },

    /// Show or validate the project configuration
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Sections { key } => cmd::sections::run(&root, &key, cli.json),
        Commands::Section { subcommand } => cmd::section::run(&root, subcommand, cli.json),
        Commands::Title { key } => cmd::title::run(&root, &key, cli.json),
        Commands::Show { key } => cmd::show::run(&root, &key, cli.json),
        Commands::Status { key, status } => {
            cmd::status::run(&root, &key, status.as_deref(), cli.json)
        }
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

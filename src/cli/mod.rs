//! Command-line interface for projectory
//!
//! One file per subcommand; this module owns argument parsing, logging
//! setup, and dispatch.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::utils::paths::Workspace;

mod add;
mod config;
mod delete;
mod hook;
mod ls;
mod meta;
mod new;
mod open;
mod project;
mod template;
mod utils;

/// Scaffold and manage local project directories
#[derive(Parser)]
#[command(name = "pj")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project, optionally from a template
    #[command(alias = "create")]
    New(new::NewArgs),

    /// List managed projects
    #[command(alias = "list")]
    Ls,

    /// Open a project in the configured IDE
    #[command(alias = "use")]
    Open(open::OpenArgs),

    /// Delete a project, or all of them with `delete all`
    #[command(alias = "rm")]
    Delete(delete::DeleteArgs),

    /// Copy a template or project into the current directory
    Add(add::AddArgs),

    /// Open the projects root in the configured IDE
    #[command(alias = "projects")]
    Project,

    /// Manage local templates
    #[command(alias = "templates")]
    Template(template::TemplateArgs),

    /// Open the config file in the configured IDE, creating it if needed
    Config,

    /// Open the hooks directory in the configured IDE
    #[command(alias = "hooks")]
    Hook,

    /// Open the metadata file in the configured IDE
    Meta,

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let workspace = Workspace::resolve()?;
    workspace.ensure_initialized()?;

    match cli.command {
        Commands::New(args) => new::run(&workspace, args),
        Commands::Ls => ls::run(&workspace),
        Commands::Open(args) => open::run(&workspace, args),
        Commands::Delete(args) => delete::run(&workspace, args),
        Commands::Add(args) => add::run(&workspace, args),
        Commands::Project => project::run(&workspace),
        Commands::Template(args) => template::run(&workspace, args),
        Commands::Config => config::run(&workspace),
        Commands::Hook => hook::run(&workspace),
        Commands::Meta => meta::run(&workspace),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pj", &mut std::io::stdout());
            Ok(())
        }
    }
}

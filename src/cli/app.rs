//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::output::Output;
use super::{press, repl};
use crate::command::Liszt;
use crate::domain::RowId;
use crate::storage::{Config, OutputFormat};

#[derive(Parser)]
#[command(name = "liszt")]
#[command(author, version, about = "Boards, lists and cards behind a textual command protocol")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true, env = "LISZT_DB")]
    pub db: Option<PathBuf>,

    /// Output format (defaults to the config file's `default_format`)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create (or open) the database and print its location
    Init,

    /// Run a single command, e.g. `liszt exec 'add-board "Work"'`
    Exec {
        /// Command text; multiple words are joined with spaces
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Read commands from stdin until `exit` (the default)
    Repl,

    /// Run a button's command against selected cards or a list
    Press {
        /// Button id
        button: RowId,

        /// Card to substitute for `$CARD` (repeatable)
        #[arg(long = "card")]
        cards: Vec<RowId>,

        /// List to substitute for `$LIST`
        #[arg(long)]
        list: Option<RowId>,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    let path = config.database_path(cli.db.as_deref())?;
    output.verbose_ctx("db", &format!("Opening database at: {}", path.display()));

    let mut liszt = Liszt::open(&path, config.seed_defaults)?;
    if liszt.store().is_fresh() {
        output.verbose_ctx("db", "Created new database");
    }

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Init => {
            output.success(&format!("Database ready at {}", path.display()));
        }

        Commands::Exec { command } => {
            let command = command.join(" ");
            output.verbose_ctx("exec", &command);
            let reply = liszt.execute(&command)?;
            output.reply(&reply);
        }

        Commands::Repl => repl::run(&mut liszt, &output, config.prompt)?,

        Commands::Press { button, cards, list } => {
            press::run(&mut liszt, &output, button, &cards, list)?
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "liszt=debug" } else { "liszt=warn" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

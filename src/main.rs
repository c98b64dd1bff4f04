//! notelog CLI - timestamped notes from the command line

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use notelog::{config, ui, Migrator, NotesRepository, SqliteStore, SystemClock};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "notelog")]
#[command(version)]
#[command(about = "Log timestamped notes to a local SQLite store")]
#[command(long_about = r#"
notelog keeps a running log of short notes, each stamped with the time it was
written, in a single SQLite file.

Example usage:
  notelog add-note -c "deployed the new build"
  notelog list-notes -s yesterday -e now
  notelog list-notes -s "2 hours ago" -e "in 1 hour" --table
  notelog delete-note -i 12
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (defaults to notes.sqlite next to the executable)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new note
    AddNote {
        /// The note contents to add
        #[arg(short, long)]
        content: Option<String>,
    },

    /// List the notes created within a time window
    ListNotes {
        /// Start of the time window (e.g. "yesterday", "3 hours ago", "2024-05-01")
        #[arg(short, long)]
        start: Option<String>,

        /// End of the time window
        #[arg(short, long)]
        end: Option<String>,

        /// Render the notes as a table
        #[arg(short, long)]
        table: bool,
    },

    /// Delete an existing note
    DeleteNote {
        /// The ID of the note to delete
        #[arg(short, long, default_value_t = 0)]
        id: i64,
    },

    /// Show version information
    Version,
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Human
    }
}

pub fn emit_success(command: &str, data: serde_json::Value) -> anyhow::Result<()> {
    let envelope = serde_json::json!({
        "ok": true,
        "command": command,
        "data": data,
    });
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

fn emit_failure(output_mode: OutputMode, err: &anyhow::Error) {
    if output_mode.is_human() {
        ui::error(&format!("{:#}", err));
        return;
    }

    let envelope = serde_json::json!({
        "ok": false,
        "error": format!("{:#}", err),
    });
    match serde_json::to_string_pretty(&envelope) {
        Ok(json) => println!("{}", json),
        Err(_) => ui::error(&format!("{:#}", err)),
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json { OutputMode::Json } else { OutputMode::Human };

    if let Err(err) = run(cli, output_mode) {
        tracing::debug!("command failed: {:?}", err);
        emit_failure(output_mode, &err);
        std::process::exit(1);
    }
}

fn run(cli: Cli, output_mode: OutputMode) -> anyhow::Result<()> {
    let Cli { database, config, command, .. } = cli;

    match command {
        Commands::Version => commands::run_version(output_mode),

        Commands::AddNote { content } => {
            let content = commands::require_content(content)?;
            let path = locate_database(database, config.as_deref())?;
            with_notes(&path, |notes| {
                commands::run_add(notes, &content, output_mode).map(|_| ())
            })
        }

        Commands::ListNotes { start, end, table } => {
            let (start, end) = commands::parse_window(start, end, chrono::Local::now())?;
            let path = locate_database(database, config.as_deref())?;
            with_notes(&path, |notes| {
                commands::run_list(notes, start, end, table, output_mode).map(|_| ())
            })
        }

        Commands::DeleteNote { id } => {
            let id = commands::require_id(id)?;
            let path = locate_database(database, config.as_deref())?;
            with_notes(&path, |notes| commands::run_delete(notes, id, output_mode))
        }
    }
}

fn locate_database(flag: Option<PathBuf>, config_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let config = config::load_config(config_path)?;
    let path = config::resolve_database_path(flag, config.as_ref())?;
    config::ensure_db_dir(&path)?;
    Ok(path)
}

/// Open the store, bring its schema up to date, run one operation, close.
fn with_notes<T>(
    path: &Path,
    operation: impl FnOnce(&NotesRepository<'_, SqliteStore, SystemClock>) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    tracing::debug!("Opening note store at {}", path.display());
    let store = SqliteStore::open(path)?;

    let report = Migrator::new(&store).apply()?;
    if report.is_noop() {
        tracing::debug!("Schema is current at version {}", report.to);
    } else {
        tracing::info!("Current DB version: {}, required DB version: {}", report.from, report.to);
        for name in &report.applied {
            tracing::info!("Applied migration '{}'", name);
        }
    }

    let result = operation(&NotesRepository::new(&store, SystemClock));
    let closed = store.close();

    let value = result?;
    closed?;
    Ok(value)
}

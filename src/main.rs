use clap::{Parser, Subcommand};
use eyre::{Context, Result};
use std::path::PathBuf;
use tasklist::render::{render_counts, render_tasks};
use tasklist::{Action, Config, FileStore, TaskId, TaskSession};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "TaskList CLI - a single-user task list persisted to local storage")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: <config dir>/tasklist/config.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the persisted task list
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    /// Storage key the task list is saved under
    #[arg(short, long)]
    key: Option<String>,

    /// Name shown in the list header
    #[arg(short, long)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show all tasks (default)
    List,

    /// Add a task; blank titles are ignored
    Add {
        /// Task title
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Flip a task between done and not done
    Toggle {
        #[arg(allow_negative_numbers = true)]
        id: TaskId,
    },

    /// Remove a task
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: TaskId,
    },

    /// Apply a raw action, e.g. '{"type":"Toggle_Task","payload":1}'
    Dispatch {
        action: String,
    },

    /// Show total and completed counts
    Stats,
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(store_path) = cli.store_path {
        config.store_path = store_path;
    }
    if let Some(key) = cli.key {
        config.key = key;
    }
    if let Some(user) = cli.user {
        config.user.name = user;
    }

    // Open store
    let store = FileStore::open(&config.store_path)?;
    let mut session = TaskSession::open(store, config.key.clone());

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => {}
        Commands::Add { title } => {
            session.add(&title.join(" "));
        }
        Commands::Toggle { id } => session.toggle(id),
        Commands::Delete { id } => session.delete(id),
        Commands::Dispatch { action } => {
            let action: Action = serde_json::from_str(&action).context("Invalid action JSON")?;
            session.dispatch(action);
        }
        Commands::Stats => {
            print!("{}", render_counts(session.tasks()));
            return Ok(());
        }
    }

    print!("{}", render_tasks(&config.user, session.tasks()));

    Ok(())
}

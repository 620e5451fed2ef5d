//! `tidy` command-line interface.
//!
//! Each invocation opens the stored list, applies one command, prints the
//! result and waits for the write to land before exiting.
//!
//! ```bash
//! tidy add "Read chapter 4" --category school --date 2024-10-05 --time 14:30
//! tidy toggle 0
//! tidy list --all
//! tidy chart --by-category
//! ```

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tidy::schedule::parse_date;
use tidy::view::{render_chart, render_task, render_tasks};
use tidy::{
    Category, FileKeyValueStore, NewTask, ScheduledTime, TaskId, TodoConfig, TodoEnvironment,
    TodoStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about = "A small to-do list", long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// Directory holding the stored list (overrides TIDY_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage key of the list (overrides TIDY_STORAGE_KEY)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Add a task
    Add(AddArgs),
    /// Mark a task completed, or open again
    Toggle {
        /// Task id
        id: u64,
    },
    /// Delete a task
    Delete {
        /// Task id
        id: u64,
    },
    /// List tasks
    List {
        /// Include completed (hidden) tasks
        #[arg(long)]
        all: bool,
    },
    /// Show completed and total counts
    Summary,
    /// Show chart data
    Chart {
        /// Break tasks down by category instead of completion
        #[arg(long)]
        by_category: bool,
    },
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Task text
    text: String,

    /// school, work or leisure
    #[arg(long, default_value_t = Category::School)]
    category: Category,

    /// Scheduled date, YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Scheduled time, HH:MM
    #[arg(long)]
    time: Option<ScheduledTime>,
}

impl AddArgs {
    fn into_draft(self) -> NewTask {
        NewTask {
            text: self.text,
            category: self.category,
            date: self.date,
            time: self.time,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = TodoConfig::from_env();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(key) = cli.key {
        config.storage_key = key;
    }

    init_tracing(&config.log_filter);
    tracing::debug!(data_dir = %config.data_dir.display(), key = %config.storage_key, "Opening task list");

    let storage = Arc::new(FileKeyValueStore::new(config.data_dir.clone()));
    let store = TodoStore::open(TodoEnvironment::new(storage, config.storage_key.clone()))
        .await
        .context("failed to open task list")?;

    run(&store, cli.command).await?;

    store
        .shutdown(config.shutdown_timeout())
        .await
        .context("pending writes did not finish")?;
    Ok(())
}

async fn run(store: &TodoStore, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Add(args) => {
            let draft = args.into_draft();
            if draft.is_blank() {
                anyhow::bail!("task text must not be blank");
            }
            store.add(draft).await?;
            if let Some(task) = store.tasks().await.last() {
                println!("{}", render_task(task));
            }
        },
        Command::Toggle { id } => {
            let id = TaskId::new(id);
            if store.task(id).await.is_none() {
                anyhow::bail!("no task with id {id}");
            }
            store.toggle_complete(id).await?;
            let task = store.task(id).await.with_context(|| format!("no task with id {id}"))?;
            println!("{}", render_task(&task));
        },
        Command::Delete { id } => {
            let id = TaskId::new(id);
            let task = store.task(id).await.with_context(|| format!("no task with id {id}"))?;
            store.delete(id).await?;
            println!("Deleted: {}", render_task(&task));
        },
        Command::List { all } => {
            store.set_show_hidden(all).await?;
            println!("{}", render_tasks(&store.visible_tasks().await));
        },
        Command::Summary => {
            println!("{}", store.summary().await);
        },
        Command::Chart { by_category } => {
            let segments = if by_category {
                store.category_chart().await
            } else {
                store.completion_chart().await
            };
            print!("{}", render_chart(&segments));
        },
    }
    Ok(())
}

/// Install a stderr `fmt` subscriber filtered by `filter`
fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tidy=info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

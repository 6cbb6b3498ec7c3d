mod render;
mod watch;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use duetick_core::{
    parse_due_minutes, Celebrate, ConfirmPrompt, FileSlot, Notifier, StorageSlot, TaskRow,
    TaskStore,
};

use render::{print_task_table, ConfettiBurst, ConsoleNotifier, ConsolePrompt};

#[derive(Parser)]
#[command(name = "duetick")]
#[command(about = "A to-do list with live due-time countdowns", long_about = None)]
struct Cli {
    /// Directory holding the task slot (defaults to ~/.duetick)
    #[arg(long, value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "info" or "duetick_core=debug"
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task with a due time (e.g. `add "Write report" --due 30m`)
    Add {
        /// Task label
        text: String,
        /// Time until due: bare minutes, or with an m/h suffix
        #[arg(long, value_name = "DURATION")]
        due: String,
    },
    /// List tasks with their remaining time and completion progress
    List,
    /// Mark a task done (by id or first label match)
    Done {
        task: String,
    },
    /// Delete a task (by id or first label match)
    Rm {
        task: String,
    },
    /// Delete every task
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Run the live countdown view with the hourly reminder
    Watch,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let slot = FileSlot::new(cli.data_dir)?;
    let notifier = ConsoleNotifier;

    match cli.command {
        Commands::Add { text, due } => {
            let due_minutes = match parse_due_minutes(&due) {
                Ok(minutes) => minutes,
                Err(_) => {
                    notifier.notify("Please enter a valid number of minutes for the due time.");
                    return Ok(());
                }
            };
            let mut store = TaskStore::load(slot);
            match store.add_task(&text, due_minutes, None) {
                Ok(task) => {
                    println!(
                        "Task added: {} (due in {} min, ID: {})",
                        task.text, task.due_in_minutes, task.id
                    );
                }
                Err(err) => notifier.notify(&err.to_string()),
            }
        }
        Commands::List => {
            let store = TaskStore::load(slot);
            let now = Utc::now();
            let rows: Vec<TaskRow> = store
                .tasks()
                .iter()
                .map(|task| TaskRow::from_entity(task, now))
                .collect();
            print_task_table(&rows);
            let (done, total) = store.progress();
            println!("Progress: {done} / {total}");
        }
        Commands::Done { task } => {
            let mut store = TaskStore::load(slot);
            let Some(id) = resolve_task(&store, &task) else {
                println!("No task matches \"{task}\".");
                return Ok(());
            };
            match store.mark_done(id)? {
                Some(done) => {
                    println!("Done: {}", done.text);
                    ConfettiBurst.celebrate();
                }
                None => println!("Already done: nothing to do."),
            }
        }
        Commands::Rm { task } => {
            let mut store = TaskStore::load(slot);
            let Some(id) = resolve_task(&store, &task) else {
                println!("No task matches \"{task}\".");
                return Ok(());
            };
            match store.remove(id)? {
                Some(removed) => println!("Deleted: {}", removed.text),
                None => println!("No task matches \"{task}\"."),
            }
        }
        Commands::Clear { yes } => {
            let mut store = TaskStore::load(slot);
            if store.tasks().is_empty() {
                println!("Nothing to clear.");
                return Ok(());
            }
            if !yes && !ConsolePrompt.confirm("Are you sure you want to clear all tasks?") {
                println!("Aborted.");
                return Ok(());
            }
            store.clear_all()?;
            println!("All tasks cleared.");
        }
        Commands::Watch => {
            watch::run(slot).await?;
        }
    }

    Ok(())
}

/// Resolves a user-supplied task reference: a UUID when it parses as one and
/// matches, otherwise the first task with that exact label.
fn resolve_task<S: StorageSlot>(store: &TaskStore<S>, needle: &str) -> Option<Uuid> {
    if let Ok(id) = Uuid::parse_str(needle) {
        if store.get(id).is_some() {
            return Some(id);
        }
    }
    store.find_by_text(needle).map(|task| task.id)
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

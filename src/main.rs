use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};

use crate::{
    models::{store::TaskStore, task::Category},
    services::tasks::{
        AddTaskParameters, UpdateTaskParameters, add_task, delete_task, load_tasks, toggle_task,
        update_task,
    },
    storage::{STORE_KEY, json::JsonFileStorage},
    views::Filter,
};

mod models;
mod services;
mod storage;
mod ui;
mod views;

#[derive(Parser)]
#[command(name = "chores", about = "A small task list for your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List tasks, optionally narrowed to one category
    List {
        /// Only show tasks in this category
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Add a new task
    Add {
        /// Task text
        text: String,

        /// Category label (defaults to Personal)
        #[arg(short, long)]
        category: Option<Category>,

        /// Due date (YYYY-MM-DD)
        #[arg(short, long)]
        due: Option<String>,

        /// Due time (HH:MM, 24-hour)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Toggle a task between done and pending
    Done {
        /// Task id
        id: u64,
    },

    /// Replace a task's text and due date/time
    Edit {
        /// Task id
        id: u64,

        /// New task text
        text: String,

        /// New due date (YYYY-MM-DD); omit to clear
        #[arg(short, long)]
        due: Option<String>,

        /// New due time (HH:MM, 24-hour); omit to clear
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Delete a task permanently
    Delete {
        /// Task id
        id: u64,
    },
}

fn main() {
    let cli = Cli::parse();

    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("chores");

    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("Error: Failed to create data directory: {}", e);
        std::process::exit(1);
    }

    let _logger = init_logging(&data_dir);

    let storage = JsonFileStorage::for_key(&data_dir, STORE_KEY);

    // Load once, before any mutation is dispatched.
    let mut store = match load_tasks(&storage) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: Failed to load tasks: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Add {
            text,
            category,
            due,
            time,
        }) => {
            let params = AddTaskParameters {
                text,
                category,
                due_date: due,
                due_time: time,
            };

            match add_task(&mut store, &storage, params) {
                Ok(Some(task)) => {
                    println!("✓ Task added: {}", task.text);
                    println!("  #{} · {}", task.id, task.category);
                }
                Ok(None) => {
                    println!("Nothing added: task text is empty");
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Done { id }) => match toggle_task(&mut store, &storage, id) {
            Ok(Some(task)) if task.completed => println!("✓ Task done: {}", task.text),
            Ok(Some(task)) => println!("○ Task reopened: {}", task.text),
            Ok(None) => {
                eprintln!("Error: Task #{} not found", id);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to save tasks: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Edit {
            id,
            text,
            due,
            time,
        }) => {
            let params = UpdateTaskParameters {
                id,
                text,
                due_date: due,
                due_time: time,
            };

            match update_task(&mut store, &storage, params) {
                Ok(Some(task)) => println!("✓ Task updated: {}", task.text),
                Ok(None) => println!("No change: task #{} not found or new text is empty", id),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Delete { id }) => match delete_task(&mut store, &storage, id) {
            Ok(true) => println!("✓ Task #{} deleted", id),
            Ok(false) => println!("No change: task #{} not found", id),
            Err(e) => {
                eprintln!("Error: Failed to save tasks: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::List { category }) => render_list(&store, category),
        None => render_list(&store, None),
    }
}

fn render_list(store: &TaskStore, category: Option<Category>) {
    let tasks = store.tasks();
    let selector = match category {
        Some(category) => Filter::Category(category),
        None => Filter::All,
    };

    let selected = views::filter(tasks, &selector);

    if selected.is_empty() {
        match &selector {
            Filter::All => println!("No tasks yet"),
            Filter::Category(category) => println!("No tasks in category '{}'", category),
        }
        return;
    }

    let title = match &selector {
        Filter::All => String::from("All"),
        Filter::Category(category) => category.to_string(),
    };

    ui::render_view_header(&title, selected.len());

    if selector == Filter::All {
        ui::render_category_counts(tasks);
    }

    for task in &selected {
        ui::render_task_line(task);
    }

    ui::render_summary(tasks);
}

fn init_logging(data_dir: &Path) -> Option<LoggerHandle> {
    let log_dir = data_dir.join("logs");

    let handle = Logger::try_with_env_or_str("info").and_then(|logger| {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("chores"))
            .rotate(
                Criterion::Size(1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(3),
            )
            .append()
            .start()
    });

    match handle {
        Ok(handle) => Some(handle),
        Err(e) => {
            // A broken log setup should not keep the task list from working.
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    }
}

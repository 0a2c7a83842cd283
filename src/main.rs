use std::path::PathBuf;

use clap::{Parser, Subcommand};
use todo_store::commands::task::AddArgs;
use todo_store::model::{DEFAULT_FOLDER, Priority, TaskDate, TaskPatch};
use todo_store::output::Format;
use todo_store::store::paths::StoragePaths;

#[derive(Parser)]
#[command(name = "todo", version, about = "Folder-organized to-do lists stored as JSON")]
struct Cli {
    /// Data directory (defaults to ~/.todo)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "json")]
    format: Format,
    /// Shorthand for --format pretty
    #[arg(long, global = true, hide = true)]
    pretty: bool,
    /// Log store activity to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and mark first-run setup as done
    Init,
    /// List tasks grouped by folder
    List {
        /// Only this folder
        #[arg(long, short)]
        folder: Option<String>,
    },
    /// Create a new task
    Add {
        /// Task name, unique within its folder
        name: String,
        /// Folder to add the task to
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
        /// Task priority
        #[arg(long, short, value_enum, default_value = "normal")]
        priority: Priority,
        /// Due date as Y-M-D
        #[arg(long, short)]
        date: Option<TaskDate>,
        /// Create the task already completed
        #[arg(long)]
        done: bool,
    },
    /// Flip a task between open and done
    Toggle {
        name: String,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
    },
    /// Save a copy of a task under a new name
    Rename {
        name: String,
        new_name: String,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
    },
    /// Change a task's name, date or priority in one write
    Edit {
        name: String,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
        /// Replace the name, dropping the old entry
        #[arg(long)]
        new_name: Option<String>,
        /// New due date as Y-M-D
        #[arg(long, short)]
        date: Option<TaskDate>,
        /// New priority
        #[arg(long, short, value_enum)]
        priority: Option<Priority>,
    },
    /// Set or clear a task's due date
    Date {
        name: String,
        /// Y-M-D; omit to clear
        date: Option<TaskDate>,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
    },
    /// Move a task to another folder
    Move {
        name: String,
        /// Target folder, created if missing
        target: String,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
    },
    /// Delete tasks by name
    Rm {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long, short, default_value = DEFAULT_FOLDER)]
        folder: String,
    },
    /// Move completed tasks into history
    Clean {
        /// Only this folder
        #[arg(long, short)]
        folder: Option<String>,
    },
    /// Delete every task and folder
    Reset,
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Show names of cleaned tasks
    History {
        /// Only this folder
        #[arg(long, short)]
        folder: Option<String>,
    },
    /// Show or change application flags
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum FolderAction {
    /// Create an empty folder
    Add { name: String },
    /// Rename a folder, keeping its tasks
    Rename { old_name: String, new_name: String },
    /// List folder names
    List,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print every flag
    Show,
    /// Set a flag
    Set {
        /// first_time, auto_clean or notifications
        key: String,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
}

fn run(cli: Cli, format: Format) -> todo_store::error::Result<()> {
    use todo_store::commands::{clean, config, folder, history, init, list, task};

    let paths = match cli.data_dir {
        Some(dir) => StoragePaths::at(dir),
        None => StoragePaths::resolve()?,
    };

    match cli.command {
        Commands::Init => init::run(paths),
        Commands::List { folder } => list::run(paths, folder, format),
        Commands::Add {
            name,
            folder,
            priority,
            date,
            done,
        } => task::add(
            paths,
            AddArgs {
                name,
                folder,
                priority,
                date,
                done,
            },
            format,
        ),
        Commands::Toggle { name, folder } => task::toggle(paths, &folder, &name, format),
        Commands::Rename {
            name,
            new_name,
            folder,
        } => task::rename(paths, &folder, &name, new_name, format),
        Commands::Edit {
            name,
            folder,
            new_name,
            date,
            priority,
        } => task::edit(
            paths,
            &folder,
            &name,
            TaskPatch {
                name: new_name,
                date,
                priority,
            },
            format,
        ),
        Commands::Date { name, date, folder } => task::date(paths, &folder, &name, date, format),
        Commands::Move {
            name,
            target,
            folder,
        } => task::move_to(paths, &folder, &name, target, format),
        Commands::Rm { names, folder } => task::remove(paths, &folder, &names, format),
        Commands::Clean { folder } => clean::run(paths, folder, format),
        Commands::Reset => clean::reset(paths, format),
        Commands::Folder { action } => match action {
            FolderAction::Add { name } => folder::add(paths, &name, format),
            FolderAction::Rename { old_name, new_name } => {
                folder::rename(paths, &old_name, &new_name, format)
            }
            FolderAction::List => folder::list(paths, format),
        },
        Commands::History { folder } => history::run(paths, folder, format),
        Commands::Config { action } => match action {
            ConfigAction::Show => config::show(paths, format),
            ConfigAction::Set { key, value } => config::set(paths, &key, value, format),
        },
    }
}

fn main() {
    let cli = Cli::parse();
    todo_store::logging::init_logging(cli.verbose);
    let format = if cli.pretty {
        Format::Pretty
    } else {
        cli.format
    };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

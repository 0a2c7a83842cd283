use crate::error::Result;
use crate::model::{ConfigFlags, History, Priority, Snapshot, Task};
use clap::ValueEnum;
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
}

/// One-line rendering used by the pretty format.
pub fn task_line(task: &Task) -> String {
    let check = if task.achieved() {
        "[x]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    let name = if task.achieved() {
        task.name().dimmed().to_string()
    } else {
        task.name().to_string()
    };
    let mut line = format!("{check} {name}");
    match task.priority() {
        Priority::Normal => {}
        Priority::Urgent => line.push_str(&format!(" {}", "!".yellow())),
        Priority::VeryUrgent => line.push_str(&format!(" {}", "!!".red().bold())),
    }
    if task.date().is_set() {
        line.push_str(&format!(" ({})", task.date()));
    }
    line
}

pub fn print_task(task: &Task, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(task)?),
        Format::Pretty => println!("{}: {}", task.folder().bold(), task_line(task)),
    }
    Ok(())
}

pub fn print_snapshot(snapshot: &Snapshot, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(snapshot)?),
        Format::Pretty => {
            for folder in snapshot.values() {
                println!("{} ({})", folder.name.bold(), folder.tasks.len());
                for task in folder.tasks.values() {
                    println!("  {}", task_line(task));
                }
            }
        }
    }
    Ok(())
}

pub fn print_folders(names: &[String], format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(names)?),
        Format::Pretty => {
            for name in names {
                println!("{name}");
            }
        }
    }
    Ok(())
}

/// Report tasks removed by a bulk operation, e.g. `verb = "cleaned"`.
pub fn print_removed(verb: &str, removed: &[(String, String)], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let entries: Vec<serde_json::Value> = removed
                .iter()
                .map(|(folder, name)| serde_json::json!({"folder": folder, "name": name}))
                .collect();
            println!("{}", serde_json::json!({ verb: entries }));
        }
        Format::Pretty => {
            if removed.is_empty() {
                println!("nothing {verb}");
            }
            for (folder, name) in removed {
                println!("{} {}: {}", verb.green(), folder.bold(), name);
            }
        }
    }
    Ok(())
}

pub fn print_history(history: &History, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(history)?),
        Format::Pretty => {
            for (folder, names) in history {
                println!("{} ({})", folder.bold(), names.len());
                for name in names {
                    println!("  {name}");
                }
            }
        }
    }
    Ok(())
}

pub fn print_config(flags: &ConfigFlags, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(flags)?),
        Format::Pretty => {
            for key in ConfigFlags::KEYS {
                println!("{key} = {}", flags.get(key)?);
            }
        }
    }
    Ok(())
}

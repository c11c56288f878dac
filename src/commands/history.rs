use crate::cli::HistoryCommand;
use crate::error::Result;
use crate::storage::{HistoryFolder, PromptStore};
use colored::Colorize;
use prettytable::{format, Table};

/// Handle history commands
pub async fn handle_history(store: &PromptStore, command: HistoryCommand) -> Result<()> {
    match command {
        HistoryCommand::Tree => {
            let tree = store.list_history_tree().await?;

            if tree.is_empty() {
                println!("{}", "No history found.".yellow());
                return Ok(());
            }

            println!("\nHistory:");
            history_table(&tree).printstd();
            println!();
            println!(
                "Use {} to view a snapshot.",
                "promptkeep history show <FOLDER> <FILENAME>".cyan()
            );
            println!();
        }
        HistoryCommand::Show { folder, filename } => {
            let snapshot = store.read_history_entry(&folder, &filename).await?;
            print!("{}", snapshot.content);
        }
        HistoryCommand::Restore { folder, filename } => {
            let receipt = store.restore_history_entry(&folder, &filename).await?;
            println!(
                "{}",
                format!("Restored {} from {}", receipt.filename, filename).green()
            );
            println!("Snapshot: {}", receipt.history_file.cyan());
        }
    }

    Ok(())
}

/// Build the table printed by `history tree`
///
/// One row per snapshot; the folder name is only printed on its first row.
pub fn history_table(tree: &[HistoryFolder]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Folder".bold(),
        "Snapshot".bold(),
        "Size".bold(),
        "Created".bold()
    ]);

    for folder in tree {
        if folder.files.is_empty() {
            table.add_row(prettytable::row![folder.folder.cyan(), "-", "-", "-"]);
            continue;
        }
        for (idx, file) in folder.files.iter().enumerate() {
            let label = if idx == 0 {
                folder.folder.cyan().to_string()
            } else {
                String::new()
            };
            table.add_row(prettytable::row![
                label,
                file.filename,
                r -> file.size,
                file.created_at.format("%Y-%m-%d %H:%M:%S")
            ]);
        }
    }

    table
}

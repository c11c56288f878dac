//! Prompt commands: list, show, save

use crate::error::Result;
use anyhow::Context;
use crate::storage::{PromptStore, PromptSummary};
use colored::Colorize;
use prettytable::{format, Table};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Where `save` takes its content from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Literal text from the command line
    Inline(String),
    /// Contents of a local file
    File(std::path::PathBuf),
    /// Everything on standard input
    Stdin,
}

impl ContentSource {
    /// Pick the source from the `save` flags
    pub fn from_args(content: Option<String>, file: Option<std::path::PathBuf>) -> Self {
        match (content, file) {
            (Some(text), _) => ContentSource::Inline(text),
            (None, Some(path)) => ContentSource::File(path),
            (None, None) => ContentSource::Stdin,
        }
    }

    async fn read(self) -> Result<String> {
        match self {
            ContentSource::Inline(text) => Ok(text),
            ContentSource::File(path) => read_local_file(&path).await,
            ContentSource::Stdin => {
                let mut buf = String::new();
                tokio::io::stdin().read_to_string(&mut buf).await?;
                Ok(buf)
            }
        }
    }
}

async fn read_local_file(path: &Path) -> Result<String> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read content file {}", path.display()))?;
    Ok(text)
}

/// Build the table printed by `list`
pub fn prompts_table(prompts: &[PromptSummary]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "Filename".bold(),
        "Size".bold(),
        "Modified".bold()
    ]);

    for prompt in prompts {
        table.add_row(prettytable::row![
            prompt.filename.cyan(),
            r -> prompt.size,
            prompt.modified_at.format("%Y-%m-%d %H:%M:%S")
        ]);
    }

    table
}

/// Print every prompt in the collection
pub async fn list(store: &PromptStore) -> Result<()> {
    let prompts = store.list_prompts().await?;

    if prompts.is_empty() {
        println!(
            "{}",
            format!("No prompts found in {}", store.prompts_dir().display()).yellow()
        );
        return Ok(());
    }

    println!("\nPrompts:");
    prompts_table(&prompts).printstd();
    println!();
    Ok(())
}

/// Print the current content of a prompt
pub async fn show(store: &PromptStore, filename: &str) -> Result<()> {
    let doc = store.read_prompt(filename).await?;
    print!("{}", doc.content);
    Ok(())
}

/// Save a prompt from the given source and report the snapshot name
pub async fn save(store: &PromptStore, filename: &str, source: ContentSource) -> Result<()> {
    let content = source.read().await?;
    let receipt = store.write_prompt(filename, Some(content.as_str())).await?;

    println!(
        "{}",
        format!("Saved {} ({} bytes)", receipt.filename, content.len()).green()
    );
    println!("Snapshot: {}", receipt.history_file.cyan());
    Ok(())
}

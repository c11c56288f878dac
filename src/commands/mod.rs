/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

- `prompts`: list, show, and save prompt files
- `history`: browse, show, and restore snapshots

The `serve` command is handled by [`crate::server::serve`].
*/

use crate::config::StorageConfig;
use crate::error::Result;
use crate::storage::PromptStore;

pub mod history;
pub mod prompts;

/// Open the on-disk store described by `config`
///
/// Both root directories are created if missing.
pub async fn open_store(config: &StorageConfig) -> Result<PromptStore> {
    let store = PromptStore::open_on_disk(config).await?;
    Ok(store)
}

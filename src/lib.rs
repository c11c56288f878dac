//! Promptkeep - prompt file editing with automatic snapshot history
//!
//! This library provides a versioned store for text prompt files. Every save
//! overwrites the current file and writes an immutable timestamped snapshot
//! into a per-file history folder. The store is exposed over a REST API and
//! through the command line.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `storage`: The versioned prompt store and its filesystem abstraction
//! - `server`: axum router and handlers for the REST API
//! - `commands`: CLI command handlers
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use promptkeep::config::StorageConfig;
//! use promptkeep::storage::PromptStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = PromptStore::open_on_disk(&StorageConfig::default()).await?;
//!     let receipt = store.write_prompt("greeting.txt", Some("Hello")).await?;
//!     println!("snapshot: {}", receipt.history_file);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, StorageConfig};
pub use error::{ErrorKind, PromptKeepError, Result, StoreResult};
pub use storage::PromptStore;

#[cfg(test)]
pub mod test_utils;

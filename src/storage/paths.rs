//! Name validation for prompt, folder, and snapshot names
//!
//! Every name the store receives is joined onto one of its root directories,
//! so it must be a single plain path segment. Anything that could address a
//! different directory is rejected before any I/O happens.

use std::path::{Component, Path};

use crate::error::{PromptKeepError, StoreResult};

/// Ensure `name` is a single, non-empty path segment
///
/// # Arguments
///
/// * `label` - What the name refers to (used in the error message)
/// * `name` - The candidate name
///
/// # Errors
///
/// Returns `PromptKeepError::Validation` if the name is empty, contains a
/// path separator or NUL byte, or is `.`/`..`.
///
/// # Examples
///
/// ```
/// use promptkeep::storage::paths::validate_name;
///
/// assert!(validate_name("filename", "greeting.txt").is_ok());
/// assert!(validate_name("filename", "../etc/passwd").is_err());
/// ```
pub fn validate_name(label: &str, name: &str) -> StoreResult<()> {
    if name.is_empty() {
        return Err(PromptKeepError::Validation(format!(
            "{} cannot be empty",
            label
        )));
    }

    if name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(PromptKeepError::Validation(format!(
            "{} must not contain path separators: {}",
            label, name
        )));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(PromptKeepError::Validation(format!(
            "{} must be a plain file name: {}",
            label, name
        ))),
    }
}

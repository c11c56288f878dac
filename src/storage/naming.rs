//! Snapshot naming rules
//!
//! A snapshot of `notes.md` saved at 2024-01-01T10:00:00Z is stored as
//! `notes-2024-01-01-10-00-00.md` inside the history folder `notes.md/`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in snapshot file names (UTC, second resolution)
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

const TIMESTAMP_LEN: usize = "YYYY-MM-DD-HH-MM-SS".len();

/// What to do when a snapshot name is already taken in its history folder
///
/// Two saves of the same prompt within one wall-clock second produce the same
/// snapshot name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Replace the earlier snapshot for that second (a warning is logged)
    #[default]
    Overwrite,
    /// Keep both by appending `-1`, `-2`, ... before the extension
    Suffix,
}

impl std::str::FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "suffix" => Ok(CollisionPolicy::Suffix),
            other => Err(format!(
                "Invalid collision policy: {}. Must be one of: overwrite, suffix",
                other
            )),
        }
    }
}

/// Format a save time as `YYYY-MM-DD-HH-MM-SS`
pub fn snapshot_timestamp(at: DateTime<Utc>) -> String {
    at.format(SNAPSHOT_TIMESTAMP_FORMAT).to_string()
}

/// Split a file name at its last `.` into `(basename, ext)`
///
/// `ext` keeps its leading dot. A name without a dot, or whose only dot is
/// the leading character (`.env`), has an empty extension.
pub fn split_extension(filename: &str) -> (&str, &str) {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => filename.split_at(idx),
        _ => (filename, ""),
    }
}

/// Build the snapshot file name for `filename` saved at `at`
pub fn snapshot_filename(filename: &str, at: DateTime<Utc>) -> String {
    let (basename, ext) = split_extension(filename);
    format!("{}-{}{}", basename, snapshot_timestamp(at), ext)
}

/// Build the `n`th disambiguated variant of a snapshot file name
///
/// `with_suffix("a-2024-01-01-10-00-00.md", 2)` gives
/// `a-2024-01-01-10-00-00-2.md`.
pub fn with_suffix(snapshot: &str, n: u32) -> String {
    let (basename, ext) = split_extension(snapshot);
    format!("{}-{}{}", basename, n, ext)
}

/// Recover the save time and collision suffix from a snapshot of `prompt`
///
/// `a-2024-01-01-10-00-00-2.md` in folder `a.md` gives
/// `Some(("2024-01-01-10-00-00", 2))`; an unsuffixed snapshot has suffix 0.
/// Names that do not follow the snapshot layout give `None`.
pub fn parse_snapshot_name<'a>(prompt: &str, snapshot: &'a str) -> Option<(&'a str, u32)> {
    let (basename, ext) = split_extension(prompt);
    let stamp = snapshot
        .strip_prefix(basename)?
        .strip_prefix('-')?
        .strip_suffix(ext)?;

    let timestamp = stamp.get(..TIMESTAMP_LEN)?;
    NaiveDateTime::parse_from_str(timestamp, SNAPSHOT_TIMESTAMP_FORMAT).ok()?;

    let rest = &stamp[TIMESTAMP_LEN..];
    let suffix = if rest.is_empty() {
        0
    } else {
        rest.strip_prefix('-')?.parse().ok()?
    };
    Some((timestamp, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_snapshot_timestamp_layout() {
        assert_eq!(
            snapshot_timestamp(at(2024, 1, 1, 10, 0, 0)),
            "2024-01-01-10-00-00"
        );
    }

    #[test]
    fn test_snapshot_timestamp_drops_subseconds() {
        let with_millis = at(2024, 12, 31, 23, 59, 58) + chrono::Duration::milliseconds(999);
        assert_eq!(snapshot_timestamp(with_millis), "2024-12-31-23-59-58");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("greeting.txt"), ("greeting", ".txt"));
        assert_eq!(split_extension("archive.tar.md"), ("archive.tar", ".md"));
        assert_eq!(split_extension("README"), ("README", ""));
        assert_eq!(split_extension(".env"), (".env", ""));
    }

    #[test]
    fn test_snapshot_filename() {
        assert_eq!(
            snapshot_filename("greeting.txt", at(2024, 1, 1, 10, 0, 0)),
            "greeting-2024-01-01-10-00-00.txt"
        );
        assert_eq!(
            snapshot_filename("Makefile", at(2023, 6, 7, 8, 9, 10)),
            "Makefile-2023-06-07-08-09-10"
        );
    }

    #[test]
    fn test_with_suffix() {
        assert_eq!(
            with_suffix("a-2024-01-01-10-00-00.md", 2),
            "a-2024-01-01-10-00-00-2.md"
        );
        assert_eq!(
            with_suffix("Makefile-2024-01-01-10-00-00", 1),
            "Makefile-2024-01-01-10-00-00-1"
        );
    }

    #[test]
    fn test_parse_snapshot_name() {
        assert_eq!(
            parse_snapshot_name("a.md", "a-2024-01-01-10-00-00.md"),
            Some(("2024-01-01-10-00-00", 0))
        );
        assert_eq!(
            parse_snapshot_name("a.md", "a-2024-01-01-10-00-00-12.md"),
            Some(("2024-01-01-10-00-00", 12))
        );
        assert_eq!(
            parse_snapshot_name("Makefile", "Makefile-2023-06-07-08-09-10-3"),
            Some(("2023-06-07-08-09-10", 3))
        );
        assert_eq!(parse_snapshot_name("a.md", "notes.md"), None);
        assert_eq!(
            parse_snapshot_name("a.md", "a-2024-13-01-10-00-00.md"),
            None
        );
        assert_eq!(
            parse_snapshot_name("a.md", "a-2024-01-01-10-00-00-x.md"),
            None
        );
    }

    #[test]
    fn test_parsed_suffix_orders_numerically() {
        let nine = parse_snapshot_name("a.md", "a-2024-01-01-10-00-00-9.md");
        let ten = parse_snapshot_name("a.md", "a-2024-01-01-10-00-00-10.md");
        let plain = parse_snapshot_name("a.md", "a-2024-01-01-10-00-00.md");

        assert!(ten > nine);
        assert!(nine > plain);
    }

    #[test]
    fn test_collision_policy_from_str() {
        assert_eq!(
            "Suffix".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Suffix
        );
        assert_eq!(
            "overwrite".parse::<CollisionPolicy>().unwrap(),
            CollisionPolicy::Overwrite
        );
        assert!("merge".parse::<CollisionPolicy>().is_err());
    }

    #[test]
    fn test_collision_policy_default_is_overwrite() {
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Overwrite);
    }
}

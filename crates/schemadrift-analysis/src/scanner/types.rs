//! Scanner types: scanned files, read failures, scan statistics.

use std::path::{Path, PathBuf};
use std::time::Duration;

use schemadrift_core::errors::{ErrorCode, ScanError};
use serde::{Deserialize, Serialize};

/// A scanned text file with its content split into lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute (or root-joined) path on disk.
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub relative: String,
    /// Raw file content.
    pub content: String,
    /// Content lines; `lines[0]` is line 1.
    pub lines: Vec<String>,
}

impl SourceFile {
    pub fn new(path: PathBuf, relative: String, content: String) -> Self {
        let lines = content.lines().map(str::to_string).collect();
        Self {
            path,
            relative,
            content,
            lines,
        }
    }

    /// Line by 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// Lower-cased file name, used by the filename association rule.
    pub fn file_name_lower(&self) -> String {
        Path::new(&self.relative)
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.relative)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// A file skipped during scanning. Recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFailure {
    pub path: String,
    pub code: String,
    pub message: String,
}

impl ReadFailure {
    pub fn from_error(relative: String, error: &ScanError) -> Self {
        Self {
            path: relative,
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Aggregate statistics for a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub total_bytes: u64,
    pub dirs_pruned: usize,
    pub files_filtered: usize,
    pub files_failed: usize,
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Result of one scan: readable files sorted by relative path, plus failures.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
    pub failures: Vec<ReadFailure>,
    pub stats: ScanStats,
}

impl ScanOutput {
    pub fn find(&self, relative: &str) -> Option<&SourceFile> {
        self.files.iter().find(|f| f.relative == relative)
    }
}

// Duration serialized as whole milliseconds
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

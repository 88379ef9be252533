//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Per-file failures during a scan. These never abort a scan; the walker
/// records them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error scanning {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("File is not valid UTF-8: {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("File too large: {path} ({size} bytes, max {max})")]
    MaxFileSizeExceeded { path: PathBuf, size: u64, max: u64 },
}

impl ScanError {
    /// Classify an IO error for `path`, promoting permission failures.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::PermissionDenied { path }
            | Self::InvalidEncoding { path }
            | Self::MaxFileSizeExceeded { path, .. } => path,
        }
    }
}

impl ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::FILE_READ_ERROR,
            Self::PermissionDenied { .. } => error_code::PERMISSION_DENIED,
            Self::InvalidEncoding { .. } => error_code::INVALID_ENCODING,
            Self::MaxFileSizeExceeded { .. } => error_code::FILE_TOO_LARGE,
        }
    }
}

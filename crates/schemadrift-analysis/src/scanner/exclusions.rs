//! Directory exclusion patterns, applied before descending.
//!
//! Entries are gitignore-style lines, so plain names (`node_modules`) match
//! at any depth and globs (`*.generated`) work too.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

/// Compiled exclusion matcher for one scan root.
pub struct ExclusionPatterns {
    gitignore: Gitignore,
    skip_hidden: bool,
}

impl ExclusionPatterns {
    pub fn new(root: &Path, patterns: &[String], skip_hidden: bool) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            if let Err(e) = builder.add_line(None, pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid exclusion pattern");
            }
        }
        let gitignore = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "exclusion patterns failed to compile, excluding nothing");
            Gitignore::empty()
        });
        Self {
            gitignore,
            skip_hidden,
        }
    }

    /// True when the directory at `relative` must not be descended into.
    pub fn is_excluded_dir(&self, relative: &Path) -> bool {
        if self.skip_hidden && is_hidden(relative) {
            return true;
        }
        self.gitignore.matched(relative, true).is_ignore()
    }
}

fn is_hidden(relative: &Path) -> bool {
    relative
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n != "." && n != "..")
}

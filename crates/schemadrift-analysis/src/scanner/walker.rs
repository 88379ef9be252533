//! File walker with exclusion pruning and parallel reads.
//!
//! The walk itself is single-threaded: excluded directories are pruned
//! before `read_dir` is ever called on them, which is the main latency
//! control on trees with dependency caches. Reading and line-splitting run
//! on rayon afterwards, and the output is sorted so thread scheduling never
//! leaks into results.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use rayon::prelude::*;
use schemadrift_core::config::ScanConfig;
use schemadrift_core::errors::ScanError;
use schemadrift_core::types::collections::FxHashSet;

use super::exclusions::ExclusionPatterns;
use super::types::{ReadFailure, ScanOutput, ScanStats, SourceFile};

/// Recursive text scanner over one or more roots.
pub struct Scanner {
    include_extensions: FxHashSet<String>,
    exclude_dirs: Vec<String>,
    skip_hidden: bool,
    max_file_size: u64,
    threads: usize,
}

#[derive(Default)]
struct WalkState {
    files: Vec<PathBuf>,
    failures: Vec<ReadFailure>,
    dirs_pruned: usize,
    files_filtered: usize,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self::with_extensions(config, config.effective_include_extensions())
    }

    /// Same exclusion rules as `config`, different extension allow-list.
    pub fn with_extensions(config: &ScanConfig, extensions: Vec<String>) -> Self {
        Self {
            include_extensions: extensions.into_iter().collect(),
            exclude_dirs: config.effective_exclude_dirs(),
            skip_hidden: config.effective_skip_hidden(),
            max_file_size: config.effective_max_file_size(),
            threads: config.effective_threads(),
        }
    }

    /// Scan everything under `root`.
    pub fn scan(&self, root: &Path) -> ScanOutput {
        self.scan_roots(root, &[root.to_path_buf()], &[])
    }

    /// Scan several `roots`, reporting paths relative to `base`. `extra_files`
    /// are read even if they sit outside the roots or fail the extension
    /// filter. A file reachable twice is read once.
    pub fn scan_roots(&self, base: &Path, roots: &[PathBuf], extra_files: &[PathBuf]) -> ScanOutput {
        let start = Instant::now();
        let exclusions = ExclusionPatterns::new(base, &self.exclude_dirs, self.skip_hidden);

        let mut state = WalkState::default();
        for root in roots {
            if root.is_dir() {
                self.walk_dir(base, root, &exclusions, &mut state);
            } else {
                tracing::debug!(root = %root.display(), "scan root missing, skipping");
            }
        }
        for extra in extra_files {
            if extra.is_file() {
                state.files.push(extra.clone());
            }
        }

        let mut seen = FxHashSet::default();
        let paths: Vec<(PathBuf, String)> = state
            .files
            .into_iter()
            .map(|p| {
                let rel = relative_path(base, &p);
                (p, rel)
            })
            .filter(|(_, rel)| seen.insert(rel.clone()))
            .collect();

        let failures = Mutex::new(state.failures);
        let read = || -> Vec<SourceFile> {
            paths
                .par_iter()
                .filter_map(|(path, rel)| match self.read_file(path, rel) {
                    Ok(file) => Some(file),
                    Err(e) => {
                        tracing::warn!(path = %rel, error = %e, "skipping unreadable file");
                        if let Ok(mut f) = failures.lock() {
                            f.push(ReadFailure::from_error(rel.clone(), &e));
                        }
                        None
                    }
                })
                .collect()
        };
        let mut files = self.run_in_pool(read);
        files.sort_by(|a, b| a.relative.cmp(&b.relative));

        let mut failures = failures.into_inner().unwrap_or_default();
        failures.sort_by(|a, b| a.path.cmp(&b.path));

        let stats = ScanStats {
            files_scanned: files.len(),
            total_bytes: files.iter().map(|f| f.content.len() as u64).sum(),
            dirs_pruned: state.dirs_pruned,
            files_filtered: state.files_filtered,
            files_failed: failures.len(),
            duration: start.elapsed(),
        };
        tracing::info!(
            base = %base.display(),
            files = stats.files_scanned,
            failures = stats.files_failed,
            pruned = stats.dirs_pruned,
            duration_ms = stats.duration.as_millis() as u64,
            "scan complete"
        );

        ScanOutput {
            root: base.to_path_buf(),
            files,
            failures,
            stats,
        }
    }

    fn run_in_pool<T: Send>(&self, job: impl FnOnce() -> T + Send) -> T {
        if self.threads == 0 {
            return job();
        }
        match rayon::ThreadPoolBuilder::new().num_threads(self.threads).build() {
            Ok(pool) => pool.install(job),
            Err(e) => {
                tracing::warn!(error = %e, "could not build scan thread pool, using global pool");
                job()
            }
        }
    }

    fn walk_dir(&self, base: &Path, dir: &Path, exclusions: &ExclusionPatterns, state: &mut WalkState) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                let rel = relative_path(base, dir);
                let err = ScanError::from_io(dir.to_path_buf(), e);
                tracing::warn!(path = %rel, error = %err, "cannot list directory");
                state.failures.push(ReadFailure::from_error(rel, &err));
                return;
            }
        };

        let mut entries: Vec<_> = entries.flatten().collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let relative = path.strip_prefix(base).unwrap_or(&path);

            if file_type.is_dir() {
                if exclusions.is_excluded_dir(relative) {
                    state.dirs_pruned += 1;
                } else {
                    self.walk_dir(base, &path, exclusions, state);
                }
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                if self.accepts(&path) {
                    state.files.push(path);
                } else {
                    state.files_filtered += 1;
                }
            }
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if self.skip_hidden && hidden {
            return false;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.include_extensions.contains(&e.to_ascii_lowercase()))
    }

    fn read_file(&self, path: &Path, relative: &str) -> Result<SourceFile, ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
        if metadata.len() > self.max_file_size {
            return Err(ScanError::MaxFileSizeExceeded {
                path: path.to_path_buf(),
                size: metadata.len(),
                max: self.max_file_size,
            });
        }
        let bytes = fs::read(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
        let mut content = String::from_utf8(bytes).map_err(|_| ScanError::InvalidEncoding {
            path: path.to_path_buf(),
        })?;
        if content.starts_with('\u{feff}') {
            content.remove(0);
        }
        Ok(SourceFile::new(path.to_path_buf(), relative.to_string(), content))
    }
}

/// `/`-separated path of `path` relative to `base`, or the full path when outside it.
pub fn relative_path(base: &Path, path: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => path.display().to_string(),
    }
}

//! Discovery of `.ts` catalogs below the translations root.

use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

/// Result of scanning for catalog files.
pub struct ScanResult {
    /// Catalog files found, sorted by path.
    pub files: Vec<String>,
    /// Directory entries that could not be read.
    pub skipped_count: usize,
}

/// `ignores` entries from the config, split into literal paths (relative
/// to the scan root) and glob patterns.
struct IgnoreSet {
    paths: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, patterns: &[String], verbose: bool) -> Self {
        let mut set = IgnoreSet {
            paths: Vec::new(),
            globs: Vec::new(),
        };
        for raw in patterns {
            if !raw.contains(['*', '?', '[']) {
                set.paths.push(base_dir.join(raw));
                continue;
            }
            match Pattern::new(raw) {
                Ok(pattern) => set.globs.push(pattern),
                Err(e) if verbose => eprintln!(
                    "{} Invalid ignore pattern '{}': {}",
                    "warning:".bold().yellow(),
                    raw,
                    e
                ),
                Err(_) => {}
            }
        }
        set
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.paths.iter().any(|ignored| path.starts_with(ignored))
            || self.globs.iter().any(|glob| glob.matches_path(path))
    }
}

/// Find every `*.ts` catalog under `base_dir`. Ignored directories are not
/// descended into.
pub fn scan_catalog_files(base_dir: &Path, ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, ignore_patterns, verbose);
    let mut files = Vec::new();
    let mut skipped_count = 0;

    let walker = WalkDir::new(base_dir)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !ignores.is_ignored(entry.path()));

    for entry in walker {
        match entry {
            Ok(entry) if is_catalog_entry(&entry) => {
                files.push(entry.path().to_string_lossy().into_owned());
            }
            Ok(_) => {}
            Err(e) => {
                skipped_count += 1;
                tracing::debug!(error = %e, "cannot access path");
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
            }
        }
    }

    files.sort();
    ScanResult {
        files,
        skipped_count,
    }
}

fn is_catalog_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && is_catalog_file(entry.path())
}

fn is_catalog_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("ts")
}

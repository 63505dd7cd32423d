use std::{
    cell::OnceCell,
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        file_scanner::scan_catalog_files,
        parsers::ts::{CatalogFile, parse_ts_file},
    },
    issues::ParseErrorIssue,
};

/// Parsed catalogs plus the files that failed to parse.
struct ParsedCatalogs {
    catalogs: Vec<CatalogFile>,
    errors: Vec<ParseErrorIssue>,
}

/// Catalog files selected for a command, parsed on first use.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (e.g. `--translations-root`)
/// 2. `.tscatrc.json`
/// 3. Built-in defaults
pub struct CheckContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Catalog files to process, sorted.
    pub files: Vec<String>,

    /// Source texts exempt from the untranslated rule.
    pub ignore_texts: HashSet<String>,

    pub verbose: bool,

    parsed: OnceCell<ParsedCatalogs>,
}

impl CheckContext {
    /// Build the context from CLI arguments.
    ///
    /// Explicit `files` are used as given. Otherwise every `*.ts` under the
    /// translations root is selected, minus the `ignores` patterns.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or, without explicit
    /// files, the translations root does not exist.
    pub fn new(common_args: &CommonArgs, files: &[PathBuf]) -> Result<Self> {
        let verbose = common_args.verbose;

        let loaded = load_config(Path::new("."))?;
        if verbose && !loaded.from_file() {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = loaded.config;
        if let Some(ref root) = common_args.translations_root {
            config.translations_root = root.to_string_lossy().to_string();
        }

        let files = if files.is_empty() {
            let root = Path::new(&config.translations_root);
            if !root.is_dir() {
                bail!(
                    "Translations directory not found: {} (set 'translationsRoot' in {} or pass files)",
                    root.display(),
                    CONFIG_FILE_NAME
                );
            }
            let scan = scan_catalog_files(root, &config.ignores, verbose);
            if scan.skipped_count > 0 {
                tracing::warn!(skipped = scan.skipped_count, "some paths could not be read");
            }
            scan.files
        } else {
            let mut files: Vec<String> = files
                .iter()
                .map(|f| f.to_string_lossy().to_string())
                .collect();
            files.sort();
            files.dedup();
            files
        };

        tracing::debug!(count = files.len(), "selected catalog files");

        let ignore_texts = config.ignore_texts.iter().cloned().collect();

        Ok(Self {
            config,
            files,
            ignore_texts,
            verbose,
            parsed: OnceCell::new(),
        })
    }

    fn parsed(&self) -> &ParsedCatalogs {
        self.parsed.get_or_init(|| {
            let results: Vec<Result<CatalogFile, ParseErrorIssue>> =
                self.files.par_iter().map(|path| parse_file(path)).collect();

            let mut catalogs = Vec::new();
            let mut errors = Vec::new();
            for result in results {
                match result {
                    Ok(catalog) => catalogs.push(catalog),
                    Err(error) => errors.push(error),
                }
            }
            ParsedCatalogs { catalogs, errors }
        })
    }

    /// Catalogs that parsed successfully, in file order.
    pub fn catalogs(&self) -> &[CatalogFile] {
        &self.parsed().catalogs
    }

    /// Files that could not be read or parsed.
    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        &self.parsed().errors
    }
}

fn parse_file(path: &str) -> Result<CatalogFile, ParseErrorIssue> {
    parse_ts_file(Path::new(path)).map_err(|err| {
        // Skip the "Failed to parse ..." wrapper; the report already shows the path.
        let error = err
            .chain()
            .nth(1)
            .map_or_else(|| err.to_string(), |cause| cause.to_string());
        tracing::debug!(path, %error, "failed to parse catalog");
        ParseErrorIssue {
            file_path: path.to_string(),
            error,
        }
    })
}

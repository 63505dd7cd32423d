//! `.tscatrc.json` project configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tscatrc.json";

/// Project settings; every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory scanned for `*.ts` catalogs.
    pub translations_root: String,
    /// Glob patterns (or literal paths below the root) of catalogs to skip.
    pub ignores: Vec<String>,
    /// Source strings that may legitimately stay untranslated ("OK", brand names).
    pub ignore_texts: Vec<String>,
    /// Language of the source strings, for catalogs that do not declare one.
    pub source_language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translations_root: "./translations".to_string(),
            ignores: Vec::new(),
            ignore_texts: Vec::new(),
            source_language: "en".to_string(),
        }
    }
}

impl Config {
    /// Reject empty settings and malformed `ignores` globs.
    pub fn validate(&self) -> Result<()> {
        if self.translations_root.trim().is_empty() {
            bail!("'translationsRoot' must not be empty");
        }
        if self.source_language.trim().is_empty() {
            bail!("'sourceLanguage' must not be empty");
        }
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }
        Ok(())
    }

    /// Pretty JSON written by `tscat init`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to generate default config.")
    }
}

/// Walk up from `start_dir` to the nearest config file, stopping at the
/// repository root (a directory holding `.git`).
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            break;
        }
    }
    None
}

/// Configuration plus the file it came from, if any.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: Option<PathBuf>,
}

impl LoadedConfig {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<LoadedConfig> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(LoadedConfig {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {:?}", path))?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}

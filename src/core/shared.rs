use std::{
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use super::{CatalogError, data::Catalog, parsers::ts::load_file};

/// A catalog handle that can be swapped while readers hold snapshots.
///
/// Readers call [`SharedCatalog::snapshot`] and keep using that `Arc` for as
/// long as they like. Reloads parse the new catalog fully before taking the
/// lock, so readers never see a partially loaded catalog.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    current: RwLock<Arc<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// The catalog currently published.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Publish `catalog`, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(catalog))
    }

    /// Load `path` and publish it. On failure the current catalog stays.
    pub fn reload_from(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        match load_file(path) {
            Ok(catalog) => {
                self.replace(catalog);
                tracing::debug!(path = %path.display(), "reloaded catalog");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "catalog reload failed");
                Err(err)
            }
        }
    }

    /// Owned lookup against the current snapshot.
    pub fn lookup(
        &self,
        context: &str,
        source: &str,
        disambiguation: Option<&str>,
        count: Option<i64>,
    ) -> String {
        self.snapshot()
            .lookup(context, source, disambiguation, count)
            .to_string()
    }
}

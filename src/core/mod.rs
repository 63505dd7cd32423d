//! Catalog engine.
//!
//! - `data`: contexts, messages and the catalog (lookup, merge, stats)
//! - `plural`: plural rules per language
//! - `parsers`: `.ts` reader
//! - `writer`: `.ts` writer
//! - `shared`: hot-reloadable catalog handle
//! - `context`: file discovery and parsing for the checker

pub mod context;
pub mod data;
mod error;
pub mod file_scanner;
pub mod parsers;
mod plural;
mod shared;
pub mod writer;

pub use context::CheckContext;
pub use data::*;
pub use error::{CatalogError, MalformedCatalog};
pub use parsers::ts::{CatalogFile, load, load_file, parse_ts, parse_ts_file};
pub use plural::{PluralCategory, PluralRule};
pub use shared::SharedCatalog;
pub use writer::{TsWriter, serialize};

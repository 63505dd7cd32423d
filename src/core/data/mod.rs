//! Catalog data model.
//!
//! - `message`: messages, translations, finalization states and locations
//! - `catalog`: contexts and the catalog itself (lookup, merge, stats)

mod catalog;
mod message;

pub use catalog::*;
pub use message::*;

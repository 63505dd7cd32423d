//! Catalog file parsers.
//!
//! - `ts`: Qt Linguist `.ts` XML reader

pub mod ts;

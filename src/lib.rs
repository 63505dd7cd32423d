//! tscat - Qt Linguist translation catalogs
//!
//! tscat is a library and CLI for `.ts` translation catalogs: load them,
//! look up translations (with disambiguation and plural forms), merge
//! catalogs, write them back in Qt's layout, and check them for common
//! translation mistakes.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog model, `.ts` reader and writer, shared catalog handle
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checker rules over parsed catalogs
//! - `utils`: Shared text helpers
//!
//! ## Example
//!
//! ```
//! let catalog = tscat::core::load(
//!     r#"<TS language="fr"><context><name>Menu</name>
//!     <message><source>&amp;File</source><translation>&amp;Fichier</translation></message>
//!     </context></TS>"#,
//! )
//! .unwrap();
//!
//! assert_eq!(catalog.lookup("Menu", "&File", None, None), "&Fichier");
//! assert_eq!(catalog.lookup("Menu", "&Edit", None, None), "&Edit");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;

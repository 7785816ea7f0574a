//! Autotranslate - rewrite hardcoded UI strings into translation calls
//!
//! Autotranslate reads the report of a hardcoded-string linter, looks each
//! reported string up in the primary locale's messages, and rewrites the
//! source in place to call the translation function (`{t("key")}`), adding
//! the hook import and binding where a file lacks them.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, output, exit status)
//! - `config`: Configuration file loading and parsing
//! - `core`: Rewrite engine (index, report parsing, rewriting, scope augmentation)

pub mod cli;
pub mod config;
pub mod core;

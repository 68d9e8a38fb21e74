//! Keyword search over registered projects, delegated to ripgrep.
//!
//! Pipeline: [`executor::search`] walks the scope one root at a time, the
//! [`engine`] runs `rg --json` per root, the [`parser`] rebuilds match records
//! from the event stream, and [`format`] renders them grouped by project.

pub mod engine;
mod error;
pub mod executor;
pub mod format;
mod models;
pub mod parser;

pub use engine::{RipgrepEngine, SearchEngine};
pub use error::SearchError;
pub use executor::search;
pub use format::format_grouped;
pub use models::{
    DEFAULT_CONTEXT_LINES, DEFAULT_MAX_RESULTS, SearchMatch, SearchOptions, SearchReport,
};

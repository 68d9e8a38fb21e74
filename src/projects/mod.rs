//! Project registry - named local directories that searches run against.

mod error;
mod models;
mod store;

pub use error::StoreError;
pub use models::{Project, ScopeEntry};
pub use store::ProjectStore;

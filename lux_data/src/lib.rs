//! Shared data model for LuxQuest dialogue content.

pub mod defs;
pub mod store;
pub mod validate;

pub use defs::*;
pub use store::{LineDraft, ProjectStore};
pub use validate::{ValidationError, validate_project};

//! Error handling for deadwood

pub mod types;

pub use types::{DeadwoodError, ErrorSeverity, Result};

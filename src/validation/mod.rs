//! Validation functionality
//!
//! Provides validation logic for:
//! - Join graphs (column existence, duplicate and self joins, disconnected tables)
//! - Display names (global uniqueness)

pub mod joins;

pub use joins::{JoinIssue, JoinValidationResult, JoinValidator, check_display_names};

//! CLI command implementations

pub mod infer;

pub use infer::{InferArgs, OverrideMode, handle_infer};

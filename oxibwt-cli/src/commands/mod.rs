//! Command implementations for OxiBWT CLI.

pub mod completions;
pub mod stage;

pub use completions::cmd_completions;
pub use stage::{StageOptions, cmd_stage};

//! CLI command implementations

pub mod amazon;
pub mod check;
pub mod completions;
pub mod config;
pub mod import;
pub mod template;

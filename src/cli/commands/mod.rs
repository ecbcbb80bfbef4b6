//! CLI command handlers for `dopingplot`.
//!
//! Each command is implemented in its own submodule.

pub mod config;
pub mod render;

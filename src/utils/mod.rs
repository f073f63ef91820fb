//! Shared helpers

pub mod git_version;
pub mod paths;
pub mod terminal;

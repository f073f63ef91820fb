//! Build targets
//!
//! - `target` - OS/architecture pairs and their child environments

pub mod target;

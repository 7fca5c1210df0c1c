//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod fit;
pub mod generate;
pub mod render;
pub mod surface;

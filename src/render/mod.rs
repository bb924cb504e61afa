//! Rendering of the executable script artifact.

pub mod header;

pub use header::{assemble_script, write_script};

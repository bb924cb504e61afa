//! Settings resolution and script generation for batch-job modules.
//!
//! A module declares its params, inputs and outputs in spec.json; this crate
//! binds them from CLI tokens and the parameter document, prepares the remote
//! working directory and renders the script handed to the SQL client.

pub mod config;
pub mod error;
pub mod remote;
pub mod render;
pub mod runtime;
pub mod settings;
pub mod spec;

pub use error::{ModuleError, ModuleResult};

//! Execution backends.
//!
//! A runtime turns resolved settings plus a user script into a generated
//! artifact and hands it to its client.

pub mod client;
pub mod emr;
pub mod hive;

pub use client::{ClientConfig, ExitPolicy};
pub use emr::EmrRuntime;
pub use hive::{HiveRuntime, ModuleLayout};

use crate::error::ModuleResult;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Hive,
    Emr,
}

pub trait Runtime {
    fn backend(&self) -> Backend;

    /// Prepare the remote side and write the artifact; returns its path.
    fn generate_script(&self, body: &Path, target: Option<&Path>) -> ModuleResult<PathBuf>;

    /// Generate the artifact and submit it.
    fn execute(&self, body: &Path, target: Option<&Path>) -> ModuleResult<PathBuf>;
}

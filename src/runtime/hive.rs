//! Hive runtime: reset the working directory, upload `files/` and `jars/`,
//! bind outputs, render the header and submit through beeline.

use crate::error::{ModuleError, ModuleResult};
use crate::remote::{Namespace, RemoteFs, reset_working_dir, upload_dir};
use crate::render::{assemble_script, write_script};
use crate::runtime::{Backend, ClientConfig, ExitPolicy, Runtime};
use crate::settings::{ExecutionSettings, Settings};

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Local directories uploaded alongside the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleLayout {
    pub files_dir: PathBuf,
    pub jars_dir: PathBuf,
}

impl Default for ModuleLayout {
    fn default() -> Self {
        Self {
            files_dir: PathBuf::from("files"),
            jars_dir: PathBuf::from("jars"),
        }
    }
}

pub struct HiveRuntime<'a, F: RemoteFs> {
    settings: &'a Settings,
    fs: F,
    layout: ModuleLayout,
    client_program: String,
    policy: ExitPolicy,
}

impl<'a, F: RemoteFs> HiveRuntime<'a, F> {
    pub fn new(
        settings: &'a Settings,
        fs: F,
        layout: ModuleLayout,
        client_program: impl Into<String>,
        policy: ExitPolicy,
    ) -> Self {
        Self {
            settings,
            fs,
            layout,
            client_program: client_program.into(),
            policy,
        }
    }
}

impl<F: RemoteFs> Runtime for HiveRuntime<'_, F> {
    fn backend(&self) -> Backend {
        Backend::Hive
    }

    fn generate_script(&self, body: &Path, target: Option<&Path>) -> ModuleResult<PathBuf> {
        let namespace = Namespace::derive(self.settings)?;
        info!(module = %self.settings.name, namespace = %namespace.name, "generating script");

        // Local reads first: nothing remote or on disk changes until they pass.
        let body = fs::read(body).map_err(|source| ModuleError::Script {
            path: body.to_path_buf(),
            source,
        })?;
        let exec = ExecutionSettings::prepare(self.settings, namespace)?;

        reset_working_dir(&self.fs, &exec.namespace)?;
        let files = upload_dir(&self.fs, &exec.namespace, &self.layout.files_dir)?;
        let jars = upload_dir(&self.fs, &exec.namespace, &self.layout.jars_dir)?;

        exec.write_outputs()?;
        let artifact = assemble_script(&files, &jars, &exec, &body);
        write_script(&artifact, target)
    }

    fn execute(&self, body: &Path, target: Option<&Path>) -> ModuleResult<PathBuf> {
        let client = ClientConfig::from_settings(self.settings, &self.client_program, self.policy)?;
        let script = self.generate_script(body, target)?;
        client.submit(&script)?;
        Ok(script)
    }
}

//! In-memory `RemoteFs` that records every call.

use crate::error::{ModuleError, ModuleResult};
use crate::remote::RemoteFs;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Default)]
pub struct RecordingFs {
    ops: RefCell<Vec<String>>,
    files: RefCell<BTreeSet<String>>,
    fail_prefix: RefCell<Option<String>>,
}

impl RecordingFs {
    pub fn seed(&self, path: &str) {
        self.files.borrow_mut().insert(path.to_string());
    }

    /// Make the first op starting with `prefix` fail.
    pub fn fail_on(&self, prefix: &str) {
        *self.fail_prefix.borrow_mut() = Some(prefix.to_string());
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }

    pub fn stored(&self) -> Vec<String> {
        self.files.borrow().iter().cloned().collect()
    }

    fn record(&self, op: String) -> ModuleResult<()> {
        let failing = self
            .fail_prefix
            .borrow()
            .as_ref()
            .is_some_and(|p| op.starts_with(p.as_str()));
        self.ops.borrow_mut().push(op.clone());
        if failing {
            return Err(ModuleError::RemoteOperation {
                command: op,
                status: Some(1),
            });
        }
        Ok(())
    }
}

impl RemoteFs for RecordingFs {
    fn remove_recursive(&self, path: &str) -> ModuleResult<()> {
        self.record(format!("rm {}", path))?;
        let prefix = format!("{}/", path);
        self.files
            .borrow_mut()
            .retain(|f| f != path && !f.starts_with(&prefix));
        Ok(())
    }

    fn mkdir_all(&self, path: &str) -> ModuleResult<()> {
        self.record(format!("mkdir {}", path))
    }

    fn put(&self, local: &Path, remote: &str) -> ModuleResult<()> {
        let name = local
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(format!("put {} {}", name, remote))?;
        self.files.borrow_mut().insert(remote.to_string());
        Ok(())
    }

    fn list(&self, path: &str) -> ModuleResult<Vec<String>> {
        self.record(format!("ls {}", path))?;
        let prefix = format!("{}/", path);
        Ok(self
            .files
            .borrow()
            .iter()
            .filter(|f| f.starts_with(&prefix))
            .cloned()
            .collect())
    }
}

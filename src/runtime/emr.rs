use crate::error::{ModuleError, ModuleResult};
use crate::runtime::{Backend, Runtime};

use std::path::{Path, PathBuf};

/// Placeholder for the EMR backend; every operation reports `NotImplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmrRuntime;

impl Runtime for EmrRuntime {
    fn backend(&self) -> Backend {
        Backend::Emr
    }

    fn generate_script(&self, _body: &Path, _target: Option<&Path>) -> ModuleResult<PathBuf> {
        Err(ModuleError::NotImplemented("emr"))
    }

    fn execute(&self, _body: &Path, _target: Option<&Path>) -> ModuleResult<PathBuf> {
        Err(ModuleError::NotImplemented("emr"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_not_implemented() {
        let rt = EmrRuntime;
        assert_eq!(rt.backend(), Backend::Emr);
        assert!(matches!(
            rt.execute(Path::new("main.hql"), None),
            Err(ModuleError::NotImplemented("emr"))
        ));
    }
}

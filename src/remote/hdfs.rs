//! Distributed filesystem access.
//!
//! Every operation is a blocking call to the `hadoop fs` client. The trait is
//! the seam the uploader works against.

use crate::error::{ModuleError, ModuleResult};

use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

pub trait RemoteFs {
    /// Recursively delete `path`. A missing path is not an error.
    fn remove_recursive(&self, path: &str) -> ModuleResult<()>;

    fn mkdir_all(&self, path: &str) -> ModuleResult<()>;

    fn put(&self, local: &Path, remote: &str) -> ModuleResult<()>;

    /// Entries directly under `path`.
    fn list(&self, path: &str) -> ModuleResult<Vec<String>>;
}

impl<T: RemoteFs + ?Sized> RemoteFs for &T {
    fn remove_recursive(&self, path: &str) -> ModuleResult<()> {
        (**self).remove_recursive(path)
    }

    fn mkdir_all(&self, path: &str) -> ModuleResult<()> {
        (**self).mkdir_all(path)
    }

    fn put(&self, local: &Path, remote: &str) -> ModuleResult<()> {
        (**self).put(local, remote)
    }

    fn list(&self, path: &str) -> ModuleResult<Vec<String>> {
        (**self).list(path)
    }
}

#[derive(Debug, Clone)]
pub struct HadoopCli {
    program: String,
}

impl HadoopCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, args: &[&str]) -> (Command, String) {
        let mut cmd = Command::new(&self.program);
        cmd.arg("fs").args(args);
        let line = format!("{} fs {}", self.program, args.join(" "));
        (cmd, line)
    }

    fn run(&self, args: &[&str]) -> ModuleResult<()> {
        let (mut cmd, line) = self.command(args);
        debug!(command = %line, "running");
        let status = cmd.status()?;
        if !status.success() {
            return Err(ModuleError::RemoteOperation {
                command: line,
                status: status.code(),
            });
        }
        Ok(())
    }
}

impl RemoteFs for HadoopCli {
    fn remove_recursive(&self, path: &str) -> ModuleResult<()> {
        if let Err(e) = self.run(&["-rm", "-r", "-f", path]) {
            warn!(path, error = %e, "remote delete failed, continuing");
        }
        Ok(())
    }

    fn mkdir_all(&self, path: &str) -> ModuleResult<()> {
        self.run(&["-mkdir", "-p", path])
    }

    fn put(&self, local: &Path, remote: &str) -> ModuleResult<()> {
        let local = local.to_string_lossy().into_owned();
        self.run(&["-put", "-f", local.as_str(), remote])
    }

    fn list(&self, path: &str) -> ModuleResult<Vec<String>> {
        let (mut cmd, line) = self.command(&["-ls", path]);
        debug!(command = %line, "running");
        let out = cmd.output()?;
        if !out.status.success() {
            return Err(ModuleError::RemoteOperation {
                command: line,
                status: out.status.code(),
            });
        }
        Ok(parse_listing(&String::from_utf8_lossy(&out.stdout)))
    }
}

/// Pull entry paths out of `hadoop fs -ls` output.
///
/// Example line:
/// -rw-r--r--   3 alice supergroup   1024 2014-05-01 10:00 /zet/tmp/a.txt
fn parse_listing(text: &str) -> Vec<String> {
    text.lines()
        .filter(|l| l.starts_with('-') || l.starts_with('d'))
        .filter_map(|l| l.split_whitespace().nth(7))
        .map(str::to_string)
        .collect()
}

//! Submission of a generated script to the SQL client (beeline).

use crate::error::{ModuleError, ModuleResult};
use crate::settings::Settings;

use std::path::Path;
use std::process::Command;
use tracing::info;

pub const DEFAULT_PORT: &str = "10000";

/// How the client's exit status is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Zero exit status means the script ran.
    #[default]
    Standard,
    /// Zero exit status means failure. Matches modules built against clients
    /// that exit non-zero on normal completion.
    Legacy,
}

impl ExitPolicy {
    pub fn parse(s: &str) -> ModuleResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ExitPolicy::Standard),
            "legacy" => Ok(ExitPolicy::Legacy),
            other => Err(ModuleError::Config(format!("unknown exit policy: {}", other))),
        }
    }

    pub fn accepts(self, exited_zero: bool) -> bool {
        match self {
            ExitPolicy::Standard => exited_zero,
            ExitPolicy::Legacy => !exited_zero,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub program: String,
    pub host: String,
    pub port: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub policy: ExitPolicy,
}

impl ClientConfig {
    /// Host, port and credentials come from `GLOBAL_PARAM`.
    pub fn from_settings(
        settings: &Settings,
        program: impl Into<String>,
        policy: ExitPolicy,
    ) -> ModuleResult<Self> {
        let optional = |key: &str| {
            settings
                .global_param
                .get(key)
                .filter(|v| !v.is_empty())
                .cloned()
        };

        Ok(Self {
            program: program.into(),
            host: settings.global("HiveServer2_Host")?.to_string(),
            port: optional("HiveServer2_Port").unwrap_or_else(|| DEFAULT_PORT.to_string()),
            user: optional("HiveServer2_User"),
            password: optional("HiveServer2_Password"),
            policy,
        })
    }

    pub fn args(&self, script: &Path) -> Vec<String> {
        let mut args = vec![
            "-u".to_string(),
            format!("jdbc:hive2://{}:{}", self.host, self.port),
        ];
        if let Some(user) = &self.user {
            args.extend(["-n".to_string(), user.clone()]);
        }
        if let Some(password) = &self.password {
            args.extend(["-p".to_string(), password.clone()]);
        }
        args.extend(["-f".to_string(), script.to_string_lossy().into_owned()]);
        args
    }

    /// Run the client on `script` and wait for it. Output is not captured.
    pub fn submit(&self, script: &Path) -> ModuleResult<()> {
        let args = self.args(script);
        let line = format!("{} {}", self.program, redact(&args).join(" "));
        info!(command = %line, "submitting script");

        let status = Command::new(&self.program).args(&args).status()?;
        if !self.policy.accepts(status.success()) {
            return Err(ModuleError::Execution {
                command: line,
                status: status.code(),
            });
        }
        Ok(())
    }
}

fn redact(args: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for a in args {
        if hide_next {
            out.push("****".to_string());
            hide_next = false;
        } else {
            hide_next = a == "-p";
            out.push(a.clone());
        }
    }
    out
}

//! Process configuration read from the environment.

use crate::error::ModuleResult;
use crate::runtime::ExitPolicy;
use crate::spec::DEFAULT_ENV_PREFIX;

use std::path::PathBuf;

pub const PARAM_DOC_VAR: &str = "ZETRT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Parameter document path; `None` selects environment binding.
    pub param_doc: Option<PathBuf>,
    pub env_prefix: String,
    pub hadoop_bin: String,
    pub beeline_bin: String,
    pub exit_policy: ExitPolicy,
}

impl RuntimeConfig {
    pub fn from_env() -> ModuleResult<Self> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ModuleResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let exit_policy = match lookup("ZETJOB_EXIT_POLICY") {
            Some(v) => ExitPolicy::parse(&v)?,
            None => ExitPolicy::default(),
        };

        Ok(Self {
            param_doc: lookup(PARAM_DOC_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            env_prefix: lookup("ZETJOB_ENV_PREFIX").unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string()),
            hadoop_bin: lookup("ZETJOB_HADOOP_BIN").unwrap_or_else(|| "hadoop".to_string()),
            beeline_bin: lookup("ZETJOB_BEELINE_BIN").unwrap_or_else(|| "beeline".to_string()),
            exit_policy,
        })
    }
}

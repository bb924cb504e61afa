//! Environment-backed param binding.
//!
//! Older modules were launched without a parameter document; each declared
//! param was read from `<prefix><name>` (prefix `ZETENV_` by default) and fell
//! back to its spec default. Kept for modules still launched that way.

use crate::error::{ModuleError, ModuleResult};
use crate::settings::Param;
use crate::spec::ModuleSpec;

use std::collections::BTreeMap;

pub const DEFAULT_ENV_PREFIX: &str = "ZETENV_";

pub fn env_params<F>(
    spec: &ModuleSpec,
    prefix: &str,
    lookup: F,
) -> ModuleResult<BTreeMap<String, Param>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut params = BTreeMap::new();
    let mut missing = Vec::new();

    for (name, decl) in &spec.param {
        match lookup(&format!("{}{}", prefix, name)).or_else(|| decl.default.clone()) {
            Some(raw) => {
                params.insert(name.clone(), Param::new(name, decl.kind, raw));
            }
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(ModuleError::MissingParameter {
            section: "environment",
            names: missing,
        });
    }
    Ok(params)
}

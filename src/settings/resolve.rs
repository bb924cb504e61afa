//! Settings resolution: spec + CLI `key=value` tokens + parameter document.
//!
//! Parameter document (pointed at by `ZETRT`) shape:
//! {
//!   "PARAM":        { "limit": { "Val": 20 } },
//!   "GLOBAL_PARAM": { "userName": { "Val": "alice" }, "jobId": { "Val": 7 } }
//! }
//!
//! Precedence is fixed: CLI tokens are the only source for inputs and outputs,
//! a `PARAM` value beats the spec.json default, and `GLOBAL_PARAM` is copied as-is.

use crate::error::{ModuleError, ModuleResult};
use crate::settings::{Input, Output, Param};
use crate::spec::{ModuleSpec, json_to_raw};

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParamDocument {
    #[serde(rename = "PARAM", default)]
    pub param: BTreeMap<String, ValEntry>,

    #[serde(rename = "GLOBAL_PARAM", default)]
    pub global_param: BTreeMap<String, ValEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValEntry {
    #[serde(rename = "Val", default)]
    pub val: Value,
}

impl ParamDocument {
    pub fn from_file(path: impl AsRef<Path>) -> ModuleResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> ModuleResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Flatten `GLOBAL_PARAM` into name -> raw value.
    pub fn globals(&self) -> BTreeMap<String, String> {
        self.global_param
            .iter()
            .map(|(k, v)| (k.clone(), json_to_raw(&v.val)))
            .collect()
    }
}

/// Fully resolved, declared-phase settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub name: String,
    pub description: String,
    pub param: BTreeMap<String, Param>,
    pub input: BTreeMap<String, Input>,
    pub output: BTreeMap<String, Output>,
    pub cmd: String,
    pub global_param: BTreeMap<String, String>,
}

impl Settings {
    pub fn global(&self, key: &str) -> ModuleResult<&str> {
        self.global_param
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ModuleError::MissingParameter {
                section: "GLOBAL_PARAM",
                names: vec![key.to_string()],
            })
    }
}

/// Split positional `key=value` tokens. Later tokens overwrite earlier ones.
pub fn parse_cli_pairs<I, S>(tokens: I) -> ModuleResult<BTreeMap<String, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeMap::new();
    for token in tokens {
        let token = token.as_ref();
        let (k, v) = token
            .split_once('=')
            .ok_or_else(|| ModuleError::MalformedArgument(token.to_string()))?;
        out.insert(k.to_string(), v.to_string());
    }
    Ok(out)
}

fn missing_keys<'a>(
    declared: impl Iterator<Item = &'a String>,
    cli: &BTreeMap<String, String>,
) -> Vec<String> {
    declared.filter(|k| !cli.contains_key(*k)).cloned().collect()
}

/// Bind inputs/outputs from CLI tokens and params from the document.
pub fn resolve(
    spec: &ModuleSpec,
    cli: &BTreeMap<String, String>,
    doc: &ParamDocument,
) -> ModuleResult<Settings> {
    let param = bind_params(spec, doc)?;
    resolve_with_params(spec, cli, param, doc.globals())
}

/// Shared tail of resolution once params have been bound from any source.
pub fn resolve_with_params(
    spec: &ModuleSpec,
    cli: &BTreeMap<String, String>,
    param: BTreeMap<String, Param>,
    global_param: BTreeMap<String, String>,
) -> ModuleResult<Settings> {
    let missing = missing_keys(spec.input.keys(), cli);
    if !missing.is_empty() {
        return Err(ModuleError::MissingParameter {
            section: "input",
            names: missing,
        });
    }
    let missing = missing_keys(spec.output.keys(), cli);
    if !missing.is_empty() {
        return Err(ModuleError::MissingParameter {
            section: "output",
            names: missing,
        });
    }

    let input = spec
        .input
        .keys()
        .map(|k| (k.clone(), Input::new(&cli[k])))
        .collect();
    let output = spec
        .output
        .keys()
        .map(|k| (k.clone(), Output::new(&cli[k])))
        .collect();

    Ok(Settings {
        name: spec.name.clone(),
        description: spec.description.clone(),
        param,
        input,
        output,
        cmd: spec.cmd.clone(),
        global_param,
    })
}

fn bind_params(spec: &ModuleSpec, doc: &ParamDocument) -> ModuleResult<BTreeMap<String, Param>> {
    let mut params = BTreeMap::new();
    let mut missing = Vec::new();

    for (name, decl) in &spec.param {
        let raw = doc
            .param
            .get(name)
            .map(|entry| json_to_raw(&entry.val))
            .or_else(|| decl.default.clone());
        match raw {
            Some(raw) => {
                params.insert(name.clone(), Param::new(name, decl.kind, raw));
            }
            None => missing.push(name.clone()),
        }
    }

    if !missing.is_empty() {
        return Err(ModuleError::MissingParameter {
            section: "PARAM",
            names: missing,
        });
    }
    Ok(params)
}

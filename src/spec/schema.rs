//! Spec document (spec.json) loader.
//!
//! JSON shape:
//! {
//!   "Name": "my_module",
//!   "Description": "...",
//!   "Param": { "limit": { "Type": "integer", "Default": 10 } },
//!   "Input": { "src": { ... } },
//!   "Output": { "dst": { ... } },
//!   "Cmd": "..."
//! }
//!
//! All six top-level keys are mandatory. Param descriptors are turned into a
//! closed `ParamKind` and numeric defaults are coerced once here, so a broken
//! default fails at load time instead of at first read.

use crate::error::{ModuleError, ModuleResult};
use crate::settings::ParamValue;

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

pub const REQUIRED_KEYS: [&str; 6] = ["Name", "Param", "Input", "Output", "Cmd", "Description"];

#[derive(Debug, Clone, Deserialize)]
struct RawSpec {
    #[serde(rename = "Name")]
    name: String,

    #[serde(rename = "Description")]
    description: String,

    #[serde(rename = "Param")]
    param: BTreeMap<String, RawParam>,

    #[serde(rename = "Input")]
    input: BTreeMap<String, Value>,

    #[serde(rename = "Output")]
    output: BTreeMap<String, Value>,

    #[serde(rename = "Cmd")]
    cmd: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RawParam {
    #[serde(rename = "Type", default)]
    kind: Option<String>,

    #[serde(rename = "Default", default)]
    default: Option<Value>,
}

/// Declared kind of a param; drives coercion on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
    Float,
    Enum,
    File,
}

impl ParamKind {
    /// Map a `Type` tag to a kind. Unknown tags read as plain text.
    pub fn from_tag(name: &str, tag: &str) -> Self {
        match tag {
            "string" => ParamKind::Text,
            "integer" => ParamKind::Integer,
            "float" => ParamKind::Float,
            "enum" => ParamKind::Enum,
            "file" => ParamKind::File,
            other => {
                warn!(param = name, tag = other, "unknown param type, reading as string");
                ParamKind::Text
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamKind::Text => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "float",
            ParamKind::Enum => "enum",
            ParamKind::File => "file",
        }
    }

    /// Convert a raw bound string into a typed value.
    pub fn coerce(self, name: &str, raw: &str) -> ModuleResult<ParamValue> {
        let mismatch = |reason: String| ModuleError::TypeCoercion {
            name: name.to_string(),
            kind: self.label(),
            raw: raw.to_string(),
            reason,
        };

        Ok(match self {
            ParamKind::Text => ParamValue::Text(raw.to_string()),
            ParamKind::Enum => ParamValue::Enum(raw.to_string()),
            ParamKind::Integer => ParamValue::Integer(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|e| mismatch(e.to_string()))?,
            ),
            ParamKind::Float => ParamValue::Float(
                raw.trim()
                    .parse::<f64>()
                    .map_err(|e| mismatch(e.to_string()))?,
            ),
            ParamKind::File => ParamValue::File(fs::read_to_string(raw)?),
        })
    }
}

/// Validated param declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub kind: ParamKind,
    /// Raw default, `None` when spec.json declares none.
    pub default: Option<String>,
}

/// Validated in-memory spec document.
#[derive(Debug, Clone)]
pub struct ModuleSpec {
    pub name: String,
    pub description: String,
    pub param: BTreeMap<String, ParamSpec>,
    /// Input/Output descriptors are opaque; only their keys matter.
    pub input: BTreeMap<String, Value>,
    pub output: BTreeMap<String, Value>,
    pub cmd: String,
}

pub fn load_spec_file(path: impl AsRef<Path>) -> ModuleResult<ModuleSpec> {
    let text = fs::read_to_string(path)?;
    load_spec_str(&text)
}

pub fn load_spec_str(text: &str) -> ModuleResult<ModuleSpec> {
    let doc: Value = serde_json::from_str(text)?;
    load_spec_value(doc)
}

fn load_spec_value(doc: Value) -> ModuleResult<ModuleSpec> {
    let complete = doc
        .as_object()
        .map(|obj| REQUIRED_KEYS.iter().all(|k| obj.contains_key(*k)))
        .unwrap_or(false);
    if !complete {
        return Err(ModuleError::Validation {
            required: REQUIRED_KEYS.to_vec(),
        });
    }

    let raw: RawSpec = serde_json::from_value(doc)?;

    let mut param = BTreeMap::new();
    for (name, raw_param) in raw.param {
        let tag = raw_param.kind.ok_or_else(|| ModuleError::InvalidParam {
            name: name.clone(),
            reason: "missing Type".to_string(),
        })?;
        let kind = ParamKind::from_tag(&name, &tag);
        let default = raw_param.default.as_ref().map(json_to_raw);

        // File defaults name paths that may only exist at run time.
        if let (Some(d), ParamKind::Integer | ParamKind::Float) = (&default, kind) {
            kind.coerce(&name, d).map_err(|e| ModuleError::InvalidParam {
                name: name.clone(),
                reason: format!("bad default: {}", e),
            })?;
        }

        param.insert(name, ParamSpec { kind, default });
    }

    Ok(ModuleSpec {
        name: raw.name,
        description: raw.description,
        param,
        input: raw.input,
        output: raw.output,
        cmd: raw.cmd,
    })
}

/// Render a JSON scalar the way it is interpolated into scripts.
pub fn json_to_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

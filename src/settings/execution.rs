//! Execution-phase settings.
//!
//! `Settings` stays as resolved. Each declared output is assigned its remote
//! identifier in a new record; `prepare` only reads (input first lines), and
//! `write_outputs` is the single step that writes identifiers to the output
//! backing files so downstream modules can read them.

use crate::error::ModuleResult;
use crate::remote::Namespace;
use crate::settings::Settings;

use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ExecutionSettings<'a> {
    pub declared: &'a Settings,
    pub namespace: Namespace,
    /// Input name -> first line of its backing file.
    pub inputs: BTreeMap<String, String>,
    /// Output name -> remote identifier.
    pub outputs: BTreeMap<String, String>,
}

impl<'a> ExecutionSettings<'a> {
    /// Read inputs and compute output identifiers. Touches nothing.
    pub fn prepare(declared: &'a Settings, namespace: Namespace) -> ModuleResult<Self> {
        let mut inputs = BTreeMap::new();
        for (name, input) in &declared.input {
            inputs.insert(name.clone(), input.val()?);
        }

        let outputs = declared
            .output
            .keys()
            .map(|name| (name.clone(), namespace.output_identifier(name)))
            .collect();

        Ok(Self {
            declared,
            namespace,
            inputs,
            outputs,
        })
    }

    pub fn write_outputs(&self) -> ModuleResult<()> {
        for (name, ident) in &self.outputs {
            self.declared.output[name].set_val(ident)?;
            debug!(output = %name, ident = %ident, "bound output");
        }
        Ok(())
    }

    pub fn bind(declared: &'a Settings, namespace: Namespace) -> ModuleResult<Self> {
        let exec = Self::prepare(declared, namespace)?;
        exec.write_outputs()?;
        Ok(exec)
    }
}

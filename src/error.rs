//! Error taxonomy shared by every stage of the module pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type ModuleResult<T> = std::result::Result<T, ModuleError>;

#[derive(Debug, Error)]
pub enum ModuleError {
    /// spec.json lacks at least one required top-level key.
    #[error("one of {required:?} may not exist in spec.json")]
    Validation { required: Vec<&'static str> },

    #[error("malformed JSON document: {0}")]
    SpecParse(#[from] serde_json::Error),

    #[error("param '{name}' is invalid: {reason}")]
    InvalidParam { name: String, reason: String },

    #[error("argument {0:?} is not of the form key=value")]
    MalformedArgument(String),

    #[error("missing {section} parameters: {}", names.join(", "))]
    MissingParameter {
        section: &'static str,
        names: Vec<String>,
    },

    #[error("cannot read param '{name}' as {kind}: {raw:?} ({reason})")]
    TypeCoercion {
        name: String,
        kind: &'static str,
        raw: String,
        reason: String,
    },

    #[error("remote operation `{command}` failed with status {status:?}")]
    RemoteOperation {
        command: String,
        status: Option<i32>,
    },

    #[error("script submission `{command}` failed with status {status:?}")]
    Execution {
        command: String,
        status: Option<i32>,
    },

    #[error("the {0} runtime is not implemented")]
    NotImplemented(&'static str),

    #[error("cannot read script {}", path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

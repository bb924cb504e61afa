//! Spec layer: the module's spec.json and its validated in-memory form.
//!
//! It owns:
//! - schema loading and required-key validation
//! - param kinds and their coercion
//! - the environment binding mode used before parameter documents existed

pub mod env;
pub mod schema;

pub use env::{DEFAULT_ENV_PREFIX, env_params};
pub use schema::{ModuleSpec, ParamKind, json_to_raw, load_spec_file, load_spec_str};

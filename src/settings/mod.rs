//! Settings layer: typed values and the resolved record built from them.

pub mod execution;
pub mod resolve;
pub mod value;

pub use execution::ExecutionSettings;
pub use resolve::{ParamDocument, Settings, parse_cli_pairs, resolve, resolve_with_params};
pub use value::{Input, Output, Param, ParamValue};

//! Script header rendering.
//!
//! Generated artifact layout:
//!
//! -- Header
//! ADD FILE <remote file>;          one per uploaded file, upload order
//! ADD JAR <remote jar>;            one per uploaded jar, upload order
//! set hivevar:MYNS = <namespace>;
//! set hivevar:PARAM_<k> = <raw>;   one per param
//! set hivevar:INPUT_<k> = <v>;     one per input, first line of its file
//! set hivevar:OUTPUT_<k> = <v>;    one per output, its remote identifier
//!
//!
//! -- Main
//! <script body, verbatim>

use crate::error::ModuleResult;
use crate::settings::ExecutionSettings;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const HEADER_MARKER: &str = "-- Header";
pub const MAIN_MARKER: &str = "-- Main";

pub fn render_header(
    files: &[String],
    jars: &[String],
    exec: &ExecutionSettings<'_>,
) -> String {
    let settings = exec.declared;
    let mut lines = Vec::new();

    lines.extend(files.iter().map(|f| format!("ADD FILE {};", f)));
    lines.extend(jars.iter().map(|j| format!("ADD JAR {};", j)));
    lines.push(format!("set hivevar:MYNS = {};", exec.namespace.name));
    for (k, p) in &settings.param {
        lines.push(format!("set hivevar:PARAM_{} = {};", k, p.raw()));
    }
    for (k, value) in &exec.inputs {
        lines.push(format!("set hivevar:INPUT_{} = {};", k, value));
    }
    for (k, ident) in &exec.outputs {
        lines.push(format!("set hivevar:OUTPUT_{} = {};", k, ident));
    }

    lines.join("\n")
}

/// Header followed by the untouched script body.
pub fn assemble_script(
    files: &[String],
    jars: &[String],
    exec: &ExecutionSettings<'_>,
    body: &[u8],
) -> Vec<u8> {
    let header = render_header(files, jars, exec);
    let mut out = format!("{}\n{}\n\n\n{}\n", HEADER_MARKER, header, MAIN_MARKER).into_bytes();
    out.extend_from_slice(body);
    out
}

/// Write the artifact to `target`, or to a kept temporary file when `None`.
pub fn write_script(artifact: &[u8], target: Option<&Path>) -> ModuleResult<PathBuf> {
    let path = match target {
        Some(path) => {
            fs::write(path, artifact)?;
            path.to_path_buf()
        }
        None => {
            let mut tmp = tempfile::Builder::new()
                .prefix("zetjob_")
                .suffix(".hql")
                .tempfile()?;
            tmp.write_all(artifact)?;
            let (_, path) = tmp.keep().map_err(std::io::Error::from)?;
            path
        }
    };
    info!(path = %path.display(), bytes = artifact.len(), "wrote script");
    Ok(path)
}

//! Typed value wrappers bound into the settings record.
//!
//! `Param` holds a raw string and its declared kind; coercion happens on
//! `val()`. `Input` and `Output` hold a path to a local backing file whose
//! first line is the value the platform passes between modules.

use crate::error::ModuleResult;
use crate::spec::ParamKind;

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Result of reading a `Param`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Enum(String),
    /// Whole contents of the referenced file.
    File(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    kind: ParamKind,
    raw: String,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            raw: raw.into(),
        }
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// The bound value exactly as supplied, used for script interpolation.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn val(&self) -> ModuleResult<ParamValue> {
        self.kind.coerce(&self.name, &self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    path: PathBuf,
}

impl Input {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First line of the backing file, newline stripped.
    pub fn val(&self) -> ModuleResult<String> {
        first_line(&self.path)
    }

    pub fn as_whole(&self) -> ModuleResult<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Open the backing file; read-only unless `options` says otherwise.
    pub fn as_file(&self, options: Option<&OpenOptions>) -> ModuleResult<File> {
        match options {
            Some(opts) => Ok(opts.open(&self.path)?),
            None => Ok(File::open(&self.path)?),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    path: PathBuf,
}

impl Output {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn val(&self) -> ModuleResult<String> {
        first_line(&self.path)
    }

    /// Replace the backing file's contents with `value`.
    pub fn set_val(&self, value: &str) -> ModuleResult<()> {
        fs::write(&self.path, value)?;
        Ok(())
    }

    pub fn as_whole(&self) -> ModuleResult<String> {
        Ok(fs::read_to_string(&self.path)?)
    }

    /// Open the backing file; create/truncate for writing unless `options`
    /// says otherwise.
    pub fn as_file(&self, options: Option<&OpenOptions>) -> ModuleResult<File> {
        match options {
            Some(opts) => Ok(opts.open(&self.path)?),
            None => Ok(File::create(&self.path)?),
        }
    }
}

fn first_line(path: &Path) -> ModuleResult<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModuleError;
    use crate::settings::{ParamDocument, resolve};
    use crate::spec::load_spec_str;
    use pretty_assertions::assert_eq;
    use std::io::{Read, Write};

    #[test]
    fn numeric_params_coerce_on_read() {
        let n = Param::new("n", ParamKind::Integer, "7");
        let r = Param::new("r", ParamKind::Float, "0.25");
        assert_eq!(n.val().unwrap(), ParamValue::Integer(7));
        assert_eq!(r.val().unwrap(), ParamValue::Float(0.25));
    }

    #[test]
    fn bad_numeric_param_fails_only_when_read() {
        let p = Param::new("n", ParamKind::Integer, "seven");
        assert_eq!(p.raw(), "seven");
        assert!(matches!(p.val(), Err(ModuleError::TypeCoercion { .. })));

        let f = Param::new("f", ParamKind::Float, "x1");
        assert!(matches!(f.val(), Err(ModuleError::TypeCoercion { .. })));
    }

    #[test]
    fn unknown_type_tag_reads_back_as_text() {
        let spec = load_spec_str(
            r#"{
                "Name": "m", "Description": "", "Cmd": "",
                "Param": { "sep": { "Type": "delimiter", "Default": " 12 " } },
                "Input": {}, "Output": {}
            }"#,
        )
        .unwrap();
        let settings = resolve(&spec, &Default::default(), &ParamDocument::default()).unwrap();

        let sep = &settings.param["sep"];
        assert_eq!(sep.kind(), ParamKind::Text);
        assert_eq!(sep.val().unwrap(), ParamValue::Text(" 12 ".to_string()));
    }

    #[test]
    fn file_param_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.sql");
        fs::write(&path, "select 1;\nselect 2;\n").unwrap();

        let p = Param::new("q", ParamKind::File, path.to_string_lossy());
        assert_eq!(
            p.val().unwrap(),
            ParamValue::File("select 1;\nselect 2;\n".to_string())
        );
    }

    #[test]
    fn missing_file_param_surfaces_io_error() {
        let p = Param::new("q", ParamKind::File, "/definitely/not/here");
        assert!(matches!(p.val(), Err(ModuleError::Io(_))));
    }

    #[test]
    fn input_reads_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in");
        fs::write(&path, "hdfs:///data/a\nignored\n").unwrap();

        let input = Input::new(&path);
        assert_eq!(input.val().unwrap(), "hdfs:///data/a");
        assert_eq!(input.as_whole().unwrap(), "hdfs:///data/a\nignored\n");

        let mut s = String::new();
        input.as_file(None).unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "hdfs:///data/a\nignored\n");
    }

    #[test]
    fn output_write_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");
        fs::write(&path, "old\nlines\n").unwrap();

        let output = Output::new(&path);
        output.set_val("X").unwrap();
        assert_eq!(output.val().unwrap(), "X");
        assert_eq!(output.as_whole().unwrap(), "X");
    }

    #[test]
    fn output_as_file_creates_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh");

        let output = Output::new(&path);
        {
            let mut f = output.as_file(None).unwrap();
            f.write_all(b"first\n").unwrap();
        }
        {
            let mut f = output.as_file(None).unwrap();
            f.write_all(b"second\n").unwrap();
        }
        assert_eq!(output.val().unwrap(), "second");
    }

    #[test]
    fn missing_input_file_is_not_wrapped() {
        let input = Input::new("/no/such/input");
        match input.val() {
            Err(ModuleError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("unexpected: {other:?}"),
        }
    }
}

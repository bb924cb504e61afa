//! Per-invocation remote working directory and logical namespace.
//!
//! For userName=u, jobId=7, blockId=3 under root /zet:
//!   working dir: /zet/tmp/zetjob/u/job7/blk3
//!   namespace:   zetjob_u_job7_blk3

use crate::error::ModuleResult;
use crate::settings::Settings;

pub const ROOT_PARAM: &str = "hdfs_root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub working_dir: String,
    pub name: String,
}

impl Namespace {
    pub fn new(root: &str, user: &str, job: &str, block: &str) -> Self {
        Self {
            working_dir: format!(
                "{}/tmp/zetjob/{}/job{}/blk{}",
                root.trim_end_matches('/'),
                user,
                job,
                block
            ),
            name: format!("zetjob_{}_job{}_blk{}", user, job, block),
        }
    }

    /// Derive from `GLOBAL_PARAM` identity plus the filesystem root, read from
    /// the `hdfs_root` param first and `GLOBAL_PARAM` second.
    pub fn derive(settings: &Settings) -> ModuleResult<Self> {
        let root = match settings.param.get(ROOT_PARAM) {
            Some(p) => p.raw(),
            None => settings.global(ROOT_PARAM)?,
        };
        Ok(Self::new(
            root,
            settings.global("userName")?,
            settings.global("jobId")?,
            settings.global("blockId")?,
        ))
    }

    pub fn working_path(&self, relative: &str) -> String {
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            self.working_dir.clone()
        } else {
            format!("{}/{}", self.working_dir, relative)
        }
    }

    /// Logical identifier for a declared output.
    pub fn output_identifier(&self, output: &str) -> String {
        format!("{}_OUTPUT_{}", self.name, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{ParamDocument, resolve};
    use crate::spec::load_spec_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_working_dir_and_namespace() {
        let ns = Namespace::new("/zet", "u", "7", "3");
        assert_eq!(ns.working_dir, "/zet/tmp/zetjob/u/job7/blk3");
        assert_eq!(ns.name, "zetjob_u_job7_blk3");
    }

    #[test]
    fn trailing_slash_on_root_is_ignored() {
        let ns = Namespace::new("hdfs://nn:8020/zet/", "u", "7", "3");
        assert_eq!(ns.working_dir, "hdfs://nn:8020/zet/tmp/zetjob/u/job7/blk3");
    }

    #[test]
    fn joins_relative_segments() {
        let ns = Namespace::new("/zet", "u", "7", "3");
        assert_eq!(ns.working_path("files/a.txt"), "/zet/tmp/zetjob/u/job7/blk3/files/a.txt");
        assert_eq!(ns.working_path(""), ns.working_dir);
        assert_eq!(ns.output_identifier("dst"), "zetjob_u_job7_blk3_OUTPUT_dst");
    }

    #[test]
    fn derives_from_settings() {
        let spec = load_spec_str(
            r#"{
                "Name": "m", "Description": "", "Cmd": "",
                "Param": { "hdfs_root": { "Type": "string", "Default": "/zet" } },
                "Input": {}, "Output": {}
            }"#,
        )
        .unwrap();
        let doc = ParamDocument::parse(
            r#"{ "GLOBAL_PARAM": {
                "userName": { "Val": "u" },
                "jobId": { "Val": 7 },
                "blockId": { "Val": "3" }
            } }"#,
        )
        .unwrap();
        let settings = resolve(&spec, &Default::default(), &doc).unwrap();

        let first = Namespace::derive(&settings).unwrap();
        assert_eq!(first, Namespace::new("/zet", "u", "7", "3"));
        assert_eq!(Namespace::derive(&settings).unwrap(), first);
    }
}

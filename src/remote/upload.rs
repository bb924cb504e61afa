//! Working directory reset and artifact upload.

use crate::error::{ModuleError, ModuleResult};
use crate::remote::{Namespace, RemoteFs};

use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Delete the working directory and recreate it empty.
pub fn reset_working_dir<F: RemoteFs + ?Sized>(fs: &F, ns: &Namespace) -> ModuleResult<()> {
    info!(dir = %ns.working_dir, "resetting working directory");
    fs.remove_recursive(&ns.working_dir)?;
    fs.mkdir_all(&ns.working_dir)?;

    let leftover = fs.list(&ns.working_dir)?;
    if !leftover.is_empty() {
        return Err(ModuleError::RemoteOperation {
            command: format!("reset {} (still holds {} entries)", ns.working_dir, leftover.len()),
            status: None,
        });
    }
    Ok(())
}

/// Upload every regular file directly under `local_dir`, sorted by name, to
/// `<working_dir>/<local dir name>/`. Returns the remote paths in upload order.
///
/// A missing `local_dir` uploads nothing. The first failure aborts the rest.
pub fn upload_dir<F: RemoteFs + ?Sized>(
    fs: &F,
    ns: &Namespace,
    local_dir: &Path,
) -> ModuleResult<Vec<String>> {
    if !local_dir.is_dir() {
        debug!(dir = %local_dir.display(), "no local directory, nothing to upload");
        return Ok(Vec::new());
    }

    let prefix = local_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let remote_parent = ns.working_path(&prefix);

    let mut uploaded = Vec::new();
    for entry in WalkDir::new(local_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let remote = format!(
            "{}/{}",
            remote_parent,
            entry.file_name().to_string_lossy()
        );
        fs.mkdir_all(&remote_parent)?;
        fs.put(entry.path(), &remote)?;
        info!(local = %entry.path().display(), remote = %remote, "uploaded");
        uploaded.push(remote);
    }

    Ok(uploaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::testing::RecordingFs;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn ns() -> Namespace {
        Namespace::new("/zet", "u", "7", "3")
    }

    #[test]
    fn uploads_files_in_sorted_order_after_reset() {
        let dir = tempfile::tempdir().unwrap();
        let files = dir.path().join("files");
        fs::create_dir(&files).unwrap();
        fs::write(files.join("b.txt"), "b").unwrap();
        fs::write(files.join("a.txt"), "a").unwrap();
        fs::create_dir(files.join("nested")).unwrap();

        let remote = RecordingFs::default();
        remote.seed("/zet/tmp/zetjob/u/job7/blk3/files/stale.txt");

        reset_working_dir(&remote, &ns()).unwrap();
        let uploaded = upload_dir(&remote, &ns(), &files).unwrap();

        assert_eq!(
            uploaded,
            vec![
                "/zet/tmp/zetjob/u/job7/blk3/files/a.txt".to_string(),
                "/zet/tmp/zetjob/u/job7/blk3/files/b.txt".to_string(),
            ]
        );
        assert_eq!(
            remote.ops(),
            vec![
                "rm /zet/tmp/zetjob/u/job7/blk3",
                "mkdir /zet/tmp/zetjob/u/job7/blk3",
                "ls /zet/tmp/zetjob/u/job7/blk3",
                "mkdir /zet/tmp/zetjob/u/job7/blk3/files",
                "put a.txt /zet/tmp/zetjob/u/job7/blk3/files/a.txt",
                "mkdir /zet/tmp/zetjob/u/job7/blk3/files",
                "put b.txt /zet/tmp/zetjob/u/job7/blk3/files/b.txt",
            ]
        );
        assert_eq!(
            remote.stored(),
            vec![
                "/zet/tmp/zetjob/u/job7/blk3/files/a.txt".to_string(),
                "/zet/tmp/zetjob/u/job7/blk3/files/b.txt".to_string(),
            ]
        );
    }

    #[test]
    fn missing_local_dir_uploads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let remote = RecordingFs::default();
        let uploaded = upload_dir(&remote, &ns(), &dir.path().join("jars")).unwrap();
        assert!(uploaded.is_empty());
        assert!(remote.ops().is_empty());
    }

    #[test]
    fn first_failed_copy_aborts_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let files = dir.path().join("files");
        fs::create_dir(&files).unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(files.join(name), name).unwrap();
        }

        let remote = RecordingFs::default();
        remote.fail_on("put b.txt");

        let err = upload_dir(&remote, &ns(), &files).unwrap_err();
        assert!(matches!(err, ModuleError::RemoteOperation { .. }));
        assert!(!remote.ops().iter().any(|op| op.starts_with("put c.txt")));
    }

    #[test]
    fn failed_recreate_aborts_reset() {
        let remote = RecordingFs::default();
        remote.fail_on("mkdir");
        assert!(reset_working_dir(&remote, &ns()).is_err());
        assert_eq!(
            remote.ops(),
            vec!["rm /zet/tmp/zetjob/u/job7/blk3", "mkdir /zet/tmp/zetjob/u/job7/blk3"]
        );
    }
}

//! Line-oriented output.

use std::ffi::OsString;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

/// Writes each item followed by `\n`, UTF-8 encoded.
///
/// Output goes to a sibling `.tmp` file that replaces `path` only once every
/// line has been written, so a failed run leaves any previous artifact intact.
/// Returns the number of lines written.
pub fn write_lines<I>(path: impl AsRef<Path>, items: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Display,
{
    let path = path.as_ref();
    let staging = staging_path(path);

    let written = write_staged(&staging, items).inspect_err(|_| {
        let _ = fs::remove_file(&staging);
    })?;

    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        PipelineError::io("failed to replace", path, e)
    })?;

    Ok(written)
}

fn write_staged<I>(staging: &Path, items: I) -> Result<usize>
where
    I: IntoIterator,
    I::Item: Display,
{
    let file =
        File::create(staging).map_err(|e| PipelineError::io("failed to create", staging, e))?;
    let mut out = BufWriter::new(file);
    let mut written = 0usize;

    for item in items {
        writeln!(out, "{}", item).map_err(|e| PipelineError::io("failed to write", staging, e))?;
        written += 1;
    }

    out.into_inner()
        .map_err(|e| PipelineError::io("failed to flush", staging, e.into_error()))?
        .sync_all()
        .map_err(|e| PipelineError::io("failed to sync", staging, e))?;

    Ok(written)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_item_per_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");

        let n = write_lines(&path, ["ایک۔", "دو۔"]).expect("write");
        assert_eq!(n, 2);
        assert_eq!(fs::read_to_string(&path).expect("read"), "ایک۔\nدو۔\n");
        assert!(!dir.path().join("out.txt.tmp").exists());
    }

    #[test]
    fn empty_sequence_creates_empty_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.txt");

        assert_eq!(write_lines(&path, Vec::<String>::new()).expect("write"), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), "");
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.txt");
        fs::write(&path, "stale\nstale\nstale\n").expect("seed");

        write_lines(&path, ["fresh"]).expect("write");
        assert_eq!(fs::read_to_string(&path).expect("read"), "fresh\n");
    }

    #[test]
    fn failure_leaves_no_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing-dir").join("out.txt");

        let err = write_lines(&path, ["x"]).expect_err("parent does not exist");
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn staging_is_a_sibling() {
        assert_eq!(
            staging_path(Path::new("/a/b/groups.txt")),
            PathBuf::from("/a/b/groups.txt.tmp")
        );
    }
}

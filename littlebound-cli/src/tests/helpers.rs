//! Scratch directories and input files shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// The four-point Manhattan instance; every optimal tour weighs 26.
pub(super) const SCENARIO_POINTS: &str = "4 1\n4 3\n2 7\n9 6\n";

/// A labelled asymmetric table whose single optimal tour weighs 16.
pub(super) const DEPOT_TABLE: &str =
    r#"{ "labels": ["depot", "mill", "quay"], "costs": [[0, 4, 9], [3, 0, 7], [5, 8, 0]] }"#;

pub(super) fn scratch() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &str) {
    littlebound_fs::write_utf8_file(path, contents).expect("write test input");
}

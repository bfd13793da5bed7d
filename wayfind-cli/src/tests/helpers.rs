//! Test helpers for running CLI commands against a temporary data directory.

use super::*;
use std::fs;
use tempfile::TempDir;

/// A temporary data directory passed to every command with `--data-dir`.
#[derive(Debug)]
pub(super) struct DataDir {
    dir: TempDir,
}

impl DataDir {
    pub(super) fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    pub(super) fn root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join("data")).expect("utf-8 data directory")
    }

    /// Write `contents` to `name` inside the data directory's parent.
    pub(super) fn write_payload(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path =
            Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("utf-8 payload path");
        fs::write(path.as_std_path(), contents).expect("write payload");
        path
    }

    pub(super) fn write_routes(&self, contents: &str) {
        let root = self.root();
        fs::create_dir_all(root.as_std_path()).expect("create data directory");
        fs::write(root.join("routes.json").as_std_path(), contents).expect("write routes");
    }

    /// Parse `args` after `wayfind --data-dir <dir>` and run the command.
    pub(super) fn run(&self, args: &[&str], stdin: &str) -> Result<serde_json::Value, CliError> {
        let root = self.root();
        let mut argv = vec!["wayfind", "--data-dir", root.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;

        let mut input = stdin.as_bytes();
        let mut output = Vec::new();
        run_with(cli, &mut input, &mut output)?;

        Ok(serde_json::from_slice(&output).expect("command output should be JSON"))
    }

    /// Like [`DataDir::run`] but panics on failure.
    pub(super) fn run_ok(&self, args: &[&str]) -> serde_json::Value {
        self.run(args, "")
            .unwrap_or_else(|err| panic!("`{}` failed: {err}", args.join(" ")))
    }
}

pub(super) const ROBOTICS_LAB: &str = r#"{
    "name": "Robotics lab",
    "x": 120.0,
    "y": 80.0,
    "floor": 2,
    "description": "Robotics club room",
    "category": "classroom"
}"#;

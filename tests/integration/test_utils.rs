//! Shared test utilities for integration tests
//!
//! Builds a scratch checkout that mirrors the aux layout (`go-util/` next to
//! `aptos/contract/auxexch/sources/`) and a fake launcher standing in for `go run`.
//! The fake launcher writes a deterministic file to the `-o` path, or a directory
//! with one file when the path has no `.move` extension.

use auxgen::config::AuxgenConfig;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Serializes tests that touch process-wide environment variables.
pub static ENV_MUTEX: Mutex<()> = Mutex::new(());

pub const SOURCES: &str = "aptos/contract/auxexch/sources";
pub const ABORT_ONLY_SOURCES: &str = "aptos/abort-only-contract/auxexch/sources";

const FAKE_GO: &str = r#"#!/bin/sh
tool="$1"
shift
all="$*"
out=""
while [ $# -gt 0 ]; do
  if [ "$1" = "-o" ]; then out="$2"; shift; fi
  shift
done
if [ -n "$FAIL_ON" ] && [ "$out" = "$FAIL_ON" ]; then
  echo "generator exploded on $out" >&2
  exit 7
fi
if [ -z "$out" ]; then
  echo "missing -o" >&2
  exit 2
fi
case "$out" in
  *.move) printf '// generated by %s\n// args: %s\n' "$tool" "$all" > "$out" ;;
  *) mkdir -p "$out" && printf '// abort-only build from %s\n' "$tool" > "$out/authority.move" ;;
esac
"#;

/// Scratch checkout with a fake launcher.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("go-util")).unwrap();
        std::fs::create_dir_all(root.join(SOURCES)).unwrap();
        // Parent of the abort-only output exists; the output itself does not
        std::fs::create_dir_all(root.join(ABORT_ONLY_SOURCES).parent().unwrap()).unwrap();
        std::fs::write(root.join("fake-go.sh"), FAKE_GO).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn launcher(&self) -> Vec<String> {
        vec![
            "sh".to_string(),
            self.root().join("fake-go.sh").to_string_lossy().into_owned(),
        ]
    }

    /// Launcher that fails (exit 7) for the task writing `output`.
    pub fn failing_launcher(&self, output: &str) -> Vec<String> {
        let wrapper = self.root().join("failing-go.sh");
        std::fs::write(
            &wrapper,
            format!(
                "#!/bin/sh\nFAIL_ON='{}' exec sh '{}' \"$@\"\n",
                output,
                self.root().join("fake-go.sh").display()
            ),
        )
        .unwrap();
        vec!["sh".to_string(), wrapper.to_string_lossy().into_owned()]
    }

    /// Default config pointed at the fake launcher.
    pub fn config(&self) -> AuxgenConfig {
        let mut config = AuxgenConfig::default();
        config.generate.launcher = self.launcher();
        config
    }

    /// Write `auxgen.toml` at the workspace root using the fake launcher.
    pub fn write_workspace_config(&self, extra: &str) {
        let launcher = self
            .launcher()
            .iter()
            .map(|s| format!("{:?}", s))
            .collect::<Vec<_>>()
            .join(", ");
        std::fs::write(
            self.root().join("auxgen.toml"),
            format!(
                "[generate]\nlauncher = [{}]\njobs = 2\n{}\n[logging]\nenabled = false\n",
                launcher, extra
            ),
        )
        .unwrap();
    }

    pub fn source(&self, file: &str) -> PathBuf {
        self.root().join(SOURCES).join(file)
    }

    /// Every file under `aptos/`, relative to the root, sorted.
    pub fn generated_files(&self) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(self.root().join("aptos"))
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(self.root())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        files.sort();
        files
    }
}

/// The four files a default run produces, sorted.
pub fn default_outputs() -> Vec<String> {
    let mut files: Vec<String> = [
        "critbit.move",
        "critbit_v.move",
        "reward_distributor.move",
        "reward_quoter.move",
    ]
    .iter()
    .map(|f| format!("{}/{}", SOURCES, f))
    .collect();
    files.sort();
    files
}

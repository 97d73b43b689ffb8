use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NUMPY_SOURCE: &str = "import numpy as np\nflags = np.zeros(2, dtype=np.bool)\nitems = np.object\n";

struct Workspace {
    tmp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.tmp.path()
    }

    fn write_config(&self, body: &str) -> PathBuf {
        let path = self.path().join("tfjs-prep.toml");
        fs::write(&path, body).expect("write config");
        path
    }

    fn cmd(&self, bin: &str) -> Command {
        let mut cmd = match bin {
            "fix-tfjs" => cargo_bin_cmd!("fix-tfjs"),
            _ => cargo_bin_cmd!("preconvert-models"),
        };
        cmd.current_dir(self.path()).env_remove("RUST_LOG");
        cmd
    }
}

fn install_package(root: &Path) {
    let dir = root.join("tensorflowjs");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("read_weights.py"), NUMPY_SOURCE).unwrap();
    fs::write(dir.join("write_weights.py"), NUMPY_SOURCE).unwrap();
}

#[test]
fn fix_exits_1_when_package_missing() {
    let ws = Workspace::new();
    let empty_root = ws.path().join("site-packages");
    fs::create_dir_all(&empty_root).unwrap();
    ws.write_config(&format!(
        "[patch]\nsearch_roots = ['{}']\n",
        empty_root.display()
    ));

    ws.cmd("fix-tfjs")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No tensorflowjs files found."));
}

#[test]
fn fix_patches_files_and_keeps_backups() {
    let ws = Workspace::new();
    let global = ws.path().join("global");
    let user = ws.path().join("user");
    install_package(&global);
    install_package(&user);
    ws.write_config(&format!(
        "[patch]\nsearch_roots = ['{}', '{}']\n",
        global.display(),
        user.display()
    ));

    ws.cmd("fix-tfjs")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files repaired!"));

    for name in ["read_weights.py", "write_weights.py"] {
        let patched = user.join("tensorflowjs").join(name);
        let content = fs::read_to_string(&patched).unwrap();
        assert!(!content.contains("np.bool"));
        assert!(!content.contains("np.object"));
        assert_eq!(
            fs::read_to_string(user.join("tensorflowjs").join(format!("{name}.bak"))).unwrap(),
            NUMPY_SOURCE
        );
        // Only the later root is touched.
        assert_eq!(
            fs::read_to_string(global.join("tensorflowjs").join(name)).unwrap(),
            NUMPY_SOURCE
        );
    }
}

#[test]
fn convert_reports_failures_and_exits_0() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path().join("models")).unwrap();
    ws.write_config("[convert]\ntool = 'tfjs-prep-no-such-converter'\n");

    ws.cmd("preconvert-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("NLP Model model not found"))
        .stdout(predicate::str::contains(
            "Results: 0/2 models converted successfully",
        ));

    assert!(!ws.path().join("express_example.js").exists());
}

#[cfg(unix)]
#[test]
fn convert_with_fake_converter_writes_scaffold() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::new();
    let models = ws.path().join("models");
    fs::create_dir_all(&models).unwrap();
    fs::write(models.join("model_pilgan.h5"), b"HDF5").unwrap();

    let tool = ws.path().join("fake_converter.sh");
    fs::write(
        &tool,
        "#!/bin/sh\nmkdir -p \"$3\"\necho '{}' > \"$3/model.json\"\nprintf 'weights' > \"$3/group1-shard1of1.bin\"\n",
    )
    .unwrap();
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

    ws.write_config(&format!("[convert]\ntool = '{}'\n", tool.display()));

    ws.cmd("preconvert-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz Model converted successfully!"))
        .stdout(predicate::str::contains("group1-shard1of1.bin (7 bytes)"))
        .stdout(predicate::str::contains(
            "Results: 1/2 models converted successfully",
        ));

    let scaffold = fs::read_to_string(ws.path().join("express_example.js")).unwrap();
    assert_eq!(scaffold, tfjs_prep_core::report::EXPRESS_SCAFFOLD);
}

#[test]
fn init_config_writes_defaults() {
    let ws = Workspace::new();

    ws.cmd("preconvert-models")
        .arg("--init-config")
        .assert()
        .success();

    let content = fs::read_to_string(ws.path().join("tfjs-prep.toml")).unwrap();
    assert!(content.contains("package = \"tensorflowjs\""));
    assert!(content.contains("tool = \"tensorflowjs_converter\""));
}

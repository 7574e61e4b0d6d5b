//! End-to-end tests for the `bundle` binary: flag parsing, exit codes, and
//! the files it actually writes to disk. Grounded on the teacher's own
//! `tests/e2e_cli.rs`, generalized from "slice/query a project" assertions
//! to "bundle these entry points" assertions.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn bundle() -> Command {
    Command::cargo_bin("bundle").expect("bundle binary is built by the test harness")
}

fn write_file(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        bundle().arg("--help").assert().success().stdout(predicate::str::contains("Entry point"));
    }

    #[test]
    fn shows_version() {
        bundle().arg("--version").assert().success().stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn fails_with_no_entries() {
        bundle().assert().failure().stderr(predicate::str::contains("entry point"));
    }

    #[test]
    fn rejects_outfile_and_outdir_together() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_file(dir.path(), "entry.js", "console.log(1);\n");
        bundle()
            .arg(&entry)
            .arg("--outfile")
            .arg(dir.path().join("a.js"))
            .arg("--outdir")
            .arg(dir.path().join("out"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("mutually exclusive"));
    }
}

mod bundling {
    use super::*;

    #[test]
    fn writes_a_bundle_for_a_single_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "math.js", "export function add(a, b) { return a + b; }\n");
        let entry = write_file(dir.path(), "entry.js", "import { add } from './math.js';\nconsole.log(add(1, 2));\n");
        let out = dir.path().join("out.js");

        bundle().arg(&entry).arg("--outfile").arg(&out).assert().success();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("console.log"));
        assert!(text.contains("function(require, exports, module)"));
    }

    #[test]
    fn reports_a_missing_import_as_a_build_failure() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_file(dir.path(), "entry.js", "import { x } from './missing.js';\n");
        let out = dir.path().join("out.js");

        bundle().arg(&entry).arg("--outfile").arg(&out).assert().failure();
        assert!(!out.exists());
    }

    #[test]
    fn refuses_to_overwrite_an_entry_point() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_file(dir.path(), "entry.js", "console.log(1);\n");

        bundle().arg(&entry).arg("--outfile").arg(&entry).assert().failure();
    }

    #[test]
    fn external_source_map_lands_next_to_the_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_file(dir.path(), "entry.js", "console.log(1);\n");
        let out = dir.path().join("out.js");

        bundle().arg(&entry).arg("--outfile").arg(&out).arg("--sourcemap").arg("external").assert().success();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("//# sourceMappingURL=out.js.map"));
        assert!(dir.path().join("out.js.map").exists());
    }

    #[test]
    fn iife_format_never_emits_a_numeric_module_map() {
        let dir = tempfile::tempdir().unwrap();
        let entry = write_file(dir.path(), "entry.js", "console.log(1);\n");
        let out = dir.path().join("out.js");

        bundle().arg(&entry).arg("--outfile").arg(&out).arg("--format").arg("iife").assert().success();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("(() => {"));
    }
}

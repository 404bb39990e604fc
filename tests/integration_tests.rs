//! Integration tests for pslocate
//!
//! These tests drive the binary against temporary script trees.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a pslocate Command
fn pslocate() -> Command {
    let mut cmd = cargo_bin_cmd!("pslocate");
    cmd.env_remove("PSLOCATE_EXTENSIONS")
        .env_remove("PSLOCATE_FOLLOW_LINKS")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create a temporary project directory
fn create_temp_project() -> TempDir {
    TempDir::new().unwrap()
}

fn write_script(dir: &Path, relative: &str, content: &str) {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        pslocate().arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        pslocate().arg("--version").assert().success();
    }

    #[test]
    fn test_unknown_command_fails() {
        pslocate().arg("frobnicate").assert().failure();
    }
}

// =============================================================================
// Locate Tests
// =============================================================================

mod locate {
    use super::*;

    #[test]
    fn test_locate_empty_directory() {
        let dir = create_temp_project();

        pslocate()
            .current_dir(dir.path())
            .arg("locate")
            .assert()
            .success()
            .stdout(predicate::str::contains("No declarations found"));
    }

    #[test]
    fn test_locate_lists_declarations() {
        let dir = create_temp_project();
        write_script(dir.path(), "a.txt", "function Ignored {}");
        write_script(dir.path(), "b.ps1", "function Alpha {} workflow Beta {}");

        pslocate()
            .current_dir(dir.path())
            .arg("locate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Alpha"))
            .stdout(predicate::str::contains("routine"))
            .stdout(predicate::str::contains("Beta"))
            .stdout(predicate::str::contains("orchestration"))
            .stdout(predicate::str::contains("Ignored").not())
            .stdout(predicate::str::contains("2 declaration(s)"));
    }

    #[test]
    fn test_locate_json_output() {
        let dir = create_temp_project();
        write_script(dir.path(), "b.ps1", "function Alpha {} workflow Beta {}");

        let output = pslocate()
            .arg("locate")
            .arg(dir.path())
            .arg("--json")
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["Alpha"]["kind"], "routine");
        assert_eq!(json["Beta"]["kind"], "orchestration");
        assert!(
            json["Beta"]["source_path"]
                .as_str()
                .unwrap()
                .ends_with("b.ps1")
        );
    }

    #[test]
    fn test_locate_kind_filter() {
        let dir = create_temp_project();
        write_script(dir.path(), "b.ps1", "function Alpha {} workflow Beta {}");

        pslocate()
            .arg("locate")
            .arg(dir.path())
            .args(["--kind", "workflow"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Beta"))
            .stdout(predicate::str::contains("Alpha").not());
    }

    #[test]
    fn test_locate_invalid_kind() {
        let dir = create_temp_project();

        pslocate()
            .arg("locate")
            .arg(dir.path())
            .args(["--kind", "class"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid declaration kind"));
    }

    #[test]
    fn test_locate_missing_root() {
        let dir = create_temp_project();

        pslocate()
            .arg("locate")
            .arg(dir.path().join("missing"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }

    #[test]
    fn test_locate_last_file_wins() {
        let dir = create_temp_project();
        write_script(dir.path(), "a.ps1", "function Shared {}");
        write_script(dir.path(), "b.ps1", "workflow Shared {}");

        let output = pslocate()
            .arg("locate")
            .arg(dir.path())
            .arg("--json")
            .output()
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json.as_object().unwrap().len(), 1);
        assert_eq!(json["Shared"]["kind"], "orchestration");
    }

    #[test]
    fn test_locate_extensions_flag() {
        let dir = create_temp_project();
        write_script(dir.path(), "a.ps1", "function FromPs1 {}");
        write_script(dir.path(), "b.script", "function FromScript {}");

        pslocate()
            .arg("locate")
            .arg(dir.path())
            .args(["--extensions", "script"])
            .assert()
            .success()
            .stdout(predicate::str::contains("FromScript"))
            .stdout(predicate::str::contains("FromPs1").not());
    }

    #[test]
    fn test_locate_extensions_env() {
        let dir = create_temp_project();
        write_script(dir.path(), "a.ps1", "function FromPs1 {}");
        write_script(dir.path(), "b.script", "function FromScript {}");

        pslocate()
            .env("PSLOCATE_EXTENSIONS", "script")
            .arg("locate")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("FromScript"))
            .stdout(predicate::str::contains("FromPs1").not());
    }

    #[test]
    fn test_locate_utf16_script() {
        let dir = create_temp_project();
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "function Grüße-Welt { }".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(dir.path().join("wide.ps1"), bytes).unwrap();

        pslocate()
            .arg("locate")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Grüße-Welt"))
            .stdout(predicate::str::contains("1 declaration(s)"));
    }

    #[test]
    fn test_locate_respects_config_exclude() {
        let dir = create_temp_project();
        write_script(dir.path(), "keep.ps1", "function Keep {}");
        write_script(dir.path(), "vendor/dep.ps1", "function Vendored {}");
        fs::write(
            dir.path().join("pslocate.toml"),
            "[scan]\nexclude = [\"vendor\"]\n",
        )
        .unwrap();

        pslocate()
            .current_dir(dir.path())
            .arg("locate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Keep"))
            .stdout(predicate::str::contains("Vendored").not());
    }
}

// =============================================================================
// Orchestration Tests
// =============================================================================

mod orchestration {
    use super::*;

    #[test]
    fn test_orchestration_prints_first_workflow() {
        let dir = create_temp_project();
        write_script(
            dir.path(),
            "flow.ps1",
            "function Helper {}\nworkflow Deploy-App {}\nworkflow Later {}",
        );

        pslocate()
            .arg("orchestration")
            .arg(dir.path().join("flow.ps1"))
            .assert()
            .success()
            .stdout(predicate::str::diff("Deploy-App\n"));
    }

    #[test]
    fn test_orchestration_missing_workflow_fails() {
        let dir = create_temp_project();
        write_script(dir.path(), "plain.ps1", "function Helper {}");

        pslocate()
            .arg("orchestration")
            .arg(dir.path().join("plain.ps1"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("No workflow declared"));
    }

    #[test]
    fn test_has_orchestration_true_and_false() {
        let dir = create_temp_project();
        write_script(dir.path(), "plain.ps1", "function Helper {}");
        write_script(dir.path(), "flow.ps1", "workflow Deploy {}");

        pslocate()
            .arg("has-orchestration")
            .arg(dir.path().join("plain.ps1"))
            .assert()
            .success()
            .stdout(predicate::str::diff("false\n"));

        pslocate()
            .arg("has-orchestration")
            .arg(dir.path().join("flow.ps1"))
            .assert()
            .success()
            .stdout(predicate::str::diff("true\n"));
    }

    #[test]
    fn test_has_orchestration_missing_file_fails() {
        let dir = create_temp_project();

        pslocate()
            .arg("has-orchestration")
            .arg(dir.path().join("gone.ps1"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"));
    }
}

// =============================================================================
// Token Dump Tests
// =============================================================================

mod tokens {
    use super::*;

    #[test]
    fn test_tokens_dump() {
        let dir = create_temp_project();
        write_script(dir.path(), "a.ps1", "function Foo { }");

        pslocate()
            .arg("tokens")
            .arg(dir.path().join("a.ps1"))
            .assert()
            .success()
            .stdout(predicate::str::contains("keyword"))
            .stdout(predicate::str::contains("\"function\""))
            .stdout(predicate::str::contains("identifier"))
            .stdout(predicate::str::contains("\"Foo\""));
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_show_defaults() {
        let dir = create_temp_project();

        pslocate()
            .current_dir(dir.path())
            .arg("config")
            .arg("show")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using default configuration"))
            .stdout(predicate::str::contains("\"ps1\""));
    }

    #[test]
    fn test_config_init_creates_toml() {
        let dir = create_temp_project();

        pslocate()
            .current_dir(dir.path())
            .arg("config")
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created pslocate.toml"));

        let content = fs::read_to_string(dir.path().join("pslocate.toml")).unwrap();
        assert!(content.contains("[scan]"));
        assert!(content.contains("ps1"));

        pslocate()
            .current_dir(dir.path())
            .arg("config")
            .arg("init")
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_validate_no_config() {
        let dir = create_temp_project();

        pslocate()
            .current_dir(dir.path())
            .arg("config")
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("Using defaults"));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = create_temp_project();
        fs::write(
            dir.path().join("pslocate.toml"),
            "[scan]\nextensions = [\".ps1\"]\n",
        )
        .unwrap();

        pslocate()
            .current_dir(dir.path())
            .arg("config")
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("leading dot"));
    }

    #[test]
    fn test_project_dir_flag() {
        let dir = create_temp_project();
        fs::write(
            dir.path().join("pslocate.toml"),
            "[scan]\nextensions = [\"psm1\"]\n",
        )
        .unwrap();

        pslocate()
            .args(["--project-dir"])
            .arg(dir.path())
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("Config file:"))
            .stdout(predicate::str::contains("\"psm1\""));
    }
}

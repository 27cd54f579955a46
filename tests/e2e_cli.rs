//! CLI end-to-end tests
//!
//! Tests for the discforge command-line interface. Commands that need
//! HandBrakeCLI run against a small shell script standing in for it.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

/// Get a command for the discforge binary
#[allow(deprecated)]
fn discforge_cmd() -> Command {
    Command::cargo_bin("discforge").unwrap()
}

fn sample_scan() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates/discforge-scan/tests/fixtures/sample-titles-scan.err")
}

/// A temp dir holding an empty config and a fake HandBrakeCLI.
///
/// The fake prints the sample scan for `--scan`, canned text for `--update`
/// and `--preset-list`, and otherwise writes its arguments to the
/// `--output` file.
#[cfg(unix)]
struct FakeHandBrake {
    dir: TempDir,
    bin: PathBuf,
    config: PathBuf,
}

#[cfg(unix)]
impl FakeHandBrake {
    fn new() -> Self {
        Self::with_script(&format!(
            r#"#!/bin/sh
out=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--output" ]; then out="$a"; fi
  case "$a" in
    --scan) cat "{scan}" >&2; exit 0 ;;
    --update) echo "Your version of HandBrake is up to date."; exit 0 ;;
    --preset-list) printf '< Regular\n\n   + Normal:  -e x264 -q 20.0\n   + High Profile:  -e x264 -q 20.0 -a 1,1\n\n>\n' >&2; exit 0 ;;
    --version) echo "HandBrake 0.9.5"; exit 0 ;;
  esac
  prev="$a"
done
if [ -n "$out" ]; then echo "$@" > "$out"; exit 0; fi
echo "Missing output file name" >&2
exit 1
"#,
            scan = sample_scan().display()
        ))
    }

    fn failing() -> Self {
        Self::with_script("#!/bin/sh\necho 'ERROR: Unknown option' >&2\nexit 3\n")
    }

    fn with_script(script: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let bin = dir.path().join("HandBrakeCLI");
        fs::write(&bin, script).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let config = dir.path().join("discforge.toml");
        fs::write(&config, "").unwrap();

        Self { dir, bin, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn cmd(&self) -> Command {
        let mut cmd = discforge_cmd();
        cmd.arg("--config")
            .arg(&self.config)
            .arg("--bin-path")
            .arg(&self.bin);
        cmd
    }
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = discforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = discforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("discforge"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = discforge_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_encode_help() {
    let mut cmd = discforge_cmd();
    cmd.args(["encode", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcode a title"))
        .stdout(predicate::str::contains("--overwrite"));
}

#[test]
fn test_cli_check_tools_missing_binary() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("discforge.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = discforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["--bin-path", "/nonexistent/HandBrakeCLI", "check-tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗"));
}

#[test]
fn test_cli_scan_missing_binary() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("discforge.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = discforge_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["--bin-path", "/nonexistent/HandBrakeCLI", "scan", "/dev/sr0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tool not found"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn test_cli_validate_valid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("discforge.toml");
    fs::write(
        &config_file,
        r#"
[handbrake]
bin_path = "/usr/local/bin/HandBrakeCLI"

[output]
overwrite = "reject"
atomic = true

[[defaults]]
switch = "native_language"
values = ["eng"]
"#,
    )
    .unwrap();

    let mut cmd = discforge_cmd();
    cmd.arg("validate")
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("--native-language eng"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("discforge.toml");
    fs::write(&config_file, "[output]\noverwrite = \"maybe\"\n").unwrap();

    let mut cmd = discforge_cmd();
    cmd.arg("validate").arg(&config_file).assert().failure();
}

#[test]
fn test_cli_validate_nonexistent_config() {
    let mut cmd = discforge_cmd();
    cmd.args(["validate", "/nonexistent/discforge.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_cli_init_config() {
    let temp = tempdir().unwrap();
    let config_file = temp.path().join("discforge.toml");

    let mut cmd = discforge_cmd();
    cmd.arg("init-config").arg(&config_file).assert().success();
    assert!(fs::read_to_string(&config_file)
        .unwrap()
        .contains("HandBrakeCLI"));

    let mut cmd = discforge_cmd();
    cmd.arg("init-config")
        .arg(&config_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = discforge_cmd();
    cmd.arg("init-config")
        .arg(&config_file)
        .arg("--force")
        .assert()
        .success();

    let mut cmd = discforge_cmd();
    cmd.arg("validate").arg(&config_file).assert().success();
}

// ---------------------------------------------------------------------------
// Commands against a fake HandBrakeCLI
// ---------------------------------------------------------------------------

#[cfg(unix)]
#[test]
fn test_cli_scan_lists_titles() {
    let hb = FakeHandBrake::new();
    hb.cmd()
        .args(["scan", "/Volumes/ARTHUR/D2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disc: D2"))
        .stdout(predicate::str::contains("Titles: 5"))
        .stdout(predicate::str::contains("Title 3: 01:43:54 (6234s), 13 chapters"))
        .stdout(predicate::str::contains("[main feature]"));
}

#[cfg(unix)]
#[test]
fn test_cli_scan_json() {
    let hb = FakeHandBrake::new();
    let output = hb
        .cmd()
        .args(["scan", "/Volumes/ARTHUR/D2", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "D2");
    assert_eq!(json["titles"]["3"]["duration"], "01:43:54");
    assert_eq!(json["titles"]["3"]["chapters"]["5"]["title"], 3);
    assert!(json.get("raw_output").is_none());
}

#[cfg(unix)]
#[test]
fn test_cli_encode_writes_output() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("out/film.m4v");

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .args(["--title", "3", "--preset", "Normal"])
        .args(["--arg", "markers", "--arg", "audio=1,2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Written:"));

    let args = fs::read_to_string(&target).unwrap();
    assert!(args.starts_with(
        "--input /dev/sr0 --title 3 --preset Normal --markers --audio 1 2 --output"
    ));
}

#[cfg(unix)]
#[test]
fn test_cli_encode_atomic_leaves_no_working_file() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("film.m4v");

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .arg("--atomic")
        .assert()
        .success();

    assert!(target.exists());
    assert!(!hb.path().join("film.handbrake.m4v").exists());
}

#[cfg(unix)]
#[test]
fn test_cli_encode_temp_dir() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("film.mkv");
    let scratch = hb.path().join("scratch");

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .arg("--temp-dir")
        .arg(&scratch)
        .assert()
        .success();

    let args = fs::read_to_string(&target).unwrap();
    assert!(args.contains(&scratch.join("film.handbrake.mkv").display().to_string()));
}

#[cfg(unix)]
#[test]
fn test_cli_encode_reject_existing() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("film.m4v");
    fs::write(&target, "old").unwrap();

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .args(["--overwrite", "reject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&target).unwrap(), "old");
}

#[cfg(unix)]
#[test]
fn test_cli_encode_skip_existing() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("film.m4v");
    fs::write(&target, "old").unwrap();

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .args(["--overwrite", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:"));

    assert_eq!(fs::read_to_string(&target).unwrap(), "old");
}

#[cfg(unix)]
#[test]
fn test_cli_encode_overwrite_aliases() {
    let hb = FakeHandBrake::new();
    let target = hb.path().join("film.m4v");
    fs::write(&target, "old").unwrap();

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .args(["--overwrite", "skip-if-exists"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:"));

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .args(["--overwrite", "sometimes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown overwrite policy"));
}

#[cfg(unix)]
#[test]
fn test_cli_rejects_non_utf8_paths() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let hb = FakeHandBrake::new();
    hb.cmd()
        .arg("scan")
        .arg(OsStr::from_bytes(b"/dev/sr\xff"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(hb.path().join(OsStr::from_bytes(b"film\xff.m4v")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[cfg(unix)]
#[test]
fn test_cli_config_defaults_applied() {
    let hb = FakeHandBrake::new();
    fs::write(
        &hb.config,
        "[[defaults]]\nswitch = \"native_language\"\nvalues = [\"eng\"]\n",
    )
    .unwrap();
    let target = hb.path().join("film.m4v");

    hb.cmd()
        .args(["encode", "/dev/sr0"])
        .arg(&target)
        .assert()
        .success();

    let args = fs::read_to_string(&target).unwrap();
    assert!(args.starts_with("--native-language eng --input /dev/sr0"));
}

#[cfg(unix)]
#[test]
fn test_cli_update() {
    let hb = FakeHandBrake::new();
    hb.cmd()
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[cfg(unix)]
#[test]
fn test_cli_presets() {
    let hb = FakeHandBrake::new();
    hb.cmd()
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Regular"))
        .stdout(predicate::str::contains("High Profile: -e x264 -q 20.0 -a 1,1"));
}

#[cfg(unix)]
#[test]
fn test_cli_presets_json() {
    let hb = FakeHandBrake::new();
    let output = hb.cmd().args(["presets", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json[0]["name"], "Regular");
    assert_eq!(json[0]["presets"][1]["name"], "High Profile");
}

#[cfg(unix)]
#[test]
fn test_cli_check_tools_finds_binary() {
    let hb = FakeHandBrake::new();
    hb.cmd()
        .arg("check-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("HandBrake 0.9.5"));
}

#[cfg(unix)]
#[test]
fn test_cli_process_failure() {
    let hb = FakeHandBrake::failing();
    hb.cmd()
        .args(["scan", "/dev/sr0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 3"))
        .stderr(predicate::str::contains("Unknown option"));
}

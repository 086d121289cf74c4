//! End-to-end runs of the sokolgen binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Run sokolgen with `home` as the user's home directory.
fn sokolgen_with_home(dir: &Path, home: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sokolgen"))
        .args(args)
        .current_dir(dir)
        .env("HOME", home)
        .env_remove("SOKOLGEN_BASE_URL")
        .env_remove("SOKOLGEN_TIMEOUT_SECS")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Should start sokolgen");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Run sokolgen with an empty home, so no user config applies.
fn sokolgen(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let home = TempDir::new().unwrap();
    sokolgen_with_home(dir, home.path(), args, stdin)
}

fn generated(dir: &Path) -> Vec<&'static str> {
    ["main.c", "Makefile", "sokol.html", "style.css"]
        .into_iter()
        .filter(|f| dir.join(f).exists())
        .collect()
}

#[test]
fn test_out_of_range_choice_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "--no-fetch"], "9\n");

    assert_eq!(output.status.code(), Some(2));
    assert!(generated(temp.path()).is_empty());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Enter target platform 1-6"));
}

#[test]
fn test_non_numeric_choice_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "--no-fetch"], "metal\n");

    assert_eq!(output.status.code(), Some(2));
    assert!(generated(temp.path()).is_empty());
}

#[test]
fn test_prompted_choice_writes_scaffold() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "--no-fetch"], "4\n");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(generated(temp.path()).len(), 4);
    let main_c = std::fs::read_to_string(temp.path().join("main.c")).unwrap();
    assert!(main_c.contains("#define SOKOL_METAL\n"));
}

#[test]
fn test_backend_flag_and_dir() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("game");
    std::fs::create_dir(&target).unwrap();

    let output = sokolgen(
        temp.path(),
        &["new", "--backend", "wgpu", "--no-fetch", "--dir", "game"],
        "",
    );

    assert!(output.status.success());
    let makefile = std::fs::read_to_string(target.join("Makefile")).unwrap();
    assert!(makefile.contains("-DSOKOL_WGPU "));
}

#[test]
fn test_dry_run_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "-b", "d3d11", "--dry-run"], "");

    assert!(output.status.success());
    assert!(generated(temp.path()).is_empty());
    assert!(!temp.path().join("sokol").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("would fetch https://raw.githubusercontent.com/floooh/sokol/"));
}

#[test]
fn test_unreachable_mirror_exits_with_fetch_code() {
    let temp = TempDir::new().unwrap();
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let base = format!("http://127.0.0.1:{port}");

    let output = sokolgen(
        temp.path(),
        &["new", "-b", "glcore", "--base-url", &base],
        "",
    );

    assert_eq!(output.status.code(), Some(5));
    // Templates were written before the fetch phase
    assert_eq!(generated(temp.path()).len(), 4);
    assert!(temp.path().join("sokol").is_dir());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("Error downloading").count(), 8);
}

#[test]
fn test_backends_json() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["backends", "--json"], "");

    assert!(output.status.success());
    let list: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 6);
    assert_eq!(list[0]["define"], "SOKOL_GLCORE");
    assert_eq!(list[5]["choice"], 6);
}

#[test]
fn test_json_with_prompt_keeps_stdout_parseable() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "--json", "--no-fetch"], "1\n");

    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["backend"], "glcore");
    assert_eq!(result["define"], "SOKOL_GLCORE");
    assert_eq!(result["written"].as_array().unwrap().len(), 4);
    // The menu still reaches the operator
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Enter target platform 1-6"));
}

#[test]
fn test_user_config_comes_from_home() {
    let temp = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    std::fs::create_dir(home.path().join(".sokolgen")).unwrap();
    std::fs::write(
        home.path().join(".sokolgen/config.toml"),
        "[remote]\nheaders = [\"sokol_gfx.h\"]\n",
    )
    .unwrap();

    let output = sokolgen_with_home(temp.path(), home.path(), &["new", "-b", "metal", "--dry-run"], "");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("would fetch").count(), 1);
}

#[test]
fn test_backend_flag_accepts_define_and_number() {
    let temp = TempDir::new().unwrap();
    let output = sokolgen(temp.path(), &["new", "-b", "SOKOL_GLES3", "--no-fetch"], "");
    assert!(output.status.success());
    let main_c = std::fs::read_to_string(temp.path().join("main.c")).unwrap();
    assert!(main_c.contains("#define SOKOL_GLES3\n"));

    let output = sokolgen(temp.path(), &["new", "--backend", "5", "--no-fetch"], "");
    assert!(output.status.success());
    let main_c = std::fs::read_to_string(temp.path().join("main.c")).unwrap();
    assert!(main_c.contains("#define SOKOL_WGPU\n"));

    let output = sokolgen(temp.path(), &["new", "-b", "vulkan", "--no-fetch"], "");
    assert!(!output.status.success());
}

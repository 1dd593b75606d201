use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

pub fn fixture_text(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("unable to read fixture {}: {err}", path.display()))
}

pub fn fixture(name: &str) -> Value {
    serde_json::from_str(&fixture_text(name))
        .unwrap_or_else(|err| panic!("fixture {name} is not JSON: {err}"))
}

pub fn jskos_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jskos"))
}

/// Run the CLI, feeding `stdin` when given, and return its output whatever
/// the exit status.
pub fn run_cli(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let mut cmd = Command::new(jskos_binary());
    cmd.args(args)
        .env_remove("RUST_LOG")
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn {:?}", cmd))?;
    if let Some(input) = stdin {
        let mut pipe = child.stdin.take().context("stdin not captured")?;
        pipe.write_all(input.as_bytes())
            .context("failed to write CLI stdin")?;
    }
    child
        .wait_with_output()
        .with_context(|| format!("failed to wait for {:?}", cmd))
}

/// Like [`run_cli`] but failing unless the command succeeds.
pub fn run_cli_ok(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let output = run_cli(args, stdin)?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "jskos {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            args,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}

pub fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

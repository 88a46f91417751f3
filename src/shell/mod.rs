//! Child-process execution and IDE launching.
//!
//! Two deliberately separate contracts: [`run_streaming`] inherits the
//! terminal's stdio so template commands and hooks keep their color and
//! interactivity, while [`run_captured`] collects stdout for commands whose
//! output must be parsed (`git ls-files`). Keeping them apart avoids a
//! "maybe capture" API that can do neither well.

use crate::error::Error;
use anyhow::{Context, Result};
use console::style;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Outcome of a captured command.
pub struct CapturedOutput {
    pub success: bool,
    pub stdout: String,
}

#[cfg(windows)]
fn shell_invocation() -> (String, &'static str) {
    (std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string()), "/C")
}

#[cfg(not(windows))]
fn shell_invocation() -> (String, &'static str) {
    ("/bin/sh".to_string(), "-c")
}

/// Run a shell command with the terminal's stdio inherited, echoing the
/// command line first. Returns whether it exited successfully.
pub fn run_streaming(command: &str, cwd: &Path) -> Result<bool> {
    println!("  {} {}", style("$").dim(), style(command).color256(214));
    let (shell, flag) = shell_invocation();
    let status = Command::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(cwd)
        .env("FORCE_COLOR", "3")
        .status()
        .with_context(|| format!("failed spawning `{command}`"))?;
    Ok(status.success())
}

/// Run a program with explicit arguments, stdio inherited. Used for hook
/// scripts that receive positional arguments.
pub fn run_program<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: &Path) -> Result<bool> {
    let rendered = args
        .iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {} {}", style("$").dim(), style(format!("{program} {rendered}")).color256(214));
    let status = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .env("FORCE_COLOR", "3")
        .status()
        .with_context(|| format!("failed spawning `{program}`"))?;
    Ok(status.success())
}

/// Run a shell command silently, capturing stdout for parsing.
pub fn run_captured(command: &str, cwd: &Path) -> Result<CapturedOutput> {
    let (shell, flag) = shell_invocation();
    let output = Command::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed spawning `{command}`"))?;
    Ok(CapturedOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
}

/// Known IDE names and the executables that launch them. Anything else is
/// treated as a literal command.
const IDE_COMMANDS: &[(&str, &str)] = &[
    ("cursor", "cursor"),
    ("code", "code"),
    ("windsurf", "windsurf"),
    ("trae", "trae"),
];

pub fn resolve_ide_command(ide: &str) -> String {
    let lowered = ide.to_lowercase();
    IDE_COMMANDS
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, cmd)| (*cmd).to_string())
        .unwrap_or_else(|| ide.to_string())
}

/// Launch the configured IDE on `path`, detached from our stdio.
pub fn open_with_ide(ide: &str, path: &Path) -> Result<()> {
    let command = resolve_ide_command(ide);
    let status = Command::new(&command)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(Error::IdeLaunch { ide: ide.to_string(), command }.into()),
    }
}

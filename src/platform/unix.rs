//! Unix (macOS, Linux) privileged hosts writer.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{write_temp_copy, HostsWriter, WriteError};

/// Copies a temp file over the hosts file, elevating when needed:
/// running as root copies directly, cached sudo credentials use
/// `sudo -n cp`, otherwise `osascript` (macOS) or `pkexec` (Linux) prompts.
pub struct ElevatedHostsWriter {
    path: PathBuf,
}

impl ElevatedHostsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn copy_elevated(&self, temp: &Path) -> Result<(), WriteError> {
        if unsafe { libc::geteuid() } == 0 {
            std::fs::copy(temp, &self.path)?;
            return Ok(());
        }

        let src = temp.to_string_lossy();
        let dest = self.path.to_string_lossy();

        if sudo_cached() {
            tracing::debug!("using cached sudo credentials");
            let out = Command::new("sudo")
                .args(["-n", "cp", src.as_ref(), dest.as_ref()])
                .output()?;
            return check(out, &self.path);
        }

        prompt_copy(&src, &dest, &self.path)
    }
}

#[cfg(target_os = "macos")]
fn prompt_copy(src: &str, dest: &str, path: &Path) -> Result<(), WriteError> {
    let script = format!(
        "do shell script \"cp '{}' '{}'\" with administrator privileges with prompt \"hostsman needs permission to modify the hosts file.\"",
        src.replace('"', "\\\""),
        dest.replace('"', "\\\"")
    );
    let out = Command::new("osascript").args(["-e", &script]).output()?;
    if String::from_utf8_lossy(&out.stderr).contains("User canceled") {
        return Err(WriteError::Cancelled);
    }
    check(out, path)
}

#[cfg(not(target_os = "macos"))]
fn prompt_copy(src: &str, dest: &str, path: &Path) -> Result<(), WriteError> {
    let out = Command::new("pkexec").args(["cp", src, dest]).output()?;
    // pkexec: 126 = dialog dismissed, 127 = not authorized
    match out.status.code() {
        Some(126) => Err(WriteError::Cancelled),
        Some(127) => Err(WriteError::PermissionDenied(path.to_path_buf())),
        _ => check(out, path),
    }
}

impl HostsWriter for ElevatedHostsWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_hosts(&self, content: &str) -> Result<(), WriteError> {
        let temp = write_temp_copy(content)?;
        let result = self.copy_elevated(temp.path());
        if let Err(e) = temp.close() {
            tracing::warn!("could not remove temp file: {e}");
        }
        result
    }
}

/// `sudo -n true` succeeds without prompting.
fn sudo_cached() -> bool {
    Command::new("sudo")
        .args(["-n", "true"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn check(out: Output, path: &Path) -> Result<(), WriteError> {
    if out.status.success() {
        return Ok(());
    }
    let stderr = String::from_utf8_lossy(&out.stderr);
    if stderr.contains("Permission denied") {
        return Err(WriteError::PermissionDenied(path.to_path_buf()));
    }
    Err(WriteError::Failed(format!(
        "{} ({})",
        stderr.trim(),
        out.status
    )))
}

//! Windows hosts writer.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{write_temp_copy, HostsWriter, WriteError};

/// Copies a temp file over the hosts file with `copy /Y`. The process must
/// already run elevated; there is no prompt to cancel.
pub struct WindowsHostsWriter {
    path: PathBuf,
}

impl WindowsHostsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostsWriter for WindowsHostsWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_hosts(&self, content: &str) -> Result<(), WriteError> {
        let temp = write_temp_copy(content)?;
        let out = Command::new("cmd")
            .args(["/C", "copy", "/Y"])
            .arg(temp.path())
            .arg(&self.path)
            .output()?;
        drop(temp);
        if out.status.success() {
            return Ok(());
        }
        let stdout = String::from_utf8_lossy(&out.stdout);
        if stdout.contains("Access is denied") {
            return Err(WriteError::PermissionDenied(self.path.clone()));
        }
        Err(WriteError::Failed(stdout.trim().to_string()))
    }
}

//! Platform abstraction for reading and (privileged) writing of the hosts file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

/// Why a hosts write did not happen.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The user dismissed the elevation prompt.
    #[error("operation cancelled by user")]
    Cancelled,
    #[error("permission denied writing {}", .0.display())]
    PermissionDenied(PathBuf),
    #[error("privileged write failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WriteError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, WriteError::Cancelled)
    }
}

/// Trait for hosts file access. Writers persist a full replacement text,
/// requesting elevated credentials if they need to.
pub trait HostsWriter: Send + Sync {
    /// Path of the hosts file this writer targets.
    fn path(&self) -> &Path;

    /// Read the current hosts text.
    fn read_hosts(&self) -> std::io::Result<String> {
        std::fs::read_to_string(self.path())
    }

    /// Replace the hosts file with `content`.
    fn write_hosts(&self, content: &str) -> Result<(), WriteError>;
}

/// System hosts file location.
pub fn system_hosts_path() -> PathBuf {
    #[cfg(windows)]
    return PathBuf::from(r"C:\Windows\System32\drivers\etc\hosts");

    #[cfg(not(windows))]
    return PathBuf::from("/etc/hosts");
}

/// Get platform HostsWriter for `path`.
/// If HOSTSMAN_HOSTS_FILE is set (e.g. in tests), uses FileHostsWriter with that path.
pub fn default_hosts_writer(path: &Path) -> Box<dyn HostsWriter> {
    if let Ok(p) = std::env::var("HOSTSMAN_HOSTS_FILE") {
        return Box::new(FileHostsWriter::new(p));
    }
    #[cfg(unix)]
    return Box::new(unix::ElevatedHostsWriter::new(path));

    #[cfg(windows)]
    return Box::new(windows::WindowsHostsWriter::new(path));
}

/// HostsWriter that reads/writes a file at the given path without elevation.
#[derive(Clone)]
pub struct FileHostsWriter {
    path: PathBuf,
}

impl FileHostsWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HostsWriter for FileHostsWriter {
    fn path(&self) -> &Path {
        &self.path
    }

    fn write_hosts(&self, content: &str) -> Result<(), WriteError> {
        match std::fs::write(&self.path, content) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                Err(WriteError::PermissionDenied(self.path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Write `content` to a new, exclusively created file in the temp dir.
/// The file is removed when the handle drops, so hold it until the copy
/// over the target has finished.
pub(crate) fn write_temp_copy(content: &str) -> std::io::Result<NamedTempFile> {
    let mut temp = tempfile::Builder::new().prefix("hostsman_").tempfile()?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    Ok(temp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_copy_holds_content_until_dropped() {
        let temp = write_temp_copy("10.0.0.1 a.test\n").unwrap();
        let path = temp.path().to_path_buf();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("hostsman_"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "10.0.0.1 a.test\n");
        drop(temp);
        assert!(!path.exists());
    }

    #[test]
    fn temp_copies_never_share_a_path() {
        let a = write_temp_copy("a").unwrap();
        let b = write_temp_copy("b").unwrap();
        assert_ne!(a.path(), b.path());
    }
}

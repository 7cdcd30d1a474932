//! Hosts file text model: parse raw text into entries and apply line edits.
//!
//! Nothing here touches the filesystem. Callers read the text, run a
//! mutation on a [`HostsFile`], and hand the rendered text to a
//! [`crate::platform::HostsWriter`].

mod file;
mod line;

pub use file::{EntryEdit, HostsFile};
pub use line::{active_content, classify, starts_with_dotted_quad, ParsedLine};

/// One hostname mapping taken from one physical line.
///
/// A line listing several hostnames yields one `Entry` per hostname, all
/// sharing `address`, `comment`, `enabled` and `line`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Entry {
    pub address: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub enabled: bool,
    /// 1-based line number; only valid for the text this entry was parsed from.
    pub line: usize,
}

/// Edit target could not be located in the current text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostsError {
    #[error("line {line} is out of range (file has {len} lines)")]
    LineOutOfRange { line: usize, len: usize },
    #[error("line {line} is not a host entry")]
    NotAnEntry { line: usize },
    #[error("host entry not found: {address} {hostname}")]
    EntryNotFound { address: String, hostname: String },
}

/// Parse hosts text into entries. Lines that are not entries are skipped.
pub fn parse(text: &str) -> Vec<Entry> {
    HostsFile::parse(text).entries()
}

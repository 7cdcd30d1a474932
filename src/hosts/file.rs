//! Line arena over the full hosts text and the edits applied to it.

use std::fmt;

use super::line::{active_content, classify, ParsedLine};
use super::{Entry, HostsError};

/// Physical lines of a hosts file, split on `\n`.
///
/// Rendering with `to_string()` joins on `\n` again, so text parsed and
/// rendered without edits is byte-identical, trailing newline included.
/// Every edit looks lines up in the current arena; line numbers taken from
/// an earlier [`HostsFile::entries`] call go stale after an insert or delete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsFile {
    lines: Vec<String>,
}

/// New values for an entry being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryEdit {
    pub address: String,
    pub hostname: String,
    pub comment: Option<String>,
}

impl HostsFile {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line by 1-based number.
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(String::as_str)
    }

    /// All entries in file order.
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            let Some(parsed) = classify(line) else {
                continue;
            };
            for hostname in &parsed.hostnames {
                entries.push(Entry {
                    address: parsed.address.clone(),
                    hostname: hostname.clone(),
                    comment: parsed.comment.clone(),
                    enabled: parsed.enabled,
                    line: i + 1,
                });
            }
        }
        entries
    }

    /// First entry mapping `hostname` to `address`.
    pub fn find_entry(&self, address: &str, hostname: &str) -> Option<Entry> {
        self.entries()
            .into_iter()
            .find(|e| e.address == address && e.hostname == hostname)
    }

    /// Flip one physical line between enabled and commented out.
    /// Returns the new enabled state.
    pub fn toggle_line(&mut self, number: usize) -> Result<bool, HostsError> {
        let i = self.index(number)?;
        Ok(self.flip(i))
    }

    /// Flip the first line naming `hostname` for `address`.
    pub fn toggle_entry(&mut self, address: &str, hostname: &str) -> Result<bool, HostsError> {
        let (i, _) = self.find_line(address, hostname)?;
        Ok(self.flip(i))
    }

    /// Force every line naming `hostname` for `address` on or off, so a
    /// duplicated mapping cannot keep resolving. Returns whether the text changed.
    pub fn set_entry_enabled(
        &mut self,
        address: &str,
        hostname: &str,
        enabled: bool,
    ) -> Result<bool, HostsError> {
        let matching: Vec<(usize, bool)> = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, l)| classify(l).map(|p| (i, p)))
            .filter(|(_, p)| p.names(address, hostname))
            .map(|(i, p)| (i, p.enabled))
            .collect();
        if matching.is_empty() {
            return Err(not_found(address, hostname));
        }
        let mut changed = false;
        for (i, state) in matching {
            if state != enabled {
                self.flip(i);
                changed = true;
            }
        }
        Ok(changed)
    }

    /// Enable every line of the `address` group that names `hostname` and
    /// disable the rest of the group. Lines outside the group are untouched.
    /// Returns the number of lines changed.
    pub fn enable_only(&mut self, address: &str, hostname: &str) -> Result<usize, HostsError> {
        let group: Vec<(usize, ParsedLine)> = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, l)| classify(l).map(|p| (i, p)))
            .filter(|(_, p)| p.address == address)
            .collect();
        if !group.iter().any(|(_, p)| p.names(address, hostname)) {
            return Err(not_found(address, hostname));
        }

        let mut changed = 0;
        for (i, parsed) in group {
            let target = parsed.hostnames.iter().any(|h| h == hostname);
            let line = &self.lines[i];
            let updated = match (target, parsed.enabled) {
                (true, false) => active_content(line).0.to_string(),
                (false, true) => comment_out(line),
                _ => continue,
            };
            self.lines[i] = updated;
            changed += 1;
        }
        Ok(changed)
    }

    /// Append `address<TAB>hostname` (plus `<TAB># comment`) as the last line.
    /// A trailing newline stays at the end of the text. Returns the new line number.
    pub fn insert_entry(&mut self, address: &str, hostname: &str, comment: Option<&str>) -> usize {
        let line = format_line(address, &[hostname], comment);
        match self.lines.last() {
            Some(last) if last.is_empty() => {
                let at = self.lines.len() - 1;
                self.lines.insert(at, line);
                at + 1
            }
            _ => {
                self.lines.push(line);
                self.lines.len()
            }
        }
    }

    /// Rewrite a whole physical line with a single mapping. Any other
    /// hostnames that were on the line are dropped.
    pub fn replace_line(
        &mut self,
        number: usize,
        address: &str,
        hostname: &str,
        comment: Option<&str>,
        enabled: bool,
    ) -> Result<(), HostsError> {
        let i = self.index(number)?;
        let line = format_line(address, &[hostname], comment);
        self.lines[i] = if enabled { line } else { comment_out(&line) };
        Ok(())
    }

    /// Change one entry on line `number` without touching the other
    /// hostnames that share the line.
    ///
    /// If the address or comment changes on a shared line, the edited
    /// hostname moves to a new line directly below. Returns the line number
    /// now holding the edited entry.
    pub fn edit_entry(
        &mut self,
        number: usize,
        hostname: &str,
        edit: &EntryEdit,
    ) -> Result<usize, HostsError> {
        let i = self.index(number)?;
        let parsed = classify(&self.lines[i]).ok_or(HostsError::NotAnEntry { line: number })?;
        let Some(pos) = parsed.hostnames.iter().position(|h| h == hostname) else {
            return Err(not_found(&parsed.address, hostname));
        };
        let comment = edit.comment.as_deref().filter(|c| !c.is_empty());

        if parsed.hostnames.len() == 1 {
            self.replace_line(number, &edit.address, &edit.hostname, comment, parsed.enabled)?;
            return Ok(number);
        }

        let mut hostnames = parsed.hostnames.clone();
        if edit.address == parsed.address && comment == parsed.comment.as_deref() {
            hostnames[pos] = edit.hostname.clone();
            self.lines[i] = render(&parsed.address, &hostnames, comment, parsed.enabled);
            return Ok(number);
        }

        hostnames.remove(pos);
        self.lines[i] = render(
            &parsed.address,
            &hostnames,
            parsed.comment.as_deref(),
            parsed.enabled,
        );
        let moved = render(&edit.address, &[edit.hostname.as_str()], comment, parsed.enabled);
        self.lines.insert(i + 1, moved);
        Ok(number + 1)
    }

    /// Remove one physical line.
    pub fn delete_line(&mut self, number: usize) -> Result<String, HostsError> {
        let i = self.index(number)?;
        Ok(self.lines.remove(i))
    }

    /// Remove one mapping. A line left without hostnames is deleted; siblings
    /// on a shared line are kept.
    pub fn remove_entry(&mut self, address: &str, hostname: &str) -> Result<(), HostsError> {
        let (i, parsed) = self.find_line(address, hostname)?;
        let remaining: Vec<&String> = parsed.hostnames.iter().filter(|h| *h != hostname).collect();
        if remaining.is_empty() {
            self.lines.remove(i);
        } else {
            self.lines[i] = render(
                &parsed.address,
                &remaining,
                parsed.comment.as_deref(),
                parsed.enabled,
            );
        }
        Ok(())
    }

    fn index(&self, number: usize) -> Result<usize, HostsError> {
        if number == 0 || number > self.lines.len() {
            return Err(HostsError::LineOutOfRange {
                line: number,
                len: self.lines.len(),
            });
        }
        Ok(number - 1)
    }

    fn find_line(&self, address: &str, hostname: &str) -> Result<(usize, ParsedLine), HostsError> {
        self.lines
            .iter()
            .enumerate()
            .find_map(|(i, l)| classify(l).filter(|p| p.names(address, hostname)).map(|p| (i, p)))
            .ok_or_else(|| not_found(address, hostname))
    }

    fn flip(&mut self, i: usize) -> bool {
        let line = &self.lines[i];
        let (updated, enabled) = if line.trim_start().starts_with('#') {
            (uncomment(line), true)
        } else {
            (comment_out(line), false)
        };
        self.lines[i] = updated;
        enabled
    }
}

impl fmt::Display for HostsFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

fn not_found(address: &str, hostname: &str) -> HostsError {
    HostsError::EntryNotFound {
        address: address.to_string(),
        hostname: hostname.to_string(),
    }
}

fn comment_out(line: &str) -> String {
    format!("# {}", line.trim())
}

/// Strip leading whitespace, the `#`, and whitespace after it.
fn uncomment(line: &str) -> String {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('#') {
        Some(rest) => rest.trim_start().to_string(),
        None => line.to_string(),
    }
}

fn format_line<S: AsRef<str>>(address: &str, hostnames: &[S], comment: Option<&str>) -> String {
    let names: Vec<&str> = hostnames.iter().map(AsRef::as_ref).collect();
    match comment.filter(|c| !c.is_empty()) {
        Some(c) => format!("{address}\t{}\t# {c}", names.join(" ")),
        None => format!("{address}\t{}", names.join(" ")),
    }
}

fn render<S: AsRef<str>>(
    address: &str,
    hostnames: &[S],
    comment: Option<&str>,
    enabled: bool,
) -> String {
    let line = format_line(address, hostnames, comment);
    if enabled {
        line
    } else {
        comment_out(&line)
    }
}

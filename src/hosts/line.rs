//! Classification of a single physical line.

use std::net::IpAddr;

/// A physical line read as an address followed by hostnames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub enabled: bool,
    pub address: String,
    pub hostnames: Vec<String>,
    pub comment: Option<String>,
}

impl ParsedLine {
    /// True when this line maps `hostname` to `address` (token-exact).
    pub fn names(&self, address: &str, hostname: &str) -> bool {
        self.address == address && self.hostnames.iter().any(|h| h == hostname)
    }
}

/// Trimmed line with a leading `#` removed, plus whether it was commented.
pub fn active_content(line: &str) -> (&str, bool) {
    let trimmed = line.trim();
    match trimmed.strip_prefix('#') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed, false),
    }
}

/// Whether `text` starts with a dotted quad (`1.2.3.4`) followed by whitespace.
///
/// Used to tell disabled entries apart from prose comments.
pub fn starts_with_dotted_quad(text: &str) -> bool {
    match text.find(char::is_whitespace) {
        Some(end) => is_dotted_quad(&text[..end]),
        None => false,
    }
}

/// Whether the first token of `text` is an address a disabled entry may
/// carry: a dotted quad or anything `IpAddr` parses (IPv6 included).
fn starts_with_address(text: &str) -> bool {
    starts_with_dotted_quad(text)
        || text
            .split_once(char::is_whitespace)
            .is_some_and(|(token, _)| token.parse::<IpAddr>().is_ok())
}

fn is_dotted_quad(token: &str) -> bool {
    let mut parts = 0;
    for part in token.split('.') {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts == 4
}

/// Classify one physical line. Returns `None` for blank lines, prose
/// comments, and lines without at least one hostname.
pub fn classify(line: &str) -> Option<ParsedLine> {
    let (active, commented) = active_content(line);
    if active.is_empty() {
        return None;
    }
    if commented && !starts_with_address(active) {
        return None;
    }

    let split = active.find(char::is_whitespace)?;
    let address = &active[..split];
    let rest = active[split..].trim_start();

    let (names, comment) = match rest.split_once('#') {
        Some((names, comment)) => (names, Some(comment.trim())),
        None => (rest, None),
    };
    let hostnames: Vec<String> = names.split_whitespace().map(String::from).collect();
    if hostnames.is_empty() {
        return None;
    }

    Some(ParsedLine {
        enabled: !commented,
        address: address.to_string(),
        hostnames,
        comment: comment.filter(|c| !c.is_empty()).map(String::from),
    })
}

//! Input validation for addresses and hostnames typed by the user.
//!
//! Parsing never validates; only new values entering the file do.

use anyhow::Result;
use std::net::IpAddr;

/// Validate an IPv4 or IPv6 address.
pub fn validate_address(address: &str) -> Result<()> {
    if address.parse::<IpAddr>().is_err() {
        anyhow::bail!("invalid IP address: {address:?}");
    }
    Ok(())
}

/// Validate hostname format (RFC 1123 labels).
pub fn validate_hostname(hostname: &str) -> Result<()> {
    if hostname.is_empty() {
        anyhow::bail!("hostname cannot be empty");
    }
    if hostname.len() > 253 {
        anyhow::bail!("invalid hostname: longer than 253 characters");
    }
    if hostname.contains("..") {
        anyhow::bail!("invalid hostname: consecutive dots");
    }
    for label in hostname.split('.') {
        if label.is_empty() {
            anyhow::bail!("invalid hostname: empty label");
        }
        if label.len() > 63 {
            anyhow::bail!("invalid hostname: label {label:?} longer than 63 characters");
        }
        for c in label.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' {
                anyhow::bail!("invalid hostname: illegal char {c:?}");
            }
        }
        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!("invalid hostname: label cannot start/end with hyphen");
        }
    }
    Ok(())
}

/// Validate a comment: it must stay on one line.
pub fn validate_comment(comment: &str) -> Result<()> {
    if comment.contains(['\n', '\r']) {
        anyhow::bail!("comment must be a single line");
    }
    Ok(())
}

//! Logical and physical path helpers

use crate::error::{LinkError, Result};

/// Normalize a project-relative directory reference
///
/// Backslashes become forward slashes, repeated separators collapse, and
/// `.` segments plus leading/trailing separators are dropped, so
/// `.\outputs\cultivos\` and `outputs//cultivos` both yield `outputs/cultivos`.
pub fn normalize_logical(raw: &str) -> String {
    raw.trim()
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalize a logical path and reject shapes that cannot live under the project root
pub fn validate_logical(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') || trimmed.starts_with('\\') || is_absolute_like(trimmed) {
        return Err(LinkError::InvalidLogical(format!(
            "'{trimmed}' must be relative to the project root"
        )));
    }

    let normalized = normalize_logical(trimmed);
    if normalized.is_empty() {
        return Err(LinkError::InvalidLogical("path is empty".to_string()));
    }
    if normalized.split('/').any(|segment| segment == "..") {
        return Err(LinkError::InvalidLogical(format!(
            "'{normalized}' must not leave the project root"
        )));
    }
    if let Some(ch) = normalized.chars().find(|ch| RESERVED_CHARS.contains(ch)) {
        return Err(LinkError::InvalidLogical(format!(
            "'{normalized}' contains '{ch}', which Windows paths cannot hold"
        )));
    }
    Ok(normalized)
}

/// Characters Windows rejects in file and directory names
pub const RESERVED_CHARS: &[char] = &[':', '|', '"', '<', '>', '*', '?'];

/// Case-insensitive logical path comparison, as NTFS resolves them
pub fn same_logical(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Whether a target looks absolute on either a POSIX or a Windows host
pub fn is_absolute_like(target: &str) -> bool {
    let bytes = target.as_bytes();
    if target.starts_with('/') || target.starts_with("\\\\") {
        return true;
    }
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// Clean operator input for a physical target
///
/// Strips whitespace and one pair of surrounding quotes, as produced by
/// "Copy as path" in Explorer.
pub fn clean_target(input: &str) -> &str {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return trimmed[1..trimmed.len() - 1].trim();
        }
    }
    trimmed
}

/// Validate a physical target for a logical path
pub fn validate_target(logical: &str, input: &str) -> Result<String> {
    let target = clean_target(input);
    if target.is_empty() {
        return Err(LinkError::invalid_target(logical, "target path is empty"));
    }
    if !is_absolute_like(target) {
        return Err(LinkError::invalid_target(
            logical,
            format!("'{target}' is not an absolute path"),
        ));
    }
    Ok(target.to_string())
}

/// Convert a normalized logical path to Windows separators
pub fn to_windows(logical: &str) -> String {
    logical.replace('/', "\\")
}

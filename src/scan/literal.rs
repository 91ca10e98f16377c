//! String-literal scanning for output directory references

use crate::error::Result;
use crate::util::{RESERVED_CHARS, normalize_logical};
use regex::Regex;

/// Characters that mark the rest of a literal as dynamic
const DYNAMIC_MARKS: &[char] = &['{', '}', '*', '?', '%', '<', '>'];

/// Finds quoted literals whose first segment is one of the root markers
pub struct LiteralScanner {
    pattern: Regex,
}

impl LiteralScanner {
    pub fn new<S: AsRef<str>>(root_markers: &[S]) -> Result<Self> {
        let markers = root_markers
            .iter()
            .map(|m| regex::escape(m.as_ref()))
            .collect::<Vec<_>>()
            .join("|");

        // Either quote style; optional leading `./`; marker as a whole segment.
        let double = format!(r#""((?:\.[\\/]+)?(?:{markers})(?:[\\/][^"\r\n]*)?)""#);
        let single = format!(r#"'((?:\.[\\/]+)?(?:{markers})(?:[\\/][^'\r\n]*)?)'"#);
        let pattern = Regex::new(&format!("{double}|{single}"))?;

        Ok(Self { pattern })
    }

    /// Logical directory paths referenced in `content`, in order of appearance
    pub fn scan(&self, content: &str) -> Vec<String> {
        let mut found = Vec::new();
        for caps in self.pattern.captures_iter(content) {
            let Some(raw) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            if let Some(logical) = shape_literal(raw.as_str())
                && !found.contains(&logical)
            {
                found.push(logical);
            }
        }
        found
    }
}

/// Reduce a matched literal to the directory it names
///
/// Dynamic segments and anything after them are dropped, as is a trailing
/// file name. A literal naming only the marker root yields `None`, and so
/// does one with whitespace or reserved characters in a kept segment, which
/// is a message rather than a path.
pub fn shape_literal(raw: &str) -> Option<String> {
    let normalized = normalize_logical(raw);
    let mut segments: Vec<&str> = normalized
        .split('/')
        .take_while(|segment| *segment != ".." && !segment.contains(DYNAMIC_MARKS))
        .collect();

    if segments
        .iter()
        .any(|segment| segment.contains(char::is_whitespace) || segment.contains(RESERVED_CHARS))
    {
        return None;
    }

    if segments.len() > 1 && segments.last().is_some_and(|s| looks_like_file(s)) {
        segments.pop();
    }

    if segments.len() < 2 {
        return None;
    }
    Some(segments.join("/"))
}

fn looks_like_file(segment: &str) -> bool {
    match segment.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

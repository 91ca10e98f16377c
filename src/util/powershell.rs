/// PowerShell quoting utilities
pub struct PsEscape;

impl PsEscape {
    /// Quote as a single-quoted literal (no variable expansion)
    /// Escapes: ' and its typographic variants by doubling
    pub fn single_quoted(text: &str) -> String {
        let mut quoted = String::with_capacity(text.len() + 2);
        quoted.push('\'');
        for ch in text.chars() {
            if matches!(ch, '\'' | '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}') {
                quoted.push(ch);
            }
            quoted.push(ch);
        }
        quoted.push('\'');
        quoted
    }

    /// Make text safe inside a `#` comment line
    pub fn comment(text: &str) -> String {
        text.replace(['\r', '\n'], " ")
    }
}

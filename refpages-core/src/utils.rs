//! Shared text helpers for page generation.

/// Split text into lines, dropping a trailing line terminator.
///
/// Text without any newline yields itself, so an empty string yields one
/// empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return vec![""];
    }
    text.lines().collect()
}

/// Backslash-escape `<` and `>` so a name can be used as a link label.
pub fn escape_angle_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Double every `"` so the text can sit inside a quoted CSV cell.
pub fn csv_escape(s: &str) -> String {
    s.replace('"', "\"\"")
}

/// A `#` rule as long as `title`, in characters.
pub fn title_rule(title: &str) -> String {
    "#".repeat(title.chars().count())
}

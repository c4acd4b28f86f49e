//! Text normalisation for help-output assertions.

/// Trims trailing whitespace from every line and drops trailing blank lines.
#[must_use]
pub fn normalize_lines(value: &str) -> String {
    let mut lines: Vec<&str> = value.lines().map(str::trim_end).collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Collapses runs of spaces so assertions ignore column padding.
#[must_use]
pub fn collapse_spaces(value: &str) -> String {
    value.split(' ').filter(|part| !part.is_empty()).collect::<Vec<_>>().join(" ")
}

//! Pure projection from progress counters to visible text.

/// Render the visible portion of an instance: every fully completed line,
/// then the `char_index`-character prefix of the current line while
/// `line_index` is still in range.
///
/// The result always contains at least one (possibly empty) line so the
/// trailing cursor has a line to attach to. Indices count characters, not
/// bytes, so multi-byte text reveals cleanly.
pub fn visible_text(lines: &[String], line_index: usize, char_index: usize) -> String {
    let safe_line_index = line_index.min(lines.len());
    let mut parts: Vec<&str> = lines[..safe_line_index]
        .iter()
        .map(|line| line.as_str())
        .collect();

    let active: Option<String> = (line_index < lines.len())
        .then(|| lines[line_index].chars().take(char_index).collect());
    if let Some(ref active) = active {
        parts.push(active);
    }

    if parts.is_empty() {
        parts.push("");
    }

    parts.join("\n")
}

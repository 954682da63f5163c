/// Strip a leading ```json / ``` fence marker and a trailing ``` marker when
/// they sit at the very start/end of the trimmed text.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let clean = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        trimmed
    };
    let clean = clean.strip_suffix("```").unwrap_or(clean);
    clean.trim()
}

/// Locate the substring most likely to be a complete JSON value.
///
/// Scans from the earliest `{` or `[` with a delimiter stack so the close of
/// the initially opened bracket is found even with arbitrary nesting; naive
/// first/last-brace matching picks the wrong end when trailing prose contains
/// brace characters. A scan that never closes (truncated output) yields the
/// tail from the start index so the repair stage can still attempt it. Text
/// with no opening delimiter is returned unchanged.
pub fn locate_structured_text(raw: &str) -> &str {
    let clean = strip_code_fences(raw);

    let start = match clean.char_indices().find(|(_, c)| *c == '{' || *c == '[') {
        Some((i, _)) => i,
        None => return clean,
    };

    let mut stack: Vec<char> = Vec::new();
    for (i, c) in clean[start..].char_indices() {
        match c {
            '{' | '[' => stack.push(c),
            '}' | ']' => {
                if !stack.is_empty() {
                    stack.pop();
                    if stack.is_empty() {
                        return &clean[start..start + i + c.len_utf8()];
                    }
                }
            }
            _ => {}
        }
    }

    &clean[start..]
}

use crate::constants::TRUNCATION_MARKER;

/// Zero-width characters models occasionally emit around copied text
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

/// Strips code-fence delimiter lines, null bytes, and zero-width characters
/// from model output. Content inside fences is kept; only the ``` delimiter
/// lines are dropped.
pub fn clean_model_output(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            continue;
        }
        for c in line.chars() {
            if c == '\0' || ZERO_WIDTH.contains(&c) {
                continue;
            }
            out.push(c);
        }
        out.push('\n');
    }

    out.trim().to_string()
}

/// Caps output at `max_chars` chars, appending the truncation marker when
/// anything was cut. Truncation is a visible transformation, not an error.
pub fn truncate_output(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut truncated = text[..byte_idx].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => text.to_string(),
    }
}

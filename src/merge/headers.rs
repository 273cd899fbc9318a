//! Markdown header detection, level rewriting and table-of-contents lines.
//!
//! Headers are found by a textual scan: a line whose trimmed content starts
//! with a run of `#` characters. There is no markdown grammar here, so `#`
//! lines inside fenced code blocks count as headers too.

/// Deepest heading level markdown supports.
pub const MAX_LEVEL: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub level: usize,
    pub text: String,
}

/// Splits a header line into its `#` run length and trimmed text.
fn parse_header_line(line: &[u8]) -> Option<(usize, &[u8])> {
    let trimmed = line.trim_ascii();
    let level = trimmed.iter().take_while(|&&b| b == b'#').count();
    (level > 0).then(|| (level, trimmed[level..].trim_ascii()))
}

/// Collects headers no deeper than `max_depth`, in document order.
pub fn extract_headers(content: &str, max_depth: usize) -> Vec<HeaderEntry> {
    content
        .split('\n')
        .filter_map(|line| parse_header_line(line.as_bytes()))
        .filter(|(level, _)| *level <= max_depth)
        .map(|(level, text)| HeaderEntry {
            level,
            text: String::from_utf8_lossy(text).into_owned(),
        })
        .collect()
}

/// Level a header of `level` is emitted at under `base_level`.
pub const fn shifted_level(level: usize, base_level: usize) -> usize {
    let shifted = base_level + level - 1;
    if shifted > MAX_LEVEL {
        MAX_LEVEL
    } else {
        shifted
    }
}

/// Shifts every header so that level 1 becomes `base_level`.
///
/// The new level is computed from the `#` run currently on the line, so
/// rewriting twice shifts twice. Non-header lines are copied verbatim.
pub fn rewrite_header_levels(content: &str, base_level: usize) -> String {
    String::from_utf8_lossy(&rewrite_header_bytes(content.as_bytes(), base_level)).into_owned()
}

/// Byte-level [`rewrite_header_levels`]. Text in any encoding passes through
/// untouched as long as `#`, space and newline are ASCII.
pub fn rewrite_header_bytes(content: &[u8], base_level: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 16);
    for (i, line) in content.split(|&b| b == b'\n').enumerate() {
        if i > 0 {
            out.push(b'\n');
        }
        match parse_header_line(line) {
            Some((level, text)) => {
                out.extend(std::iter::repeat_n(b'#', shifted_level(level, base_level)));
                if !text.is_empty() {
                    out.push(b' ');
                    out.extend_from_slice(text);
                }
            }
            None => out.extend_from_slice(line),
        }
    }
    out
}

/// Anchor slug for header text.
///
/// Lowercases, maps spaces and hyphens to `-` and drops anything outside
/// `[a-z0-9-]`. Identical texts produce identical slugs.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' | '-' => Some('-'),
            'a'..='z' | '0'..='9' => Some(c),
            _ => None,
        })
        .collect()
}

/// Renders the table-of-contents line for `header`, or `None` when the
/// header would sit deeper than `toc_depth + 1` once shifted by `base_level`
/// (the extra level accounts for the document title).
pub fn toc_line(header: &HeaderEntry, base_level: usize, toc_depth: usize) -> Option<String> {
    let adjusted = base_level + header.level - 1;
    if adjusted > toc_depth + 1 {
        return None;
    }
    let indent = "  ".repeat(adjusted.min(MAX_LEVEL).saturating_sub(2));
    Some(format!(
        "{indent}- [{}](#{})",
        header.text,
        slugify(&header.text)
    ))
}

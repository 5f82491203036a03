//! Escaping utilities for Markdown report output.
//!
//! Variable names and values come from the design file and may contain
//! characters with meaning in Markdown; escape them before embedding.

/// Escape a string for safe inclusion in a Markdown table cell.
///
/// # Examples
///
/// ```
/// use vartable::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("a|b"), "a\\|b");
/// assert_eq!(escape_markdown_table("line\nbreak"), "line break");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content such as
/// headings.
///
/// # Examples
///
/// ```
/// use vartable::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_escaping() {
        assert_eq!(escape_markdown_table("[x] | `y`"), "\\[x\\] \\| \\`y\\`");
        assert_eq!(escape_markdown_table("a\r\nb"), "a b");
    }

    #[test]
    fn test_inline_escaping() {
        assert_eq!(escape_markdown_inline("color_primary"), "color\\_primary");
        assert_eq!(escape_markdown_inline("# heading"), "\\# heading");
    }
}

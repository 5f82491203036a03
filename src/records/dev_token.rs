//! Developer token names derived from variable names.

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\s]+").expect("static regex"));

static INVALID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("static regex"));

/// Custom-property name for a variable, e.g. `color/primary/500` →
/// `color-primary-500`. Case is preserved.
#[must_use]
pub fn token_name(name: &str) -> String {
    let dashed = SEPARATOR_RUNS.replace_all(name, "-");
    INVALID_CHARS.replace_all(&dashed, "").into_owned()
}

/// CSS `var()` reference for a variable, e.g. `var(--color-primary-500)`.
#[must_use]
pub fn dev_token(name: &str) -> String {
    format!("var(--{})", token_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_token_from_path() {
        assert_eq!(dev_token("color/primary/500"), "var(--color-primary-500)");
    }

    #[test]
    fn test_dev_token_preserves_case() {
        assert_eq!(dev_token("Brand/Primary"), "var(--Brand-Primary)");
    }

    #[test]
    fn test_dev_token_collapses_separator_runs() {
        assert_eq!(dev_token("space / large  gap"), "var(--space-large-gap)");
        assert_eq!(dev_token("a//b"), "var(--a-b)");
    }

    #[test]
    fn test_dev_token_keeps_leading_and_trailing_separators() {
        assert_eq!(dev_token(" color/red"), "var(---color-red)");
        assert_eq!(dev_token("/odd/"), "var(---odd-)");
    }

    #[test]
    fn test_dev_token_strips_invalid_characters() {
        assert_eq!(dev_token("font/size (xl)"), "var(--font-size-xl)");
        assert_eq!(dev_token("émoji/✨ sparkle"), "var(--moji--sparkle)");
        assert_eq!(dev_token("snake_case-ok"), "var(--snake_case-ok)");
    }

    #[test]
    fn test_dev_token_is_idempotent() {
        let name = "color/primary/500";
        assert_eq!(dev_token(name), dev_token(name));
    }
}

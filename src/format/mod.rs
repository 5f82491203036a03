//! Cell formatting: display values to text, and swatch decisions.

use crate::model::{dashed_path, DisplayValue, Rgba, VariableType, PATH_SEPARATOR};
use std::fmt::Write as _;

/// Number of decimal places kept for non-integer numbers.
const NUMBER_PRECISION: usize = 3;
const PRECISION_SCALE: f64 = 1000.0;

/// Format a number for display.
///
/// Integers render without a decimal point; other values are rounded half
/// away from zero to three decimals, with trailing zeros (and a bare
/// trailing point) removed.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.fract() == 0.0 {
        // avoids "-0"
        return if value == 0.0 {
            "0".to_string()
        } else {
            format!("{value:.0}")
        };
    }

    // `{:.3}` alone rounds exact binary ties to even: 0.0625 would give 0.062
    let rounded = match (value * PRECISION_SCALE).round() / PRECISION_SCALE {
        r if r.is_finite() => r,
        _ => value,
    };
    let fixed = format!("{rounded:.prec$}", prec = NUMBER_PRECISION);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format a colour as uppercase `#RRGGBB`, with ` NN%` appended when an
/// alpha is present and not exactly 1.
#[must_use]
pub fn format_color(color: &Rgba) -> String {
    let [r, g, b, _] = color.to_bytes();
    let mut out = format!("#{r:02X}{g:02X}{b:02X}");
    if let Some(alpha) = color.a {
        if alpha != 1.0 {
            let percent = (alpha.clamp(0.0, 1.0) * 100.0).round() as u32;
            let _ = write!(out, " {percent}%");
        }
    }
    out
}

/// Final text for a cell.
#[must_use]
pub fn format_value(value: &DisplayValue, _var_type: VariableType) -> String {
    match value {
        DisplayValue::Empty => String::new(),
        DisplayValue::Alias(name) => name.clone(),
        DisplayValue::Text(text) if text.contains(PATH_SEPARATOR) => dashed_path(text),
        DisplayValue::Text(text) => text.clone(),
        DisplayValue::Number(n) => format_number(*n),
        DisplayValue::Boolean(b) => b.to_string(),
        DisplayValue::Color(color) => format_color(color),
    }
}

/// Colour to show as a swatch next to the cell text, if any.
///
/// Only colour variables get swatches. The alias-resolved colour wins over
/// a direct colour value.
#[must_use]
pub fn swatch_color(
    value: &DisplayValue,
    var_type: VariableType,
    resolved: Option<Rgba>,
) -> Option<Rgba> {
    if var_type != VariableType::Color {
        return None;
    }
    resolved.or_else(|| value.as_color().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.1000), "2.1");
        assert_eq!(format_number(2.12345), "2.123");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number(0.125), "0.125");
        assert_eq!(format_number(0.0001), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1_000_000.0), "1000000");
    }

    #[test]
    fn test_format_number_rounds_ties_away_from_zero() {
        assert_eq!(format_number(0.0625), "0.063");
        assert_eq!(format_number(0.1875), "0.188");
        assert_eq!(format_number(1.0625), "1.063");
        assert_eq!(format_number(2.5625), "2.563");
        assert_eq!(format_number(0.3125), "0.313");
        assert_eq!(format_number(-0.0625), "-0.063");
    }

    #[test]
    fn test_format_color() {
        assert_eq!(format_color(&Rgba::rgba(1.0, 1.0, 1.0, 1.0)), "#FFFFFF");
        assert_eq!(format_color(&Rgba::rgba(0.0, 0.0, 0.0, 0.5)), "#000000 50%");
        assert_eq!(format_color(&Rgba::rgb(1.0, 0.0, 0.0)), "#FF0000");
        assert_eq!(format_color(&Rgba::rgba(0.2, 0.4, 0.6, 0.333)), "#336699 33%");
    }

    #[test]
    fn test_format_value() {
        let t = VariableType::String;
        assert_eq!(format_value(&DisplayValue::Empty, t), "");
        assert_eq!(format_value(&DisplayValue::Text("a/b/c".into()), t), "a-b-c");
        assert_eq!(format_value(&DisplayValue::Text("Inter".into()), t), "Inter");
        assert_eq!(
            format_value(&DisplayValue::Boolean(false), VariableType::Boolean),
            "false"
        );
        assert_eq!(
            format_value(&DisplayValue::Alias("brand-primary".into()), VariableType::Color),
            "brand-primary"
        );
    }

    #[test]
    fn test_swatch_prefers_resolved_color() {
        let red = Rgba::rgb(1.0, 0.0, 0.0);
        let blue = Rgba::rgb(0.0, 0.0, 1.0);
        assert_eq!(
            swatch_color(&DisplayValue::Color(blue), VariableType::Color, Some(red)),
            Some(red)
        );
        assert_eq!(
            swatch_color(&DisplayValue::Color(blue), VariableType::Color, None),
            Some(blue)
        );
        assert_eq!(
            swatch_color(&DisplayValue::Alias("x".into()), VariableType::Color, None),
            None
        );
        assert_eq!(
            swatch_color(&DisplayValue::Color(blue), VariableType::String, Some(red)),
            None
        );
    }
}

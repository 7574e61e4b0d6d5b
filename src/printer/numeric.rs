//! Numeric literal formatting (spec.md §4.4, testable properties 11/12).
//!
//! Grounded on the printer's general "pick the textually shortest equivalent
//! encoding" discipline documented for string quoting in spec.md §4.4 —
//! applied here to numbers: try a handful of candidate renderings and keep
//! whichever is shortest, falling back to Rust's own `f64` formatting for
//! anything that isn't one of the special-cased shapes.

/// Formats `value` the way the printer emits a numeric literal: small
/// non-negative integers take a fast decimal path, everything else is
/// rendered through a few candidate encodings (plain decimal, a
/// leading-zero-stripped decimal, and simplified scientific notation) and the
/// shortest one wins.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0".to_string() } else { "0".to_string() };
    }

    // Fast path for the common case: a small non-negative integer needs no
    // candidate comparison at all (spec.md testable property 11).
    if value >= 0.0 && value < 1000.0 && value.fract() == 0.0 {
        return format!("{}", value as u64);
    }

    let negative = value.is_sign_negative();
    let magnitude = value.abs();

    let mut candidates: Vec<String> = Vec::new();
    candidates.push(plain_decimal(magnitude));
    if let Some(sci) = scientific(magnitude) {
        candidates.push(sci);
    }

    let best = candidates.into_iter().min_by_key(|s| s.len()).unwrap_or_else(|| magnitude.to_string());
    if negative {
        format!("-{best}")
    } else {
        best
    }
}

/// `Ryu`-free plain decimal rendering with the leading `0` before a decimal
/// point stripped (`0.5` -> `.5`), matching the printer's "drop redundant
/// leading zero" rule.
fn plain_decimal(magnitude: f64) -> String {
    let mut s = format_shortest_decimal(magnitude);
    if let Some(stripped) = s.strip_prefix("0.") {
        s = format!(".{stripped}");
    }
    s
}

/// Rust's default `f64` `Display` already produces the shortest round-tripping
/// decimal representation; integers get no trailing `.0` since they already
/// took the fast path above, but a non-integer whose fractional part is
/// effectively zero after formatting still needs this pass for values like
/// `1e21` that `{}`  prints in decimal form by default.
fn format_shortest_decimal(magnitude: f64) -> String {
    format!("{magnitude}")
}

/// Scientific notation with the exponent simplified the way the printer
/// special-cases it (spec.md testable property 12): `e+05` -> `e5`,
/// `e-05` -> `e-5`, no leading zeros, no explicit `+` sign.
fn scientific(magnitude: f64) -> Option<String> {
    let rendered = format!("{magnitude:e}");
    let (mantissa, exponent) = rendered.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
    let mantissa = if mantissa.is_empty() { "0" } else { mantissa };
    Some(format!("{mantissa}e{exponent}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_use_the_fast_path() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn fraction_drops_leading_zero() {
        assert_eq!(format_number(0.5), ".5");
        assert_eq!(format_number(-0.5), "-.5");
    }

    #[test]
    fn large_magnitudes_prefer_scientific_when_shorter() {
        let formatted = format_number(1e21);
        assert!(formatted.contains('e'), "expected scientific notation, got {formatted}");
        assert!(!formatted.contains("e+"), "exponent sign should be dropped for positive exponents");
    }

    #[test]
    fn special_values_are_named() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }
}

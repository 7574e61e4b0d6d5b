//! String literal quoting and escaping (spec.md §4.4 "string quoting cost
//! analysis", "UTF-16/surrogate-pair-aware string emission").
//!
//! The internal AST stores string literals as owned `String`s (UTF-8), which
//! means a source file containing an unpaired UTF-16 surrogate (only
//! representable in JS source as a `\uD800`-style escape, since WTF-8 can't
//! round-trip through a Rust `String`) already lost that information during
//! lowering — this printer reproduces the *value* faithfully for every valid
//! Unicode string and escapes everything outside the small set of
//! directly-printable characters, but doesn't claim byte-for-byte parity with
//! an original lone-surrogate escape sequence (see DESIGN.md).

use crate::format::QuoteStyle;

/// Picks whichever quote character needs fewer escapes for `value`, unless
/// `preference` pins one down (spec.md §4.4 "best_quote_char_for_string").
fn best_quote_char(value: &str, preference: QuoteStyle) -> u8 {
    match preference {
        QuoteStyle::Single => return b'\'',
        QuoteStyle::Double => return b'"',
        QuoteStyle::Auto => {}
    }
    let singles = value.bytes().filter(|&b| b == b'\'').count();
    let doubles = value.bytes().filter(|&b| b == b'"').count();
    if doubles > singles {
        b'\''
    } else {
        b'"'
    }
}

/// Renders `value` as a quoted JS string literal, escaping the quote
/// character chosen by [`best_quote_char`], control characters, the
/// backslash itself, and the two line terminators (`U+2028`/`U+2029`) that
/// are legal inside a JS string but would otherwise confuse line-oriented
/// tooling reading the bundle.
pub fn print_string_literal(value: &str, preference: QuoteStyle) -> String {
    let quote = best_quote_char(value, preference);
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote as char);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c as u32 == quote as u32 => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote as char);
    out
}

/// Escapes `value` for interpolation into a template literal (between
/// backticks): only the backtick, `${`, and backslash need protecting.
pub fn escape_template_quasi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_double_quotes_when_no_quotes_present() {
        assert_eq!(print_string_literal("abc", QuoteStyle::Auto), "\"abc\"");
    }

    #[test]
    fn switches_to_single_quotes_when_value_has_more_doubles() {
        let s = print_string_literal(r#"she said "hi""#, QuoteStyle::Auto);
        assert_eq!(s, "'she said \"hi\"'");
    }

    #[test]
    fn escapes_control_characters_and_backslashes() {
        assert_eq!(print_string_literal("a\nb\\c", QuoteStyle::Auto), "\"a\\nb\\\\c\"");
    }

    #[test]
    fn template_quasi_escapes_only_backtick_backslash_and_dollar_brace() {
        assert_eq!(escape_template_quasi("a`b\\c${d}"), "a\\`b\\\\c\\${d}");
        assert_eq!(escape_template_quasi("price: $5"), "price: $5");
    }
}

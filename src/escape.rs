//! CSS identifier escaping for synthesized selectors
//!
//! Ids are serialized the way `CSS.escape()` does it in browsers: every ASCII
//! character outside `[A-Za-z0-9_-]` gets a backslash, a leading digit is
//! hex-escaped and control characters are hex-escaped. Tag names only ever have
//! their `:` escaped.

use std::fmt::Write;

/// Escape a string so it can be used as a CSS identifier (e.g. after `#`).
pub fn escape_identifier(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    let first = ident.chars().next();
    let single = ident.chars().nth(1).is_none();

    for (i, c) in ident.chars().enumerate() {
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_hex_escape(&mut out, c),
            '0'..='9' if i == 0 => push_hex_escape(&mut out, c),
            '0'..='9' if i == 1 && first == Some('-') => push_hex_escape(&mut out, c),
            '-' if i == 0 && single => out.push_str("\\-"),
            c if !c.is_ascii() || c == '-' || c == '_' || c.is_ascii_alphanumeric() => {
                out.push(c)
            }
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }

    out
}

/// Escape a tag name for use as a type selector. Only `:` needs it, since it
/// shows up in namespaced and custom element names.
pub fn escape_tag_name(tag: &str) -> String {
    tag.replace(':', "\\:")
}

/// Reverse `escape_identifier` (and any other valid CSS escape sequence).
pub fn unescape_identifier(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let mut hex = String::new();
        while hex.len() < 6 {
            match chars.peek() {
                Some(h) if h.is_ascii_hexdigit() => {
                    hex.push(*h);
                    chars.next();
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            // Escaped literal; a trailing backslash has nothing to escape
            out.push(chars.next().unwrap_or('\u{FFFD}'));
            continue;
        }

        // One whitespace character terminates a hex escape
        if matches!(chars.peek(), Some(' ' | '\t' | '\n')) {
            chars.next();
        }

        let decoded = u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|&cp| cp != 0)
            .and_then(char::from_u32)
            .unwrap_or('\u{FFFD}');
        out.push(decoded);
    }

    out
}

fn push_hex_escape(out: &mut String, c: char) {
    // Writing to a String cannot fail
    let _ = write!(out, "\\{:x} ", c as u32);
}

#[cfg(test)]
#[path = "escape_test.rs"]
mod escape_test;

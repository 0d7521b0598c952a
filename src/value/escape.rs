//! String-literal escaping for the generated script.
//!
//! Output is always safe inside a double-quoted literal that itself sits
//! inside an inline `<script>` element: quotes, backslashes and control
//! characters are escaped, and so are `<`, `>`, `&` and `'` so a value can
//! never terminate the script tag.

use std::fmt::Write;

/// Escape `text` and wrap it in double quotes.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\'' | '<' | '>' | '&' => unicode_escape(&mut out, c),
            // U+2028/U+2029 terminate lines in older script engines.
            '\u{2028}' | '\u{2029}' => unicode_escape(&mut out, c),
            c if (c as u32) < 0x20 || c == '\u{7f}' => unicode_escape(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn unicode_escape(out: &mut String, c: char) {
    let _ = write!(out, "\\u{:04x}", c as u32);
}

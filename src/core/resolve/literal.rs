//! String literal formatting for rewritten arguments.

/// Quote character of a rewritten literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Single,
    Double,
}

impl QuoteStyle {
    /// Style of an existing argument token: single when it starts with `'`,
    /// double otherwise (including template literals and non-literals).
    pub fn of(token: &str) -> Self {
        if token.starts_with('\'') {
            Self::Single
        } else {
            Self::Double
        }
    }

    fn char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
        }
    }
}

/// Render `text` as a JS string literal in the given quote style.
///
/// Non-ASCII characters are kept as-is; control characters and the line
/// terminators JS does not allow inside a literal are escaped.
pub fn quote_literal(text: &str, style: QuoteStyle) -> String {
    let quote = style.char();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\0' => {
                // `\0` followed by a digit would read as a legacy octal escape.
                if chars.peek().is_some_and(|next| next.is_ascii_digit()) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            '\u{2028}' | '\u{2029}' | '\u{85}' => {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }

    out.push(quote);
    out
}

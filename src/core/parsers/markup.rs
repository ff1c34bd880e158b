//! Minimal HTML tag lexer shared by the component splitter and the template
//! compiler.
//!
//! Only opening tags are lexed here. Offsets are byte offsets into the text
//! passed in; every delimiter is ASCII so slicing stays on char boundaries.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAttribute {
    pub name: String,
    /// Attribute value and the byte offset where it starts.
    pub value: Option<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    pub attrs: Vec<RawAttribute>,
    /// Offset just past the closing `>` (or end of input if unterminated).
    pub end: usize,
    pub self_closing: bool,
}

impl OpenTag {
    pub fn attr(&self, name: &str) -> Option<&RawAttribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

fn is_tag_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.')
}

/// Whether `text[at..]` starts an opening tag (`<` followed by a letter).
pub fn is_open_tag_start(text: &str, at: usize) -> bool {
    let bytes = text.as_bytes();
    bytes.get(at) == Some(&b'<') && bytes.get(at + 1).is_some_and(u8::is_ascii_alphabetic)
}

/// Whether `text[at..]` starts a closing tag (`</` followed by a letter).
pub fn is_close_tag_start(text: &str, at: usize) -> bool {
    let bytes = text.as_bytes();
    bytes.get(at..).is_some_and(|rest| rest.starts_with(b"</"))
        && bytes.get(at + 2).is_some_and(u8::is_ascii_alphabetic)
}

/// Lex the opening tag starting at `at`.
pub fn read_open_tag(text: &str, at: usize) -> Option<OpenTag> {
    if !is_open_tag_start(text, at) {
        return None;
    }
    let bytes = text.as_bytes();
    let mut pos = at + 1;
    while pos < bytes.len() && is_tag_name_byte(bytes[pos]) {
        pos += 1;
    }
    let name = text[at + 1..pos].to_string();
    let mut attrs = Vec::new();

    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= bytes.len() {
            return Some(OpenTag {
                name,
                attrs,
                end: bytes.len(),
                self_closing: false,
            });
        }
        if bytes[pos] == b'>' {
            return Some(OpenTag {
                name,
                attrs,
                end: pos + 1,
                self_closing: false,
            });
        }
        if bytes[pos..].starts_with(b"/>") {
            return Some(OpenTag {
                name,
                attrs,
                end: pos + 2,
                self_closing: true,
            });
        }

        let name_start = pos;
        while pos < bytes.len()
            && !bytes[pos].is_ascii_whitespace()
            && bytes[pos] != b'='
            && bytes[pos] != b'>'
            && !bytes[pos..].starts_with(b"/>")
        {
            pos += 1;
        }
        if pos == name_start {
            // Stray `/` or similar; skip it.
            pos += 1;
            continue;
        }
        let attr_name = text[name_start..pos].to_string();

        let mut value_pos = pos;
        while value_pos < bytes.len() && bytes[value_pos].is_ascii_whitespace() {
            value_pos += 1;
        }
        if bytes.get(value_pos) != Some(&b'=') {
            attrs.push(RawAttribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        pos = value_pos + 1;
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }

        let value = match bytes.get(pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                let start = pos + 1;
                let end = text[start..]
                    .find(quote as char)
                    .map_or(bytes.len(), |e| start + e);
                pos = (end + 1).min(bytes.len());
                (text[start..end].to_string(), start)
            }
            _ => {
                let start = pos;
                while pos < bytes.len() && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b'>'
                {
                    pos += 1;
                }
                (text[start..pos].to_string(), start)
            }
        };
        attrs.push(RawAttribute {
            name: attr_name,
            value: Some(value),
        });
    }
}

/// Offset just past the `>` of the closing tag starting at `at`.
pub fn close_tag_end(text: &str, at: usize) -> usize {
    text[at..].find('>').map_or(text.len(), |e| at + e + 1)
}

/// Read the tag name of a closing tag starting at `at`.
pub fn close_tag_name(text: &str, at: usize) -> &str {
    let bytes = text.as_bytes();
    let start = at + 2;
    let mut pos = start;
    while pos < bytes.len() && is_tag_name_byte(bytes[pos]) {
        pos += 1;
    }
    &text[start..pos]
}

//! Low-level byte scanning shared by the scalar and array extractors.
//!
//! Every delimiter the extractors care about (`"`, `\`, `{`, `}`, `[`, `]`, `:`, `,`)
//! is ASCII, so scanning works on bytes. Multi-byte UTF-8 sequences never contain
//! bytes below 0x80, which means every index returned here is a char boundary.

/// Returns the index of the first non-whitespace byte at or after `from`.
pub(crate) fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Given the index of an opening quote, returns the index of its closing quote.
///
/// Returns `None` while the string is still being streamed.
pub(crate) fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let mut escape_pending = false;
    for (offset, &b) in bytes.get(open + 1..)?.iter().enumerate() {
        if escape_pending {
            escape_pending = false;
        } else if b == b'\\' {
            escape_pending = true;
        } else if b == b'"' {
            return Some(open + 1 + offset);
        }
    }
    None
}

/// Locates the value of a member of the root JSON object.
///
/// Returns the index of the first non-whitespace byte after `"key":`, or `None` if the
/// key has not streamed in yet, its colon has not arrived, or nothing follows the colon.
///
/// Only members at depth 1 of a root *object* match, so a nested `projects[0].name`
/// can never stand in for the top-level `name`. Anything before the root `{`
/// (markdown fences, preamble text) is skipped.
pub(crate) fn locate_member(buffer: &str, key: &str) -> Option<usize> {
    let bytes = buffer.as_bytes();
    let mut depth = 0usize;
    let mut root_is_object = false;
    let mut in_string = false;
    let mut escape_pending = false;
    let mut key_start: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];

        if in_string {
            if escape_pending {
                escape_pending = false;
            } else if b == b'\\' {
                escape_pending = true;
            } else if b == b'"' {
                in_string = false;
                if let Some(start) = key_start.take() {
                    if &buffer[start..i] == key {
                        let colon = skip_whitespace(bytes, i + 1);
                        match bytes.get(colon) {
                            Some(b':') => {
                                let value = skip_whitespace(bytes, colon + 1);
                                return (value < bytes.len()).then_some(value);
                            }
                            None => return None,
                            // A string value that happens to equal the key.
                            Some(_) => {}
                        }
                    }
                }
            }
            i += 1;
            continue;
        }

        match b {
            b'"' => {
                in_string = true;
                if depth == 1 && root_is_object {
                    key_start = Some(i + 1);
                }
            }
            b'{' | b'[' => {
                if depth == 0 {
                    root_is_object = b == b'{';
                }
                depth += 1;
            }
            b'}' | b']' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        // Root container closed without the key.
                        return None;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

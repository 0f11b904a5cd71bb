//! Template tokenizer.
//!
//! A token is `%NAME%` where `NAME` is non-empty and made of ASCII
//! alphanumerics, `_`, `-`, `.` or `/`. Any other text between percent signs
//! is literal, and its closing `%` may still open the next token. The same
//! holds for a well-formed name the caller cannot resolve: only `%NAME` is
//! consumed, so `%X%PORT%` still yields `PORT` when `X` is unknown.

/// A piece of a scanned template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Resolvable token name without the surrounding `%`.
    Token(&'a str),
    /// Well-formed name with no value; stands for the literal text `%NAME`.
    Unresolved(&'a str),
}

/// Split `template` into literal text, tokens and unresolved names, in order.
///
/// `resolves` decides whether a well-formed name has a value.
pub fn tokenize<'a, F>(template: &'a str, resolves: F) -> Vec<Segment<'a>>
where
    F: Fn(&str) -> bool,
{
    let bytes = template.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let Some(offset) = template[i + 1..].find('%') else {
            break;
        };
        let close = i + 1 + offset;
        let name = &template[i + 1..close];
        if !is_token_name(name) {
            i = close;
            continue;
        }
        if literal_start < i {
            segments.push(Segment::Literal(&template[literal_start..i]));
        }
        if resolves(name) {
            segments.push(Segment::Token(name));
            i = close + 1;
        } else {
            segments.push(Segment::Unresolved(name));
            i = close;
        }
        literal_start = i;
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

fn is_token_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'/'))
}

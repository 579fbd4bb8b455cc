//! Backslash escapes in strings, IRIs and local names.

use std::borrow::Cow;
use std::str::Chars;

/// Why an escaped body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown escape sequence \\{0}")]
    UnknownEscape(char),
    #[error("invalid unicode escape \\{0}")]
    InvalidUnicode(String),
    #[error("character {0:?} is not allowed in an IRI")]
    IllegalIriChar(char),
}

/// Characters that may follow a backslash, and what they stand for.
///
/// Besides the usual string escapes this covers the reserved punctuation
/// that local names may escape.
fn escaped_char(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'f' => '\u{0C}',
        'b' => '\u{08}',
        '\\' | '\'' | '"' | '_' | '~' | '.' | '-' | '!' | '$' | '&' | '(' | ')' | '*' | '+'
        | ',' | ';' | '=' | '/' | '?' | '#' | '@' | '%' => c,
        _ => return None,
    })
}

/// Read exactly `digits` hex digits from the input.
fn hex_value(chars: &mut Chars<'_>, marker: char, digits: usize) -> Result<u32, DecodeError> {
    let mut value = 0u32;
    let mut seen = String::with_capacity(digits + 1);
    seen.push(marker);
    for _ in 0..digits {
        let digit = chars.next();
        if let Some(d) = digit {
            seen.push(d);
        }
        match digit.and_then(|d| d.to_digit(16)) {
            Some(d) => value = value * 16 + d,
            None => return Err(DecodeError::InvalidUnicode(seen)),
        }
    }
    Ok(value)
}

/// Decode a `\u` escape; a high surrogate must be followed by an escaped low surrogate.
fn short_unicode(chars: &mut Chars<'_>) -> Result<char, DecodeError> {
    let high = hex_value(chars, 'u', 4)?;
    if !(0xD800..=0xDBFF).contains(&high) {
        return char::from_u32(high).ok_or_else(|| DecodeError::InvalidUnicode(format!("u{high:04X}")));
    }

    let mut ahead = chars.clone();
    if ahead.next() == Some('\\') && ahead.next() == Some('u') {
        let low = hex_value(&mut ahead, 'u', 4)?;
        if (0xDC00..=0xDFFF).contains(&low) {
            *chars = ahead;
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            if let Some(c) = char::from_u32(code) {
                return Ok(c);
            }
        }
    }
    Err(DecodeError::InvalidUnicode(format!("u{high:04X}")))
}

/// Replace every escape sequence in `input` with the character it stands for.
///
/// Code points are pushed as scalar values; surrogate pairs written as two
/// `\u` escapes are combined. A lone backslash at the very end is kept.
pub fn unescape(input: &str) -> Result<Cow<'_, str>, DecodeError> {
    if !input.contains('\\') {
        return Ok(Cow::Borrowed(input));
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some('u') => short_unicode(&mut chars)?,
            Some('U') => {
                let code = hex_value(&mut chars, 'U', 8)?;
                char::from_u32(code)
                    .ok_or_else(|| DecodeError::InvalidUnicode(format!("U{code:08X}")))?
            }
            Some(e) => escaped_char(e).ok_or(DecodeError::UnknownEscape(e))?,
            None => '\\',
        };
        out.push(decoded);
    }
    Ok(Cow::Owned(out))
}

/// Reject IRIs holding control characters, spaces or IRI delimiters.
pub fn check_iri(iri: &str) -> Result<(), DecodeError> {
    match iri
        .chars()
        .find(|&c| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'))
    {
        Some(c) => Err(DecodeError::IllegalIriChar(c)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(unescape("no escapes"), Ok(Cow::Borrowed("no escapes"))));
    }

    #[test]
    fn string_escapes() -> Result<(), DecodeError> {
        assert_eq!(unescape(r#"a\tb\nc\\d\"e\'f"#)?, "a\tb\nc\\d\"e'f");
        assert_eq!(unescape(r"\f\b\r")?, "\u{0C}\u{08}\r");
        Ok(())
    }

    #[test]
    fn local_name_escapes() -> Result<(), DecodeError> {
        assert_eq!(unescape(r"a\.b\-c\~d\%20\#e")?, "a.b-c~d%20#e");
        Ok(())
    }

    #[test]
    fn unicode_escapes() -> Result<(), DecodeError> {
        assert_eq!(unescape(r"caf\u00E9")?, "café");
        assert_eq!(unescape(r"\U0001F600")?, "😀");
        assert_eq!(unescape(r"\uD83D\uDE00!")?, "😀!");
        Ok(())
    }

    #[test]
    fn trailing_backslash_is_kept() -> Result<(), DecodeError> {
        assert_eq!(unescape("trailing\\")?, "trailing\\");
        Ok(())
    }

    #[test]
    fn bad_escapes() {
        assert_eq!(unescape(r"\q"), Err(DecodeError::UnknownEscape('q')));
        assert_eq!(
            unescape(r"\u12G4"),
            Err(DecodeError::InvalidUnicode("u12G".to_owned()))
        );
        assert!(matches!(unescape(r"\uD83D"), Err(DecodeError::InvalidUnicode(_))));
        assert!(matches!(unescape(r"\uDE00"), Err(DecodeError::InvalidUnicode(_))));
        assert!(matches!(unescape(r"\U00110000"), Err(DecodeError::InvalidUnicode(_))));
    }

    #[test]
    fn iri_characters() {
        assert_eq!(check_iri("http://example.org/a#b"), Ok(()));
        assert_eq!(check_iri("http://a b"), Err(DecodeError::IllegalIriChar(' ')));
        assert_eq!(check_iri("http://a<b"), Err(DecodeError::IllegalIriChar('<')));
        assert_eq!(check_iri("http://a\u{7}"), Err(DecodeError::IllegalIriChar('\u{7}')));
        assert_eq!(check_iri("x^y"), Err(DecodeError::IllegalIriChar('^')));
    }
}

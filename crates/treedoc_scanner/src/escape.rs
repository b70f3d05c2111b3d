use std::borrow::Cow;
use unescape_zero_copy::Error;

pub(crate) fn unescape_quoted(str: &str) -> Result<Cow<'_, str>, Error> {
    unescape_zero_copy::unescape(dialect_escape_sequence, str)
}

/// Decode one backslash escape sequence of the quoted-string dialect. The
/// named ASCII escapes and `\uXXXX` (including surrogate pairs) are decoded;
/// any other escaped character maps to itself, which covers `\"`, `\'`,
/// `` \` ``, and `\/` without listing them.
pub fn dialect_escape_sequence(s: &str) -> Result<(char, &str), Error> {
    let mut chars = s.chars();
    let next = chars.next().ok_or(Error::IncompleteSequence)?;
    match next {
        'b' => Ok(('\x08', chars.as_str())),
        'f' => Ok(('\x0C', chars.as_str())),
        'n' => Ok(('\n', chars.as_str())),
        'r' => Ok(('\r', chars.as_str())),
        't' => Ok(('\t', chars.as_str())),
        '\r' | '\n' => Ok((next, chars.as_str())),
        'u' => {
            let digits = s.get(1..5).ok_or(Error::IncompleteSequence)?;
            let first = u32::from_str_radix(digits, 16)?;
            // A low surrogate can't stand on its own.
            if (0xDC00..=0xDFFF).contains(&first) {
                return Err(Error::InvalidUnicode(first));
            }
            if !(0xD800..=0xDBFF).contains(&first) {
                let next = char::from_u32(first).ok_or(Error::InvalidUnicode(first))?;
                return Ok((next, &s[5..]));
            }
            // A high surrogate must be followed immediately by `\uXXXX` with
            // the low half of the pair.
            if s.get(5..7) != Some("\\u") {
                return Err(Error::InvalidUnicode(first));
            }
            let digits = s.get(7..11).ok_or(Error::IncompleteSequence)?;
            let second = u32::from_str_radix(digits, 16)?;
            if !(0xDC00..=0xDFFF).contains(&second) {
                return Err(Error::InvalidUnicode(second));
            }
            let combined = (((first - 0xD800) << 10) | (second - 0xDC00)) + 0x1_0000;
            let next = char::from_u32(combined).ok_or(Error::InvalidUnicode(combined))?;
            Ok((next, &s[11..]))
        }
        ch => Ok((ch, chars.as_str())),
    }
}

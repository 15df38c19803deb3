//! Conversion of numeric and string token text into literal values.

use std::num::IntErrorKind;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("integer '{0}' does not fit in 64 bits")]
    IntegerOutOfRange(String),
    #[error("real '{0}' is out of range")]
    RealOutOfRange(String),
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("unknown escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("unterminated string literal")]
    Unterminated,
}

pub fn parse_integer(text: &str) -> Result<i64, LiteralError> {
    text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            LiteralError::IntegerOutOfRange(text.to_string())
        }
        _ => LiteralError::NotANumber(text.to_string()),
    })
}

/// Parses an unsigned real. Underflow rounds to zero; overflow is an error.
pub fn parse_real(text: &str) -> Result<f64, LiteralError> {
    let value = text
        .parse::<f64>()
        .map_err(|_| LiteralError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(LiteralError::RealOutOfRange(text.to_string()));
    }
    Ok(value)
}

/// Strips the surrounding double quotes and resolves escape sequences.
pub fn unescape_string(quoted: &str) -> Result<String, LiteralError> {
    let inner = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(LiteralError::Unterminated)?;

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let escaped = chars.next().ok_or(LiteralError::Unterminated)?;
        result.push(match escaped {
            '\'' => '\'',
            '"' => '"',
            '?' => '?',
            '\\' => '\\',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            other => return Err(LiteralError::InvalidEscape(other)),
        });
    }
    Ok(result)
}

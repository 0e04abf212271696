//! Span-tracked tokenizer and parser for textual pin lists.
//!
//! A pin list is a block of whitespace-separated tokens such as `D2` or `B10`.
//! The first character of a token is the port letter, the remainder is the
//! decimal bit number. Every token is tracked with its line, column and byte
//! range so a malformed entry can be pointed at precisely.

use std::ops::Range;
use thiserror::Error;

use super::PinDescriptor;

/// Location of a token in the original pin-list text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSpan {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in bytes.
    pub column: usize,
    /// Byte range within the source text.
    pub range: Range<usize>,
}

/// Why a single token could not be turned into a pin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenFault {
    #[error("port `{0}` is not an uppercase letter")]
    InvalidPort(char),
    #[error("missing bit number")]
    MissingBit,
    #[error("bit `{0}` is not a number between 0 and 255")]
    InvalidBit(String),
    #[error("bit `{0}` has a leading zero")]
    LeadingZero(String),
}

/// A token that does not describe a pin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed pin token `{}` at line {}, column {}: {}", .token, .span.line, .span.column, .fault)]
pub struct PinParseError {
    pub token: String,
    pub span: PinSpan,
    pub fault: TokenFault,
}

/// ASCII whitespace plus vertical tab, which `u8::is_ascii_whitespace` omits.
fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Iterator over the whitespace-separated tokens of a pin list.
pub struct PinTokens<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> PinTokens<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0, line: 1, line_start: 0 }
    }
}

impl<'a> Iterator for PinTokens<'a> {
    type Item = (&'a str, PinSpan);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.src.as_bytes();
        let len = bytes.len();
        while self.pos < len && is_separator(bytes[self.pos]) {
            if bytes[self.pos] == b'\n' {
                self.line += 1;
                self.line_start = self.pos + 1;
            }
            self.pos += 1;
        }
        if self.pos >= len {
            return None;
        }
        let start = self.pos;
        while self.pos < len && !is_separator(bytes[self.pos]) {
            self.pos += 1;
        }
        let span = PinSpan {
            line: self.line,
            column: start - self.line_start + 1,
            range: start..self.pos,
        };
        Some((&self.src[start..self.pos], span))
    }
}

/// Parse a single token such as `C6` into a descriptor.
pub fn parse_token(token: &str, span: PinSpan) -> Result<PinDescriptor, PinParseError> {
    let fail = |fault| PinParseError { token: token.to_string(), span: span.clone(), fault };

    let mut chars = token.chars();
    let port = match chars.next() {
        Some(c) => c,
        None => return Err(fail(TokenFault::MissingBit)),
    };
    if !port.is_ascii_uppercase() {
        return Err(fail(TokenFault::InvalidPort(port)));
    }

    let digits = chars.as_str();
    if digits.is_empty() {
        return Err(fail(TokenFault::MissingBit));
    }
    // u8::from_str would accept a leading '+', so check digits first
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(fail(TokenFault::InvalidBit(digits.to_string())));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(fail(TokenFault::LeadingZero(digits.to_string())));
    }
    let bit = digits
        .parse::<u8>()
        .map_err(|_| fail(TokenFault::InvalidBit(digits.to_string())))?;

    Ok(PinDescriptor::new(port, bit))
}

/// Parse a whole pin list, preserving input order. Fails on the first
/// malformed token.
pub fn parse_pin_list(src: &str) -> Result<Vec<PinDescriptor>, PinParseError> {
    let mut pins = Vec::new();
    for (token, span) in PinTokens::new(src) {
        let pin = parse_token(token, span)?;
        tracing::trace!(port = %pin.port, bit = pin.bit, "parsed pin {}", pins.len());
        pins.push(pin);
    }
    Ok(pins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_track_lines_and_columns() {
        let src = "D2\n\n  C6 E0\n";
        let tokens: Vec<_> = PinTokens::new(src).collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0, "D2");
        assert_eq!(tokens[0].1, PinSpan { line: 1, column: 1, range: 0..2 });
        assert_eq!(tokens[1].0, "C6");
        assert_eq!(tokens[1].1, PinSpan { line: 3, column: 3, range: 6..8 });
        assert_eq!(tokens[2].0, "E0");
        assert_eq!(tokens[2].1.line, 3);
        assert_eq!(tokens[2].1.column, 6);
    }

    #[test]
    fn test_vertical_tab_separates_tokens() {
        let src = "B0\x0bB1\x0b\n\x0bC2";
        let pins = parse_pin_list(src).unwrap();
        assert_eq!(
            pins,
            vec![PinDescriptor::new('B', 0), PinDescriptor::new('B', 1), PinDescriptor::new('C', 2)]
        );
        let tokens: Vec<&str> = PinTokens::new(src).map(|(token, _)| token).collect();
        assert_eq!(tokens, src.split_whitespace().collect::<Vec<_>>());
    }

    #[test]
    fn test_parse_two_digit_bit() {
        let pins = parse_pin_list("B10 A0").unwrap();
        assert_eq!(pins, vec![PinDescriptor::new('B', 10), PinDescriptor::new('A', 0)]);
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(parse_pin_list("").unwrap().is_empty());
        assert!(parse_pin_list(" \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_bit_is_rejected() {
        let err = parse_pin_list("D2\nDx\n").unwrap_err();
        assert_eq!(err.token, "Dx");
        assert_eq!(err.span.line, 2);
        assert_eq!(err.span.column, 1);
        assert_eq!(err.fault, TokenFault::InvalidBit("x".to_string()));
    }

    #[test]
    fn test_missing_bit_is_rejected() {
        let err = parse_pin_list("D").unwrap_err();
        assert_eq!(err.fault, TokenFault::MissingBit);
    }

    #[test]
    fn test_lowercase_port_is_rejected() {
        let err = parse_pin_list("d2").unwrap_err();
        assert_eq!(err.fault, TokenFault::InvalidPort('d'));
    }

    #[test]
    fn test_signed_and_oversized_bits_are_rejected() {
        assert_eq!(
            parse_pin_list("D+3").unwrap_err().fault,
            TokenFault::InvalidBit("+3".to_string())
        );
        assert_eq!(
            parse_pin_list("D256").unwrap_err().fault,
            TokenFault::InvalidBit("256".to_string())
        );
        assert_eq!(
            parse_pin_list("D07").unwrap_err().fault,
            TokenFault::LeadingZero("07".to_string())
        );
    }

    #[test]
    fn test_error_message_names_token_and_position() {
        let err = parse_pin_list("D2 Q?").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed pin token `Q?` at line 1, column 4: bit `?` is not a number between 0 and 255"
        );
    }
}

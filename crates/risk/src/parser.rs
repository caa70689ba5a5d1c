//! Text to numbers.
//!
//! Values are separated by whitespace and/or a single comma, so `"1, 2,3"` and
//! `"1 2 3"` read the same. Matrix rows are separated by newlines. Blank input is
//! reported as `None` so callers can tell "nothing entered" from "bad numbers".

use core_types::{NumericMatrix, NumericSequence, ParseError};

/// Parses one delimited line of numbers.
pub fn parse_sequence(text: &str) -> Result<Option<NumericSequence>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let mut values = Vec::new();
    for piece in trimmed.split(',') {
        // An empty piece means two commas in a row, or a leading/trailing comma.
        if piece.trim().is_empty() {
            return Err(ParseError::InvalidNumericToken(piece.to_string()));
        }
        for token in piece.split_whitespace() {
            values.push(parse_number(token)?);
        }
    }

    Ok(Some(values))
}

/// Parses newline-separated rows. Rows may have different lengths.
pub fn parse_matrix(text: &str) -> Result<Option<NumericMatrix>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .lines()
        .enumerate()
        .map(|(index, line)| parse_sequence(line)?.ok_or(ParseError::EmptyRow(index + 1)))
        .collect::<Result<NumericMatrix, _>>()
        .map(Some)
}

fn parse_number(token: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidNumericToken(token.to_string());

    if !is_numeric_token(token) {
        return Err(invalid());
    }
    // The grammar check above admits things like "1e999", which overflow.
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(invalid)
}

/// `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_numeric_token(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut pos = 0;

    let skip_sign = |pos: &mut usize| {
        if matches!(bytes.get(*pos), Some(b'+' | b'-')) {
            *pos += 1;
        }
    };
    let count_digits = |pos: &mut usize| {
        let start = *pos;
        while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
            *pos += 1;
        }
        *pos - start
    };

    skip_sign(&mut pos);
    let mut mantissa_digits = count_digits(&mut pos);
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        mantissa_digits += count_digits(&mut pos);
    }
    if mantissa_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        skip_sign(&mut pos);
        if count_digits(&mut pos) == 0 {
            return false;
        }
    }

    pos == bytes.len()
}

//! Collecting the portfolio value from the user.
//!
//! The allocator takes the value as a plain number; this module is the
//! boundary that asks for it, validates it, and asks again on bad input.
use std::io::{BufRead, Write};

use log::debug;

use crate::error::ClientError;

/// Question printed before each read.
pub const PROMPT: &str = "Enter the value of your portfolio: ";
/// Message printed after an unusable answer.
pub const RETRY_MESSAGE: &str = "Not a valid value for portfolio! Please try again.";

/// Parse a portfolio value: a finite, strictly positive number.
///
/// Zero and negative amounts are turned away here even though `allocate`
/// accepts any finite value; this is the only place the user supplies one.
pub fn parse_portfolio_value(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Prompt on `output` and read answers from `input` until one parses as a
/// portfolio value. Running out of input is an error.
pub fn prompt_portfolio_value<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> Result<f64, ClientError> {
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        // Bytes that are not UTF-8 make an unusable answer, not a fatal read.
        let mut buf = Vec::new();
        if input.read_until(b'\n', &mut buf)? == 0 {
            return Err(ClientError::Config(
                "input closed before a portfolio value was entered".to_string(),
            ));
        }
        let line = String::from_utf8_lossy(&buf);
        match parse_portfolio_value(&line) {
            Some(value) => return Ok(value),
            None => {
                debug!("Rejected portfolio value {:?}", line.trim());
                writeln!(output, "{RETRY_MESSAGE}")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn accepts_first_valid_answer() {
        let mut out = Vec::new();
        let value = prompt_portfolio_value(Cursor::new("10000\n"), &mut out).unwrap();
        assert_eq!(value, 10_000.0);
        assert_eq!(String::from_utf8(out).unwrap(), PROMPT);
    }

    #[test]
    fn reprompts_until_valid() {
        let mut out = Vec::new();
        let input = Cursor::new("ten grand\n-5\n0\nNaN\n 2500.50 \n");
        let value = prompt_portfolio_value(input, &mut out).unwrap();

        assert_eq!(value, 2_500.5);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(PROMPT).count(), 5);
        assert_eq!(text.matches(RETRY_MESSAGE).count(), 4);
    }

    #[test]
    fn invalid_utf8_answer_is_rejected_and_reprompted() {
        let mut out = Vec::new();
        let input = Cursor::new(&b"\xff\xfe\n2500\n"[..]);
        let value = prompt_portfolio_value(input, &mut out).unwrap();

        assert_eq!(value, 2_500.0);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(PROMPT).count(), 2);
        assert_eq!(text.matches(RETRY_MESSAGE).count(), 1);
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut out = Vec::new();
        let err = prompt_portfolio_value(Cursor::new("abc\n"), &mut out).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn parse_rejects_infinite_and_non_positive() {
        assert_eq!(parse_portfolio_value("1e6"), Some(1_000_000.0));
        assert_eq!(parse_portfolio_value("inf"), None);
        assert_eq!(parse_portfolio_value("0"), None);
        assert_eq!(parse_portfolio_value(""), None);
    }
}

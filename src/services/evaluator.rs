//! Arithmetic evaluator for Calcdesk.
//!
//! A precedence-climbing parser over decimal literals and the four binary
//! operators `+ - * /`. Multiplication and division bind tighter than addition
//! and subtraction; operators of equal precedence associate to the left.
//! There are no unary operators, parentheses, or functions.

use crate::types::errors::EvalError;
use crate::types::input::Operator;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator),
}

/// A token plus the character offset it started at.
#[derive(Debug, Clone, PartialEq)]
struct Spanned {
    token: Token,
    pos: usize,
}

/// Replaces the display glyphs `×` and `÷` with `*` and `/`.
pub fn normalize_glyphs(expression: &str) -> String {
    expression.replace('÷', "/").replace('×', "*")
}

/// Evaluates `expression` and returns a finite value.
///
/// Infinite and NaN results are reported as [`EvalError::NonFinite`].
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let normalized = normalize_glyphs(expression);
    let tokens = tokenize(&normalized)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let value = parser.parse_expression(1)?;

    if let Some(extra) = parser.peek() {
        return Err(EvalError::UnexpectedToken(describe(&extra.token), extra.pos));
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

/// Largest precision `format_result` honors; larger requests are clamped.
pub const MAX_PRECISION: u32 = 100;

/// Rounds `value` to `precision` decimal places and renders it without
/// trailing zeros, e.g. `0.1 + 0.2` becomes `"0.3"` and `5.0` becomes `"5"`.
///
/// Magnitudes of at least `1e21` or below `1e-6` are written in exponent
/// form: `1e+21`, `1.5e-7`.
pub fn format_result(value: f64, precision: u32) -> String {
    let precision = precision.min(MAX_PRECISION) as usize;
    let fixed = format!("{:.*}", precision, value);
    let rounded: f64 = fixed.parse().unwrap_or(value);
    if rounded == 0.0 {
        // Avoid printing "-0".
        return "0".to_string();
    }

    let magnitude = rounded.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{:e}", rounded);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    rounded.to_string()
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => n.to_string(),
        Token::Op(op) => op.as_char().to_string(),
    }
}

fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(op) = Operator::from_char(c) {
            tokens.push(Spanned {
                token: Token::Op(op),
                pos: i,
            });
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut seen_dot = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if seen_dot {
                        return Err(EvalError::UnexpectedChar('.', i));
                    }
                    seen_dot = true;
                }
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            tokens.push(Spanned {
                token: Token::Number(parse_literal(&literal)?),
                pos: start,
            });
            continue;
        }

        return Err(EvalError::UnexpectedChar(c, i));
    }

    Ok(tokens)
}

/// Parses `12`, `12.`, `12.5` or `.5`. A lone `.` is rejected, and so is an
/// integer part with a leading zero such as `05` or `00.5`.
fn parse_literal(literal: &str) -> Result<f64, EvalError> {
    let invalid = || EvalError::InvalidNumber(literal.to_string());

    let (int_part, frac_part) = literal.split_once('.').unwrap_or((literal, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return Err(invalid());
    }

    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let normalized = if frac_part.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac_part)
    };
    normalized.parse::<f64>().map_err(|_| invalid())
}

struct Parser {
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn next(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn parse_operand(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some(Spanned {
                token: Token::Number(n),
                ..
            }) => Ok(n),
            Some(Spanned {
                token: Token::Op(op),
                pos,
            }) => Err(EvalError::UnexpectedToken(op.as_char().to_string(), pos)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn parse_expression(&mut self, min_precedence: u8) -> Result<f64, EvalError> {
        let mut lhs = self.parse_operand()?;

        loop {
            let op = match self.peek() {
                Some(Spanned {
                    token: Token::Op(op),
                    ..
                }) if op.precedence() >= min_precedence => *op,
                Some(Spanned {
                    token: Token::Number(n),
                    pos,
                }) => return Err(EvalError::UnexpectedToken(n.to_string(), *pos)),
                _ => break,
            };
            self.cursor += 1;
            let rhs = self.parse_expression(op.precedence() + 1)?;
            lhs = op.apply(lhs, rhs);
        }

        Ok(lhs)
    }
}

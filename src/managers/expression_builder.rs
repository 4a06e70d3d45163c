//! Expression Builder for Calcdesk.
//!
//! Turns a stream of digit, operator, decimal-point, backspace and clear
//! events into a well-formed expression string, and evaluates it on demand.
//!
//! The expression never contains two consecutive operators (a new operator
//! replaces a trailing one) and never contains two decimal points within the
//! same numeric segment.

use tracing::debug;

use crate::services::evaluator;
use crate::types::display::DisplayState;
use crate::types::input::Operator;

/// Result text shown for any failed evaluation.
pub const ERROR_TEXT: &str = "Error";

/// Outcome of [`ExpressionBuilder::evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// A finite value. Carries the pre-evaluation expression and the
    /// formatted result so the caller can record it.
    Value { expression: String, result: String },
    /// Malformed expression or non-finite value; the result reads `"Error"`.
    Error,
}

/// Trait defining expression input operations.
pub trait ExpressionBuilderTrait {
    fn input_digit(&mut self, digit: char);
    fn input_operator(&mut self, op: Operator);
    fn input_decimal(&mut self);
    fn backspace(&mut self);
    fn clear(&mut self);
    fn clear_all(&mut self);
    fn evaluate(&mut self) -> Option<Evaluation>;
    fn load_entry(&mut self, expression: &str, result: &str);
}

/// Expression input state.
#[derive(Debug, Clone)]
pub struct ExpressionBuilder {
    expression: String,
    result: String,
    pending_reset: bool,
    precision: u32,
}

impl ExpressionBuilder {
    /// Creates an empty builder that rounds results to `precision` decimal
    /// places, at most [`evaluator::MAX_PRECISION`].
    pub fn new(precision: u32) -> Self {
        Self {
            expression: String::new(),
            result: String::new(),
            pending_reset: false,
            precision: precision.min(evaluator::MAX_PRECISION),
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    /// True right after an evaluation or history selection; the next digit
    /// starts a fresh expression.
    pub fn pending_reset(&self) -> bool {
        self.pending_reset
    }

    /// Text for the expression line: the expression, or `"0"` when empty.
    pub fn expression_text(&self) -> &str {
        if self.expression.is_empty() {
            "0"
        } else {
            &self.expression
        }
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            expression: self.expression_text().to_string(),
            result: self.result.clone(),
        }
    }

    fn ends_with_operator(&self) -> bool {
        self.expression
            .chars()
            .last()
            .is_some_and(Operator::is_operator_char)
    }

    /// The numeric segment after the last operator.
    fn last_segment(&self) -> &str {
        self.expression
            .rsplit(Operator::is_operator_char)
            .next()
            .unwrap_or("")
    }
}

impl Default for ExpressionBuilder {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ExpressionBuilderTrait for ExpressionBuilder {
    /// Appends a digit. Non-digit characters are ignored.
    fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.pending_reset {
            self.expression.clear();
            self.pending_reset = false;
        }
        if self.expression == "0" {
            self.expression.clear();
        }
        self.expression.push(digit);
    }

    /// Appends `op`, or replaces a trailing operator with it.
    fn input_operator(&mut self, op: Operator) {
        self.pending_reset = false;
        if self.expression.is_empty() {
            return;
        }
        if self.ends_with_operator() {
            self.expression.pop();
        }
        self.expression.push(op.as_char());
    }

    /// Appends a decimal point unless the current segment already has one.
    fn input_decimal(&mut self) {
        self.pending_reset = false;
        if self.last_segment().contains('.') {
            return;
        }
        if self.expression.is_empty() {
            self.expression.push_str("0.");
        } else {
            self.expression.push('.');
        }
    }

    fn backspace(&mut self) {
        self.expression.pop();
    }

    fn clear(&mut self) {
        self.expression.clear();
        self.result.clear();
    }

    /// Same as [`clear`](ExpressionBuilderTrait::clear).
    fn clear_all(&mut self) {
        self.clear();
    }

    /// Evaluates the expression. Returns `None` (and changes nothing) when the
    /// expression is empty.
    fn evaluate(&mut self) -> Option<Evaluation> {
        if self.expression.is_empty() {
            return None;
        }

        let outcome = match evaluator::evaluate(&self.expression) {
            Ok(value) => {
                let formatted = evaluator::format_result(value, self.precision);
                Evaluation::Value {
                    expression: self.expression.clone(),
                    result: formatted,
                }
            }
            Err(e) => {
                debug!(expression = %self.expression, error = %e, "evaluation failed");
                Evaluation::Error
            }
        };

        self.result = match &outcome {
            Evaluation::Value { result, .. } => result.clone(),
            Evaluation::Error => ERROR_TEXT.to_string(),
        };
        self.pending_reset = true;
        Some(outcome)
    }

    /// Shows a stored calculation without re-evaluating it.
    fn load_entry(&mut self, expression: &str, result: &str) {
        self.expression = expression.to_string();
        self.result = result.to_string();
        self.pending_reset = true;
    }
}

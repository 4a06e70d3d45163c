//! Calculator instance for Calcdesk.
//!
//! Owns the expression builder, the history manager and a display surface,
//! and routes every input event to the right component. The display is
//! refreshed after each state-changing event.

use tracing::debug;

use crate::managers::expression_builder::{Evaluation, ExpressionBuilder, ExpressionBuilderTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::types::display::DisplayState;
use crate::types::history::HistoryEntry;
use crate::types::input::{InputEvent, Operator};
use crate::ui::display::DisplaySurface;

pub struct Calculator {
    builder: ExpressionBuilder,
    history: HistoryManager,
    display: Box<dyn DisplaySurface>,
}

impl Calculator {
    /// Creates a calculator and paints the initial display.
    pub fn new(
        builder: ExpressionBuilder,
        history: HistoryManager,
        display: Box<dyn DisplaySurface>,
    ) -> Self {
        let mut calc = Self {
            builder,
            history,
            display,
        };
        calc.refresh();
        calc
    }

    /// Dispatches one input event.
    pub fn handle_event(&mut self, event: InputEvent) {
        debug!(?event, "input event");
        match event {
            InputEvent::Digit(d) => self.input_digit(d),
            InputEvent::Operator(op) => self.input_operator(op),
            InputEvent::Decimal => self.input_decimal(),
            InputEvent::Equals => self.evaluate(),
            InputEvent::Clear => self.clear(),
            InputEvent::ClearAll => self.clear_all(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::ClearHistory => self.clear_history(),
            InputEvent::SelectHistory(index) => {
                self.select_history(index);
            }
        }
    }

    pub fn input_digit(&mut self, digit: char) {
        self.builder.input_digit(digit);
        self.refresh();
    }

    pub fn input_operator(&mut self, op: Operator) {
        self.builder.input_operator(op);
        self.refresh();
    }

    pub fn input_decimal(&mut self) {
        self.builder.input_decimal();
        self.refresh();
    }

    pub fn backspace(&mut self) {
        self.builder.backspace();
        self.refresh();
    }

    pub fn clear(&mut self) {
        self.builder.clear();
        self.refresh();
    }

    pub fn clear_all(&mut self) {
        self.builder.clear_all();
        self.refresh();
    }

    /// Evaluates the current expression; finite results are recorded in history.
    pub fn evaluate(&mut self) {
        match self.builder.evaluate() {
            Some(Evaluation::Value { expression, result }) => {
                self.history.append(&expression, &result);
            }
            Some(Evaluation::Error) | None => {}
        }
        self.refresh();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Shows the entry at `index` without re-evaluating it. Returns `false`
    /// and changes nothing when there is no such entry.
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.select_at(index) else {
            debug!(index, "history selection out of range");
            return false;
        };
        let (expression, result) = (entry.expression.clone(), entry.result.clone());
        self.builder.load_entry(&expression, &result);
        self.refresh();
        true
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn history_manager(&self) -> &HistoryManager {
        &self.history
    }

    pub fn builder(&self) -> &ExpressionBuilder {
        &self.builder
    }

    pub fn display_state(&self) -> DisplayState {
        self.builder.display_state()
    }

    /// Gives the history manager back, e.g. to reopen its store elsewhere.
    pub fn into_history(self) -> HistoryManager {
        self.history
    }

    fn refresh(&mut self) {
        self.display
            .set_expression_text(self.builder.expression_text());
        self.display.set_result_text(self.builder.result());
    }
}

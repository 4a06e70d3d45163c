//! Display surfaces.

use std::cell::RefCell;
use std::rc::Rc;

use crate::types::display::DisplayState;

/// Something that can show the expression line and the result line.
pub trait DisplaySurface {
    fn set_expression_text(&mut self, text: &str);
    fn set_result_text(&mut self, text: &str);
}

/// Discards everything. Used when the caller reads state from the calculator directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn set_expression_text(&mut self, _text: &str) {}
    fn set_result_text(&mut self, _text: &str) {}
}

/// Keeps the last texts shown. Clones share the same state, so a front end
/// can hand one clone to the calculator and read the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingDisplay {
    inner: Rc<RefCell<Recorded>>,
}

#[derive(Debug, Default)]
struct Recorded {
    state: DisplayState,
    updates: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last expression and result texts received.
    pub fn state(&self) -> DisplayState {
        self.inner.borrow().state.clone()
    }

    /// Number of result-line updates, i.e. completed refreshes.
    pub fn updates(&self) -> usize {
        self.inner.borrow().updates
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_expression_text(&mut self, text: &str) {
        self.inner.borrow_mut().state.expression = text.to_string();
    }

    fn set_result_text(&mut self, text: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.state.result = text.to_string();
        inner.updates += 1;
    }
}

//! Calcdesk UI layer.
//!
//! The calculator core only talks to a [`DisplaySurface`](display::DisplaySurface);
//! front ends decide how the two text lines are actually shown.

pub mod display;

//! Keypad calculator core.
//!
//! `calc_engine` turns expressions like `"12+3×(4-1)"` into numbers and
//! decides how each key press extends the expression; `Calculator` is the
//! small piece of state a front end keeps around it.

pub mod calc_engine;
pub mod calculator;
pub mod config;
pub mod format;

pub use calc_engine::{append, clear, delete, evaluate, EvalError, Key};
pub use calculator::{Calculator, ERROR_TEXT};
pub use format::{format_for_display, format_result};

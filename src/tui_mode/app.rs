use std::time::{Duration, Instant};

use tapcalc::calc_engine::{evaluate_traced, EvalError, Key, Step};
use tapcalc::config::Config;
use tapcalc::Calculator;
use tracing::debug;

pub struct HistoryEntry {
    pub input: String,
    pub result: Result<f64, EvalError>,
    pub detailed_steps: Vec<Step>,
    pub duration: Duration,
}

pub struct App {
    pub calculator: Calculator,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub detailed_mode: bool,
    pub precision: usize,
    pub history_limit: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(config: &Config) -> Self {
        App {
            calculator: Calculator::new(),
            history: Vec::new(),
            cursor_history: 0,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            detailed_mode: config.details(),
            precision: config.precision(),
            history_limit: config.history_limit(),
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.calculator.press(key);
    }

    pub fn delete(&mut self) {
        self.calculator.delete();
    }

    pub fn clear_input(&mut self) {
        self.calculator.clear();
    }

    /// `=`: records the evaluation in the history and replaces the
    /// expression with its result.
    pub fn submit(&mut self) {
        let input = self.calculator.expression().to_string();
        if input.is_empty() || self.calculator.is_error() {
            return;
        }

        let start_time = Instant::now();
        let (result, detailed_steps) = evaluate_traced(&input);
        let duration = start_time.elapsed();
        debug!(%input, ?duration, "submitted");

        self.calculator.apply_result(result);

        self.history.push(HistoryEntry {
            input,
            result,
            detailed_steps,
            duration,
        });
        if self.history.len() > self.history_limit {
            let excess = self.history.len() - self.history_limit;
            self.history.drain(..excess);
        }

        self.cursor_history = self.history.len().saturating_sub(1);
        self.scroll_to_bottom = true;
    }

    pub fn toggle_details(&mut self) {
        self.detailed_mode = !self.detailed_mode;
    }

    /// Puts a previous expression back on the display.
    pub fn navigate_history(&mut self, direction: i32) {
        if self.history.is_empty() {
            return;
        }
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len() - 1 {
            self.cursor_history += 1;
        }

        self.recall_selected();
    }

    pub fn scroll_history(&mut self, direction: i32) {
        if self.history.is_empty() {
            return;
        }
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.history.len() - 1);
        }

        self.recall_selected();
    }

    fn recall_selected(&mut self) {
        if let Some(entry) = self.history.get(self.cursor_history) {
            self.calculator = Calculator::with_expression(entry.input.clone());
        }
        self.scroll_to_bottom = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&Config::default())
    }

    fn type_keys(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.press(Key::from_char(c).unwrap());
        }
    }

    #[test]
    fn test_submit_records_history() {
        let mut app = app();
        type_keys(&mut app, "2+3*4");
        app.submit();

        assert_eq!(app.history.len(), 1);
        assert_eq!(app.history[0].input, "2+3×4");
        assert_eq!(app.history[0].result, Ok(14.0));
        assert_eq!(app.history[0].detailed_steps.len(), 2);
        assert_eq!(app.calculator.expression(), "14");
    }

    #[test]
    fn test_failed_submit_shows_error() {
        let mut app = app();
        type_keys(&mut app, "5/0");
        app.submit();

        assert_eq!(app.history[0].result, Err(EvalError::DivisionByZero));
        assert!(app.calculator.is_error());

        // A second "=" on the error text is ignored.
        app.submit();
        assert_eq!(app.history.len(), 1);
    }

    #[test]
    fn test_history_limit() {
        let mut app = App::new(&Config {
            history_limit: Some(2),
            ..Config::default()
        });
        for expr in ["1+1", "2+2", "3+3"] {
            app.clear_input();
            type_keys(&mut app, expr);
            app.submit();
        }
        assert_eq!(app.history.len(), 2);
        assert_eq!(app.history[0].input, "2+2");
        assert_eq!(app.cursor_history, 1);
    }

    #[test]
    fn test_navigate_history_recalls_expression() {
        let mut app = app();
        for expr in ["1+1", "2×3"] {
            app.clear_input();
            type_keys(&mut app, expr);
            app.submit();
        }
        app.navigate_history(-1);
        assert_eq!(app.calculator.expression(), "1+1");
        app.navigate_history(1);
        assert_eq!(app.calculator.expression(), "2×3");
    }
}

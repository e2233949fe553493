use tracing::debug;

use crate::calc_engine::{self, EvalError, Key};
use crate::format::format_result;

/// Text shown in place of the expression after a failed evaluation.
pub const ERROR_TEXT: &str = "Error";

/// The expression a keypad is building, owned by whichever front end
/// drives it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calculator {
    expression: String,
    errored: bool,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a previously saved expression.
    pub fn with_expression(expression: impl Into<String>) -> Self {
        Calculator {
            expression: expression.into(),
            errored: false,
        }
    }

    /// What the display should show.
    pub fn expression(&self) -> &str {
        if self.errored {
            ERROR_TEXT
        } else {
            &self.expression
        }
    }

    pub fn is_error(&self) -> bool {
        self.errored
    }

    pub fn press(&mut self, key: Key) {
        if self.errored {
            self.clear();
        }
        self.expression = calc_engine::append(&self.expression, key);
    }

    pub fn delete(&mut self) {
        if self.errored {
            self.clear();
            return;
        }
        self.expression = calc_engine::delete(&self.expression);
    }

    pub fn clear(&mut self) {
        self.expression = calc_engine::clear();
        self.errored = false;
    }

    /// Evaluates the current expression and replaces it with the result,
    /// or with [`ERROR_TEXT`] on failure.
    pub fn equals(&mut self) -> Result<f64, EvalError> {
        let result = calc_engine::evaluate(&self.expression);
        self.apply_result(result);
        result
    }

    /// Shows an evaluation the caller already ran on [`Self::expression`],
    /// e.g. through `evaluate_traced`.
    pub fn apply_result(&mut self, result: Result<f64, EvalError>) {
        match result {
            Ok(value) => {
                self.expression = format_result(value);
                self.errored = false;
            }
            Err(e) => {
                debug!(expression = %self.expression, error = %e, "showing error");
                self.expression.clear();
                self.errored = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(calc: &mut Calculator, labels: &[&str]) {
        for label in labels {
            calc.press(label.parse().unwrap());
        }
    }

    #[test]
    fn test_equals_replaces_expression() {
        let mut calc = Calculator::new();
        press_all(&mut calc, &["2", "+", "3", "×", "4"]);
        assert_eq!(calc.expression(), "2+3×4");
        assert_eq!(calc.equals(), Ok(14.0));
        assert_eq!(calc.expression(), "14");
    }

    #[test]
    fn test_result_can_be_extended() {
        let mut calc = Calculator::with_expression("7÷2");
        calc.equals().unwrap();
        press_all(&mut calc, &["×", "2"]);
        assert_eq!(calc.expression(), "3.5×2");
        assert_eq!(calc.equals(), Ok(7.0));
    }

    #[test]
    fn test_error_then_fresh_input() {
        let mut calc = Calculator::with_expression("5÷0");
        assert_eq!(calc.equals(), Err(EvalError::DivisionByZero));
        assert!(calc.is_error());
        assert_eq!(calc.expression(), ERROR_TEXT);

        calc.press("8".parse().unwrap());
        assert!(!calc.is_error());
        assert_eq!(calc.expression(), "8");
    }

    #[test]
    fn test_delete_on_error_clears() {
        let mut calc = Calculator::with_expression("5+");
        assert!(calc.equals().is_err());
        calc.delete();
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn test_apply_result() {
        let mut calc = Calculator::with_expression("1÷4");
        calc.apply_result(Ok(0.25));
        assert_eq!(calc.expression(), "0.25");

        calc.apply_result(Err(EvalError::MalformedExpression));
        assert!(calc.is_error());
        assert_eq!(calc.expression(), ERROR_TEXT);

        calc.apply_result(Ok(-0.0));
        assert!(!calc.is_error());
        assert_eq!(calc.expression(), "0");
    }

    #[test]
    fn test_repeated_equals_is_stable() {
        let mut calc = Calculator::with_expression("2-7");
        assert_eq!(calc.equals(), Ok(-5.0));
        assert_eq!(calc.expression(), "-5");
        assert_eq!(calc.equals(), Ok(-5.0));
        assert_eq!(calc.expression(), "-5");
    }

    #[test]
    fn test_keypad_cannot_build_double_operator() {
        let mut calc = Calculator::new();
        press_all(&mut calc, &["5", "+", "+", "3"]);
        assert_eq!(calc.expression(), "5+3");
        assert_eq!(calc.equals(), Ok(8.0));
    }
}

//! Drives the public API the way a button grid would.

use tapcalc::{append, clear, delete, evaluate, format_result, Calculator, EvalError, Key, ERROR_TEXT};

fn tap(expr: &str, labels: &[&str]) -> String {
    labels
        .iter()
        .fold(expr.to_string(), |acc, label| append(&acc, label.parse::<Key>().unwrap()))
}

#[test]
fn normalizer_examples() {
    assert_eq!(tap("", &["0"]), "");
    assert_eq!(tap("", &["5"]), "5");
    assert_eq!(tap("5", &["0"]), "50");
    assert_eq!(tap("3+", &["+"]), "3+");
    assert_eq!(tap("3+", &["-"]), "3-");
    assert_eq!(tap("3+", &["."]), "3+0.");
}

#[test]
fn button_sequence_evaluates() {
    let expr = tap("", &["0", "1", "2", "+", "3", "×", "(", "4", "-", "1", ")"]);
    assert_eq!(expr, "12+3×(4-1)");
    assert_eq!(evaluate(&expr), Ok(21.0));
}

#[test]
fn operator_mashing_still_evaluates() {
    let expr = tap("", &["9", "+", "×", "÷", "-", "4"]);
    assert_eq!(expr, "9-4");
    assert_eq!(evaluate(&expr), Ok(5.0));
}

#[test]
fn direct_input_is_still_checked() {
    assert_eq!(evaluate(""), Err(EvalError::MalformedExpression));
    assert_eq!(evaluate("5÷0"), Err(EvalError::DivisionByZero));
    assert_eq!(evaluate("5+"), Err(EvalError::MalformedExpression));
    assert!(evaluate("5++3").is_err());
    assert!(evaluate("1.2.3").is_err());
    assert_eq!(evaluate("(1+2"), Err(EvalError::UnbalancedParentheses));
}

#[test]
fn delete_and_clear_round_trip() {
    let expr = "3.5×(2-0.25)÷7";
    let emptied = (0..expr.chars().count()).fold(expr.to_string(), |acc, _| delete(&acc));
    assert_eq!(emptied, "");
    assert_eq!(delete(""), "");
    assert_eq!(clear(), "");
}

#[test]
fn displayed_results_reevaluate_to_themselves() {
    for expr in ["2+3×4", "(2+3)×4", "1÷3", "0.1×3", "2-9", "1÷8÷8÷8"] {
        let value = evaluate(expr).unwrap();
        assert_eq!(evaluate(&format_result(value)), Ok(value), "{expr}");
    }
}

#[test]
fn calculator_session() {
    let mut calc = Calculator::new();
    for label in ["7", "÷", "2"] {
        calc.press(label.parse().unwrap());
    }
    assert_eq!(calc.equals(), Ok(3.5));
    assert_eq!(calc.expression(), "3.5");

    calc.press("÷".parse().unwrap());
    calc.press("0".parse().unwrap());
    assert_eq!(calc.equals(), Err(EvalError::DivisionByZero));
    assert_eq!(calc.expression(), ERROR_TEXT);

    calc.press("4".parse().unwrap());
    assert_eq!(calc.expression(), "4");
}

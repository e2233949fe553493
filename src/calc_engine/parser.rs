use tracing::debug;

use super::error::EvalError;
use super::tokenizer::{tokenize, Operator, Token};

pub struct Step {
    pub operation: String,
    pub result: f64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

/// Evaluates a keypad expression such as `"12+3×(4-1)"`.
pub fn evaluate(expr: &str) -> Result<f64, EvalError> {
    let mut trace = EvaluationTrace::new(false);
    run(expr, &mut trace)
}

/// Same as [`evaluate`], but also returns every reduction performed.
pub fn evaluate_traced(expr: &str) -> (Result<f64, EvalError>, Vec<Step>) {
    let mut trace = EvaluationTrace::new(true);
    let result = run(expr, &mut trace);
    (result, trace.steps)
}

fn run(expr: &str, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
    let result = tokenize(expr)
        .map_err(EvalError::from)
        .and_then(|tokens| Parser::new(tokens).parse(trace));
    match &result {
        Ok(value) => debug!(expr, value, "evaluated"),
        Err(e) => debug!(expr, error = %e, "evaluation failed"),
    }
    result
}

/// Deepest parenthesis nesting accepted. Each level costs several
/// recursive calls, so this bounds stack use.
pub const MAX_NESTING: usize = 256;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    pub fn parse(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        if self.tokens.is_empty() {
            return Err(EvalError::MalformedExpression);
        }
        self.check_balance()?;

        let result = self.expr(trace)?;
        if self.current < self.tokens.len() {
            return Err(EvalError::MalformedExpression);
        }
        Ok(result)
    }

    /// Nesting depth must never go negative and must end at zero.
    fn check_balance(&self) -> Result<(), EvalError> {
        let mut depth: usize = 0;
        for token in &self.tokens {
            match token {
                Token::LeftParen => depth += 1,
                Token::RightParen => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or(EvalError::UnbalancedParentheses)?;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(EvalError::UnbalancedParentheses);
        }
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.current)
    }

    fn expr(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        let mut left = self.term(trace)?;

        while let Some(&Token::Operator(op @ (Operator::Add | Operator::Subtract))) = self.peek() {
            self.current += 1;
            let right = self.term(trace)?;
            left = apply(op, left, right, trace)?;
        }
        Ok(left)
    }

    fn term(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        let mut left = self.factor(trace)?;

        while let Some(&Token::Operator(op @ (Operator::Multiply | Operator::Divide))) = self.peek()
        {
            self.current += 1;
            let right = self.factor(trace)?;
            left = apply(op, left, right, trace)?;
        }
        Ok(left)
    }

    fn factor(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        // Unary minus only where no binary operator can precede it.
        let at_operand_start = self.current == 0
            || matches!(self.tokens.get(self.current - 1), Some(Token::LeftParen));

        if at_operand_start && self.peek() == Some(&Token::Operator(Operator::Subtract)) {
            self.current += 1;
            let value = self.primary(trace)?;
            let result = -value;
            trace.add_step(format!("-{}", value), result);
            return Ok(result);
        }

        self.primary(trace)
    }

    fn primary(&mut self, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
        match self.peek() {
            Some(&Token::Number(n)) => {
                self.current += 1;
                if !n.is_finite() {
                    return Err(EvalError::Overflow);
                }
                Ok(n)
            }
            Some(Token::LeftParen) => {
                if self.depth >= MAX_NESTING {
                    return Err(EvalError::MalformedExpression);
                }
                self.current += 1;
                self.depth += 1;
                let value = self.expr(trace)?;
                self.depth -= 1;
                if self.peek() == Some(&Token::RightParen) {
                    self.current += 1;
                    Ok(value)
                } else {
                    Err(EvalError::MalformedExpression)
                }
            }
            _ => Err(EvalError::MalformedExpression),
        }
    }
}

fn apply(op: Operator, left: f64, right: f64, trace: &mut EvaluationTrace) -> Result<f64, EvalError> {
    let result = match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
    };
    if !result.is_finite() {
        return Err(EvalError::Overflow);
    }
    trace.add_step(format!("{} {} {}", left, op, right), result);
    Ok(result)
}

use std::fmt;

use tracing::trace;

use super::error::TokenizeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    pub fn from_symbol(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '×' => Some(Operator::Multiply),
            '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn is_symbol(c: char) -> bool {
        Operator::from_symbol(c).is_some()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            '(' => {
                tokens.push(Token::LeftParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RightParen);
                chars.next();
            }
            '+' => {
                tokens.push(Token::Operator(Operator::Add));
                chars.next();
            }
            '-' => {
                tokens.push(Token::Operator(Operator::Subtract));
                chars.next();
            }
            '×' => {
                tokens.push(Token::Operator(Operator::Multiply));
                chars.next();
            }
            '÷' => {
                tokens.push(Token::Operator(Operator::Divide));
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                let mut has_dot = false;

                while let Some(&(_, ch)) = chars.peek() {
                    match ch {
                        '.' if has_dot => return Err(TokenizeError::MalformedNumber { position }),
                        '.' => {
                            has_dot = true;
                            num_str.push(ch);
                            chars.next();
                        }
                        '0'..='9' => {
                            num_str.push(ch);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                let value = num_str
                    .parse::<f64>()
                    .map_err(|_| TokenizeError::MalformedNumber { position })?;
                tokens.push(Token::Number(value));
            }
            _ => return Err(TokenizeError::InvalidCharacter { ch: c, position }),
        }
    }

    trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_expression() {
        let tokens = tokenize("12+3×(4-1)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(12.0),
                Token::Operator(Operator::Add),
                Token::Number(3.0),
                Token::Operator(Operator::Multiply),
                Token::LeftParen,
                Token::Number(4.0),
                Token::Operator(Operator::Subtract),
                Token::Number(1.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_each_operator_symbol() {
        assert_eq!(
            tokenize("+-×÷").unwrap(),
            vec![
                Token::Operator(Operator::Add),
                Token::Operator(Operator::Subtract),
                Token::Operator(Operator::Multiply),
                Token::Operator(Operator::Divide),
            ]
        );
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(tokenize("3.25").unwrap(), vec![Token::Number(3.25)]);
        assert_eq!(tokenize("0.").unwrap(), vec![Token::Number(0.0)]);
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("007").unwrap(), vec![Token::Number(7.0)]);
    }

    #[test]
    fn test_multiple_points_rejected() {
        assert_eq!(
            tokenize("1.2.3"),
            Err(TokenizeError::MalformedNumber { position: 0 })
        );
        assert_eq!(
            tokenize("4+1..2"),
            Err(TokenizeError::MalformedNumber { position: 2 })
        );
        assert_eq!(
            tokenize("."),
            Err(TokenizeError::MalformedNumber { position: 0 })
        );
    }

    #[test]
    fn test_invalid_character_position() {
        assert_eq!(
            tokenize("2×3*4"),
            Err(TokenizeError::InvalidCharacter { ch: '*', position: 3 })
        );
        assert_eq!(
            tokenize("1 + 1"),
            Err(TokenizeError::InvalidCharacter { ch: ' ', position: 1 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_restartable() {
        let expr = "7÷(2+.5)";
        assert_eq!(tokenize(expr).unwrap(), tokenize(expr).unwrap());
    }
}

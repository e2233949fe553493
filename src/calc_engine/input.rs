//! Key-press policy for building an expression one key at a time.
//!
//! These are pure string transforms: the caller owns the expression and
//! stores whatever comes back.

use std::str::FromStr;

use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::tokenizer::Operator;

/// A calculator key that contributes to the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single decimal digit, `0..=9`. Other values append nothing; build
    /// it with [`Key::digit`] to have that checked up front.
    Digit(u8),
    DoubleZero,
    Operator(Operator),
    Decimal,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key: '{0}'")]
pub struct UnknownKey(pub String);

impl Key {
    pub fn digit(d: u8) -> Option<Key> {
        (d <= 9).then_some(Key::Digit(d))
    }

    /// Maps a keyboard character to a key. `*` and `/` stand in for
    /// `×` and `÷`.
    pub fn from_char(c: char) -> Option<Key> {
        match c {
            '0'..='9' => c.to_digit(10).and_then(|d| Key::digit(d as u8)),
            '*' => Some(Key::Operator(Operator::Multiply)),
            '/' => Some(Key::Operator(Operator::Divide)),
            '.' | ',' => Some(Key::Decimal),
            '(' => Some(Key::LeftParen),
            ')' => Some(Key::RightParen),
            _ => Operator::from_symbol(c).map(Key::Operator),
        }
    }

    /// The button label, which is also the text the key appends.
    pub fn label(&self) -> String {
        match self {
            Key::Digit(d) => d.to_string(),
            Key::DoubleZero => "00".to_string(),
            Key::Operator(op) => op.symbol().to_string(),
            Key::Decimal => ".".to_string(),
            Key::LeftParen => "(".to_string(),
            Key::RightParen => ")".to_string(),
        }
    }

    fn is_zero(&self) -> bool {
        matches!(self, Key::Digit(0) | Key::DoubleZero)
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "00" {
            return Ok(Key::DoubleZero);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c).ok_or_else(|| UnknownKey(s.to_string())),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// Extends `current` with `key`, or returns it unchanged when the key is
/// not allowed in this position.
pub fn append(current: &str, key: Key) -> String {
    let last = current.chars().last();
    let mut exp = current.to_string();

    match key {
        Key::Digit(d) if d > 9 => {}
        Key::Digit(_) | Key::DoubleZero => {
            if current.is_empty() && key.is_zero() {
                return exp;
            }
            exp.push_str(&key.label());
        }
        Key::Operator(op) => {
            if last.is_some_and(Operator::is_symbol) {
                exp.pop();
            }
            exp.push(op.symbol());
        }
        Key::Decimal => match last {
            None | Some('.') => {}
            Some(c) => {
                if Operator::is_symbol(c) || c == '(' {
                    exp.push('0');
                }
                exp.push('.');
            }
        },
        Key::LeftParen => exp.push('('),
        Key::RightParen => exp.push(')'),
    }
    exp
}

/// Removes the last grapheme cluster, which for every keypad symbol is a
/// single `char`; no-op on an empty expression.
pub fn delete(current: &str) -> String {
    match current.grapheme_indices(true).next_back() {
        Some((idx, _)) => current[..idx].to_string(),
        None => String::new(),
    }
}

pub fn clear() -> String {
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(label: &str) -> Key {
        label.parse().unwrap()
    }

    #[test]
    fn test_leading_zero_suppressed() {
        assert_eq!(append("", key("0")), "");
        assert_eq!(append("", key("00")), "");
        assert_eq!(append("", key("5")), "5");
        assert_eq!(append("5", key("0")), "50");
        assert_eq!(append("5", key("00")), "500");
        assert_eq!(append("5+", key("0")), "5+0");
    }

    #[test]
    fn test_operator_replaces_operator() {
        assert_eq!(append("3+", key("+")), "3+");
        assert_eq!(append("3+", key("-")), "3-");
        assert_eq!(append("3×", key("÷")), "3÷");
        assert_eq!(append("3", key("×")), "3×");
        assert_eq!(append("(", key("-")), "(-");
    }

    #[test]
    fn test_operator_on_empty() {
        assert_eq!(append("", key("+")), "+");
        assert_eq!(append("", key("-")), "-");
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(append("3+", key(".")), "3+0.");
        assert_eq!(append("3", key(".")), "3.");
        assert_eq!(append("3.", key(".")), "3.");
        assert_eq!(append("(", key(".")), "(0.");
        assert_eq!(append("", key(".")), "");
    }

    #[test]
    fn test_decimal_only_checks_last_character() {
        // Blocked only when directly repeated; the tokenizer rejects the rest.
        assert_eq!(append("1.2", key(".")), "1.2.");
    }

    #[test]
    fn test_parentheses_appended() {
        assert_eq!(append("", key("(")), "(");
        assert_eq!(append("(2+3", key(")")), "(2+3)");
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(key("7"), Key::Digit(7));
        assert_eq!(key("00"), Key::DoubleZero);
        assert_eq!(key("*"), Key::Operator(Operator::Multiply));
        assert_eq!(key("÷"), Key::Operator(Operator::Divide));
        assert!("000".parse::<Key>().is_err());
        assert!("x".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn test_digit_range() {
        assert_eq!(Key::digit(9), Some(Key::Digit(9)));
        assert_eq!(Key::digit(10), None);
        assert_eq!(append("", Key::Digit(12)), "");
        assert_eq!(append("4", Key::Digit(255)), "4");
    }

    #[test]
    fn test_delete_removes_one_grapheme() {
        assert_eq!(delete("12÷"), "12");
        // 'e' followed by a combining acute accent is one grapheme.
        assert_eq!(delete("1e\u{301}"), "1");
    }

    #[test]
    fn test_delete() {
        assert_eq!(delete("12+3"), "12+");
        assert_eq!(delete("3×"), "3");
        assert_eq!(delete(""), "");
    }

    #[test]
    fn test_delete_to_empty() {
        let mut expr = "12÷(3-0.5)".to_string();
        for _ in 0..expr.chars().count() {
            expr = delete(&expr);
        }
        assert_eq!(expr, "");
        assert_eq!(clear(), "");
    }
}

//! Expression core: tokenizer, evaluator and the key-press normalizer.
//!
//! Nothing in here holds state between calls.

pub mod error;
pub mod input;
pub mod parser;
pub mod tokenizer;

pub use error::{EvalError, TokenizeError};
pub use input::{append, clear, delete, Key, UnknownKey};
pub use parser::{evaluate, evaluate_traced, EvaluationTrace, Parser, Step};
pub use tokenizer::{tokenize, Operator, Token};

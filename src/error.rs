use thiserror::Error;

use crate::analyzer::ParseError;
use crate::tokenizer::token::TokenizerError;

/// Why an expression text has no derivation tree.
///
/// Failures stay inside the engine: the evaluator driver and every compiled
/// predicate turn them into `Value::Absent`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] TokenizerError),
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),
    #[error("Unexpected token at {position}: {found}")]
    TrailingInput { position: usize, found: String },
    #[error("Nesting deeper than {limit} at {position}")]
    TooDeep { position: usize, limit: usize },
    #[error("More than {limit} binary operators, the last at {position}")]
    TooManyOperators { position: usize, limit: usize },
    #[error("Empty expression")]
    Empty,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type InternalResult<T> = Result<T, Error>;

//! # Core Parser Definitions
//!
//! The parser interface and error type at the base of the token-level
//! combinator system.

use thiserror::Error;

/// Parser trait defines the core parsing interface.
///
/// A parser reads from `input` starting at `pos` and either succeeds with the
/// position after what it consumed plus a value, or fails with a
/// [`ParseError`]. Parsers never mutate shared state, so running the same
/// parser twice over the same input gives the same answer.
pub trait Parser<I, O> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O>;
}

impl<I, O> Parser<I, O> for Box<dyn Parser<I, O>> {
    fn parse(&self, input: &[I], pos: usize) -> ParseResult<O> {
        (**self).parse(input, pos)
    }
}

pub type ParseResult<O> = Result<(usize, O), ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected EOF")]
    EOF,
    #[error("No alternative")]
    NoAlternative,
    #[error("Fail: {0}")]
    Fail(String),
    #[error("{message}: {inner}")]
    WithContext {
        message: String,
        inner: Box<ParseError>,
    },
}

impl ParseError {
    /// Innermost error, without the context trail.
    pub fn root_cause(&self) -> &ParseError {
        match self {
            ParseError::WithContext { inner, .. } => inner.root_cause(),
            other => other,
        }
    }
}

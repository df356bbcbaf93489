//! # Token Preprocessing
//!
//! The preprocessor sits between the tokenizer and the analyzer:
//!
//! ```text
//! Expression Text → Tokenizer → Preprocessor → Analyzer → Expression tree
//! ```
//!
//! Whitespace, newlines and comments are insignificant in the trigger
//! language; they are tokenized for exact positions and filtered out here so
//! the combinators only ever see significant tokens.

use crate::tokenizer::token::{Token, TokenSpan};

/// A trait for preprocessing different types of input
pub trait Preprocessor<T, U = T> {
    /// Process the input of type T and return the processed result
    fn process(&self, input: T) -> U;
}

/// Token-specific preprocessor implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenPreprocessor;

impl TokenPreprocessor {
    pub fn new() -> Self {
        Self
    }
}

impl Preprocessor<Vec<TokenSpan>> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<TokenSpan> {
        input
            .into_iter()
            .filter(|span| {
                !matches!(
                    span.token,
                    Token::Whitespace(_) | Token::Newline | Token::Comment { .. }
                )
            })
            .collect()
    }
}

impl Preprocessor<Vec<TokenSpan>, Vec<Token>> for TokenPreprocessor {
    fn process(&self, input: Vec<TokenSpan>) -> Vec<Token> {
        let spans: Vec<TokenSpan> = self.process(input);
        spans.into_iter().map(|span| span.token).collect()
    }
}

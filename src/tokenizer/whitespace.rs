//! # Whitespace Token Handling
//!
//! Whitespace and newlines are kept as tokens so that every [`TokenSpan`]
//! carries an exact source position; the
//! [`TokenPreprocessor`](crate::preprocessor::TokenPreprocessor) drops them
//! before parsing.
//!
//! [`TokenSpan`]: super::token::TokenSpan

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::map,
    error::context,
};

use super::token::{ParserResult, Token};

/// Parses spaces and tabs into a [`Token::Whitespace`].
///
/// # Examples
///
/// ```
/// # use tripwire::tokenizer::whitespace::parse_whitespace;
/// # use tripwire::tokenizer::token::Token;
/// let (rest, token) = parse_whitespace("   hp").unwrap();
/// assert_eq!(token, Token::Whitespace("   ".to_string()));
/// assert_eq!(rest, "hp");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<Token> {
    context(
        "whitespace expected",
        map(take_while1(|c: char| c == ' ' || c == '\t'), |ws: &str| {
            Token::Whitespace(ws.to_string())
        }),
    )(input)
}

/// Parses `\n` or `\r\n` into a [`Token::Newline`].
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<Token> {
    context(
        "newline expected",
        map(alt((tag("\r\n"), tag("\n"))), |_| Token::Newline),
    )(input)
}

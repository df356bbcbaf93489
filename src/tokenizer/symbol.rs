//! # Symbol Token Handling
//!
//! This module defines the symbols (operators and delimiters) recognized by the
//! trigger language and provides functionality for parsing symbol tokens.
//!
//! ## Symbol Types
//!
//! * [`Operator`]: arithmetic, comparison, logical and access operators
//! * [`Delimiter`]: grouping and punctuation
//!
//! ## Parsing Strategy
//!
//! Symbols are parsed longest-match first so that `<=` is not read as `<`
//! followed by `=`, `!=` is not read as `!`, and `?.` is a single optional
//! access token.

use strum_macros::{AsRefStr, Display, EnumString};

use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{map, value},
    error::context,
};

use super::token::{ParserResult, Token};

/// Represents operators in the trigger language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
pub enum Operator {
    /// Member access operator (`.`)
    #[strum(serialize = ".")]
    Dot,
    /// Optional member access operator (`?.`)
    #[strum(serialize = "?.")]
    OptionalDot,

    /// Equality comparison operator (`==`)
    #[strum(serialize = "==")]
    EqualEqual,
    /// Inequality comparison operator (`!=`)
    #[strum(serialize = "!=")]
    NotEqual,
    /// Greater than comparison operator (`>`)
    #[strum(serialize = ">")]
    Greater,
    /// Greater than or equal comparison operator (`>=`)
    #[strum(serialize = ">=")]
    GreaterEqual,
    /// Less than comparison operator (`<`)
    #[strum(serialize = "<")]
    Less,
    /// Less than or equal comparison operator (`<=`)
    #[strum(serialize = "<=")]
    LessEqual,

    /// Addition operator (`+`)
    #[strum(serialize = "+")]
    Plus,
    /// Subtraction and negation operator (`-`)
    #[strum(serialize = "-")]
    Minus,
    /// Multiplication operator (`*`)
    #[strum(serialize = "*")]
    Multiply,
    /// Division operator (`/`)
    #[strum(serialize = "/")]
    Divide,
    /// Remainder operator (`%`)
    #[strum(serialize = "%")]
    Modulo,

    /// Logical AND operator (`&&`)
    #[strum(serialize = "&&")]
    And,
    /// Logical OR operator (`||`)
    #[strum(serialize = "||")]
    Or,
    /// Logical NOT operator (`!`)
    #[strum(serialize = "!")]
    Not,
}

/// Represents delimiters in the trigger language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Opening brace (`{`) for object literals
    OpenBrace,
    /// Closing brace (`}`)
    CloseBrace,
    /// Opening parenthesis (`(`) for grouping and calls
    OpenParen,
    /// Closing parenthesis (`)`)
    CloseParen,
    /// Opening bracket (`[`) for array literals and indexing
    OpenBracket,
    /// Closing bracket (`]`)
    CloseBracket,
    /// Comma (`,`) between list elements and arguments
    Comma,
    /// Colon (`:`) between object keys and values
    Colon,
}

impl Delimiter {
    /// Source text of the delimiter.
    pub fn symbol(&self) -> &'static str {
        match self {
            Delimiter::OpenBrace => "{",
            Delimiter::CloseBrace => "}",
            Delimiter::OpenParen => "(",
            Delimiter::CloseParen => ")",
            Delimiter::OpenBracket => "[",
            Delimiter::CloseBracket => "]",
            Delimiter::Comma => ",",
            Delimiter::Colon => ":",
        }
    }
}

/// Parses an operator token from the input string.
///
/// Multi-character operators are tried before their single-character
/// prefixes.
///
/// # Examples
///
/// ```
/// # use tripwire::tokenizer::symbol::{parse_operator, Operator};
/// # use tripwire::tokenizer::token::Token;
/// let (rest, token) = parse_operator("?.pos").unwrap();
/// assert_eq!(token, Token::Operator(Operator::OptionalDot));
/// assert_eq!(rest, "pos");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_operator(input: &str) -> ParserResult<Token> {
    context(
        "operator",
        map(
            alt((
                // Multi-character operators (matched first for longest-match)
                value(Operator::OptionalDot, tag("?.")),
                value(Operator::EqualEqual, tag("==")),
                value(Operator::NotEqual, tag("!=")),
                value(Operator::GreaterEqual, tag(">=")),
                value(Operator::LessEqual, tag("<=")),
                value(Operator::And, tag("&&")),
                value(Operator::Or, tag("||")),
                // Single-character operators
                value(Operator::Dot, tag(".")),
                value(Operator::Greater, tag(">")),
                value(Operator::Less, tag("<")),
                value(Operator::Plus, tag("+")),
                value(Operator::Minus, tag("-")),
                value(Operator::Multiply, tag("*")),
                value(Operator::Divide, tag("/")),
                value(Operator::Modulo, tag("%")),
                value(Operator::Not, tag("!")),
            )),
            Token::Operator,
        ),
    )(input)
}

/// Parses a delimiter token from the input string.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_delimiter(input: &str) -> ParserResult<Token> {
    context(
        "delimiter",
        map(
            alt((
                value(Delimiter::OpenBrace, tag("{")),
                value(Delimiter::CloseBrace, tag("}")),
                value(Delimiter::OpenParen, tag("(")),
                value(Delimiter::CloseParen, tag(")")),
                value(Delimiter::OpenBracket, tag("[")),
                value(Delimiter::CloseBracket, tag("]")),
                value(Delimiter::Comma, tag(",")),
                value(Delimiter::Colon, tag(":")),
            )),
            Token::Delimiter,
        ),
    )(input)
}

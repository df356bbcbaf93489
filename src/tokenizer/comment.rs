//! # Comment Token Handling
//!
//! Comments are insignificant in trigger expressions but are still tokenized
//! so positions stay exact. Two forms are recognized:
//!
//! * **Line Comments**: `// text` up to the end of the line
//! * **Block Comments**: `/* text */`

use nom::{
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::not_line_ending,
    combinator::map,
    error::context,
    sequence::{delimited, preceded},
};

use super::token::{CommentType, ParserResult, Token};

/// Parses a line comment. The content is trimmed.
///
/// # Examples
///
/// ```
/// # use tripwire::tokenizer::comment::parse_line_comment;
/// # use tripwire::tokenizer::token::{Token, CommentType};
/// let (rest, token) = parse_line_comment("// low health\nself.hp").unwrap();
/// assert_eq!(token, Token::Comment {
///     content: "low health".to_string(),
///     comment_type: CommentType::Line,
/// });
/// assert_eq!(rest, "\nself.hp");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_line_comment(input: &str) -> ParserResult<Token> {
    context(
        "line comment",
        map(preceded(tag("//"), not_line_ending), |content: &str| {
            Token::Comment {
                content: content.trim().to_string(),
                comment_type: CommentType::Line,
            }
        }),
    )(input)
}

/// Parses a block comment. Block comments do not nest.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_block_comment(input: &str) -> ParserResult<Token> {
    context(
        "block comment",
        map(
            delimited(tag("/*"), take_until("*/"), tag("*/")),
            |content: &str| Token::Comment {
                content: content.to_string(),
                comment_type: CommentType::Block,
            },
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<Token> {
    context("comment", alt((parse_block_comment, parse_line_comment)))(input)
}

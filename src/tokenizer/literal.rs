use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize, value},
    error::context,
    multi::fold_many0,
    sequence::{delimited, pair, preceded},
};

use super::token::{ParserResult, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => write!(f, "{:?}", s),
        }
    }
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_escape(input: &str) -> ParserResult<char> {
    context(
        "escape sequence",
        preceded(
            char('\\'),
            alt((
                value('\n', char('n')),
                value('\t', char('t')),
                value('\r', char('r')),
                value('\0', char('0')),
                value('\\', char('\\')),
                value('\'', char('\'')),
                value('"', char('"')),
            )),
        ),
    )(input)
}

/// Body of a quoted string up to (not including) the closing `quote`.
fn string_body<'a>(quote: char) -> impl FnMut(&'a str) -> ParserResult<'a, String> {
    let stop: &'static str = if quote == '"' { "\\\"\n" } else { "\\'\n" };
    fold_many0(
        alt((
            map(is_not(stop), |part: &str| part.to_string()),
            map(parse_escape, |c| c.to_string()),
        )),
        String::new,
        |mut acc, part| {
            acc.push_str(&part);
            acc
        },
    )
}

#[tracing::instrument(level = "debug", skip(input))]
fn parse_string_literal(input: &str) -> ParserResult<Literal> {
    context(
        "string literal",
        map(
            alt((
                delimited(char('"'), string_body('"'), char('"')),
                delimited(char('\''), string_body('\''), char('\'')),
            )),
            Literal::String,
        ),
    )(input)
}

/// Unsigned integer or decimal; negation is the unary minus operator.
#[tracing::instrument(level = "debug", skip(input))]
fn parse_number_literal(input: &str) -> ParserResult<Literal> {
    context(
        "number literal",
        map_res(
            recognize(pair(digit1, opt(pair(char('.'), digit1)))),
            |s: &str| s.parse::<f64>().map(Literal::Number),
        ),
    )(input)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_literal(input: &str) -> ParserResult<Token> {
    context(
        "literal",
        map(
            alt((parse_string_literal, parse_number_literal)),
            Token::Literal,
        ),
    )(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_string() {
        let (rest, result) = parse_string_literal("\"hello world\"").unwrap();
        assert_eq!(rest, "");
        assert_eq!(result, Literal::String("hello world".to_string()));
    }

    #[test]
    fn test_single_quoted_string() {
        let (rest, result) = parse_string_literal("'enemy' == x").unwrap();
        assert_eq!(rest, " == x");
        assert_eq!(result, Literal::String("enemy".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let (rest, result) = parse_string_literal("\"\"").unwrap();
        assert_eq!(rest, "");
        assert_eq!(result, Literal::String(String::new()));
    }

    #[test]
    fn test_escapes() {
        let (_, result) = parse_string_literal(r#""a\"b\n\\""#).unwrap();
        assert_eq!(result, Literal::String("a\"b\n\\".to_string()));

        let (_, result) = parse_string_literal(r#"'it\'s'"#).unwrap();
        assert_eq!(result, Literal::String("it's".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_string_literal("\"open").is_err());
    }

    #[test]
    fn test_number_literals() {
        let (rest, result) = parse_number_literal("123").unwrap();
        assert_eq!(result, Literal::Number(123.0));
        assert_eq!(rest, "");

        let (rest, result) = parse_number_literal("0.25)").unwrap();
        assert_eq!(result, Literal::Number(0.25));
        assert_eq!(rest, ")");

        // a trailing dot belongs to member access, not the number
        let (rest, result) = parse_number_literal("3.x").unwrap();
        assert_eq!(result, Literal::Number(3.0));
        assert_eq!(rest, ".x");

        assert!(parse_number_literal("-1").is_err());
    }
}

use super::super::{core::*, prelude::*};
use crate::ast;
use crate::grammar;
use crate::tokenizer::{
    literal::Literal,
    symbol::{Delimiter, Operator},
    token::Token,
};

// 基本的なパーサー
pub fn parse_identifier() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Identifier(s) => Some(s.clone()),
            _ => None,
        }),
        "identifier",
    )
}

pub fn parse_literal() -> impl Parser<Token, ast::Literal> {
    with_context(
        choice(vec![
            Box::new(parse_number()),
            Box::new(parse_string()),
            Box::new(parse_keyword_literal()),
        ]),
        "literal",
    )
}

// リテラルパーサー
pub fn parse_number() -> impl Parser<Token, ast::Literal> {
    satisfy(|token: &Token| match token {
        Token::Literal(Literal::Number(n)) => Some(ast::Literal::Number(*n)),
        _ => None,
    })
}

pub fn parse_string() -> impl Parser<Token, ast::Literal> {
    satisfy(|token: &Token| match token {
        Token::Literal(Literal::String(s)) => Some(ast::Literal::String(s.clone())),
        _ => None,
    })
}

pub fn parse_string_value() -> impl Parser<Token, String> {
    satisfy(|token: &Token| match token {
        Token::Literal(Literal::String(s)) => Some(s.clone()),
        _ => None,
    })
}

/// `true`, `false`, `null` and `undefined`.
pub fn parse_keyword_literal() -> impl Parser<Token, ast::Literal> {
    satisfy(|token: &Token| match token {
        Token::Keyword(keyword) => grammar::keyword_literal(keyword),
        _ => None,
    })
}

pub fn parse_operator(op: Operator) -> impl Parser<Token, Token> {
    equal(Token::Operator(op))
}

// 区切り文字パーサー
pub fn parse_comma() -> impl Parser<Token, Token> {
    with_context(equal(Token::Delimiter(Delimiter::Comma)), "comma")
}

pub fn parse_colon() -> impl Parser<Token, Token> {
    equal(Token::Delimiter(Delimiter::Colon))
}

pub fn parse_open_paren() -> impl Parser<Token, Token> {
    equal(Token::Delimiter(Delimiter::OpenParen))
}

pub fn parse_close_paren() -> impl Parser<Token, Token> {
    with_context(
        equal(Token::Delimiter(Delimiter::CloseParen)),
        "close paren",
    )
}

pub fn parse_open_bracket() -> impl Parser<Token, Token> {
    equal(Token::Delimiter(Delimiter::OpenBracket))
}

pub fn parse_close_bracket() -> impl Parser<Token, Token> {
    with_context(
        equal(Token::Delimiter(Delimiter::CloseBracket)),
        "close bracket",
    )
}

pub fn parse_open_brace() -> impl Parser<Token, Token> {
    equal(Token::Delimiter(Delimiter::OpenBrace))
}

pub fn parse_close_brace() -> impl Parser<Token, Token> {
    with_context(
        equal(Token::Delimiter(Delimiter::CloseBrace)),
        "close brace",
    )
}

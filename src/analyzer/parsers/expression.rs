use super::{
    super::{core::*, prelude::*},
    *,
};
use crate::ast;
use crate::grammar::{self, BinaryLevel, Chaining};
use crate::tokenizer::token::Token;

pub fn parse_expression() -> impl Parser<Token, ast::Expression> {
    with_context(lazy(|| parse_binary_level(0)), "expression")
}

/// Binary level `depth` of [`grammar::BINARY_LEVELS`]; past the tightest
/// level the operands are unary expressions.
fn parse_binary_level(depth: usize) -> Box<dyn Parser<Token, ast::Expression>> {
    match grammar::BINARY_LEVELS.get(depth).copied() {
        Some(level) => Box::new(parse_level(level, depth)),
        None => Box::new(parse_unary()),
    }
}

fn parse_level(level: &'static BinaryLevel, depth: usize) -> impl Parser<Token, ast::Expression> {
    let operand = move || parse_binary_level(depth + 1);
    let rest: Box<dyn Parser<Token, Vec<(ast::BinaryOperator, ast::Expression)>>> =
        match level.chaining {
            Chaining::LeftFold => Box::new(many(tuple2(
                parse_level_operator(level),
                lazy(operand),
            ))),
            Chaining::Single => Box::new(map(
                optional(tuple2(parse_level_operator(level), lazy(operand))),
                |pair: Option<(ast::BinaryOperator, ast::Expression)>| {
                    pair.into_iter().collect::<Vec<_>>()
                },
            )),
        };
    with_context(
        map(tuple2(lazy(operand), rest), |(first, rest)| {
            rest.into_iter()
                .fold(first, |left, (op, right)| ast::Expression::binary(op, left, right))
        }),
        level.name,
    )
}

fn parse_level_operator(level: &'static BinaryLevel) -> impl Parser<Token, ast::BinaryOperator> {
    satisfy(move |token: &Token| match token {
        Token::Operator(op) => level.lookup(op),
        _ => None,
    })
}

fn parse_unary() -> impl Parser<Token, ast::Expression> {
    with_context(
        choice(vec![
            Box::new(map(
                tuple2(parse_unary_operator(), lazy(parse_unary_operand)),
                |(op, operand)| ast::Expression::unary(op, operand),
            )),
            Box::new(parse_postfix()),
        ]),
        "unary",
    )
}

fn parse_unary_operand() -> Box<dyn Parser<Token, ast::Expression>> {
    Box::new(parse_unary())
}

fn parse_unary_operator() -> impl Parser<Token, ast::UnaryOperator> {
    satisfy(|token: &Token| match token {
        Token::Operator(op) => grammar::unary_operator(op),
        _ => None,
    })
}

fn parse_postfix() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            tuple2(parse_primary(), many(parse_chain_link())),
            |(base, links)| ast::Expression::chain(base, links),
        ),
        "postfix",
    )
}

fn parse_chain_link() -> impl Parser<Token, ast::ChainLink> {
    choice(vec![
        Box::new(parse_access_link()),
        Box::new(parse_index_link()),
    ])
}

// `.name`, `?.name`, `.name(args)`, `?.name(args)`
fn parse_access_link() -> impl Parser<Token, ast::ChainLink> {
    map(
        tuple3(
            parse_access_operator(),
            parse_identifier(),
            optional(parse_arguments()),
        ),
        |(optional, name, arguments)| match arguments {
            Some(arguments) => ast::ChainLink::MethodCall {
                name,
                arguments,
                optional,
            },
            None => ast::ChainLink::Member { name, optional },
        },
    )
}

fn parse_access_operator() -> impl Parser<Token, bool> {
    satisfy(|token: &Token| match token {
        Token::Operator(op) => grammar::access_operator(op),
        _ => None,
    })
}

fn parse_index_link() -> impl Parser<Token, ast::ChainLink> {
    with_context(
        map(
            delimited(
                as_unit(parse_open_bracket()),
                lazy(parse_expression),
                as_unit(parse_close_bracket()),
            ),
            |index| ast::ChainLink::Index(Box::new(index)),
        ),
        "index",
    )
}

/// Parenthesized, comma separated arguments; a trailing comma is allowed.
fn parse_arguments() -> impl Parser<Token, Vec<ast::Expression>> {
    with_context(
        delimited(
            as_unit(parse_open_paren()),
            separated_list(lazy(parse_expression), as_unit(parse_comma())),
            as_unit(parse_close_paren()),
        ),
        "arguments",
    )
}

fn parse_primary() -> impl Parser<Token, ast::Expression> {
    with_context(
        choice(vec![
            Box::new(parse_parenthesized()),
            Box::new(parse_array()),
            Box::new(parse_object()),
            Box::new(map(parse_literal(), ast::Expression::Literal)),
            Box::new(parse_call_or_identifier()),
        ]),
        "primary",
    )
}

fn parse_parenthesized() -> impl Parser<Token, ast::Expression> {
    delimited(
        as_unit(parse_open_paren()),
        lazy(parse_expression),
        as_unit(parse_close_paren()),
    )
}

fn parse_array() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            delimited(
                as_unit(parse_open_bracket()),
                separated_list(lazy(parse_expression), as_unit(parse_comma())),
                as_unit(parse_close_bracket()),
            ),
            ast::Expression::Array,
        ),
        "array",
    )
}

fn parse_object() -> impl Parser<Token, ast::Expression> {
    with_context(
        map(
            delimited(
                as_unit(parse_open_brace()),
                separated_list(parse_object_entry(), as_unit(parse_comma())),
                as_unit(parse_close_brace()),
            ),
            ast::Expression::Object,
        ),
        "object",
    )
}

// key: value, where the key is a bare identifier or a string
fn parse_object_entry() -> impl Parser<Token, (String, ast::Expression)> {
    tuple2(
        choice(vec![
            Box::new(parse_identifier()),
            Box::new(parse_string_value()),
        ]),
        preceded(as_unit(parse_colon()), lazy(parse_expression)),
    )
}

fn parse_call_or_identifier() -> impl Parser<Token, ast::Expression> {
    map(
        tuple2(parse_identifier(), optional(parse_arguments())),
        |(name, arguments)| match arguments {
            Some(arguments) => ast::Expression::Call {
                function: name,
                arguments,
            },
            None => ast::Expression::Identifier(name),
        },
    )
}

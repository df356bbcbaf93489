//! # Trigger Language Grammar
//!
//! Declarative description of the language's syntax. Nothing in this module
//! parses; the [`analyzer`](crate::analyzer) reads these tables to build its
//! productions, so operator sets and binding strength live in one place.
//!
//! Binding strength, loosest first:
//!
//! ```text
//! Expression   = LogicalOr
//! LogicalOr    = LogicalAnd ("||" LogicalAnd)*
//! LogicalAnd   = Comparison ("&&" Comparison)*
//! Comparison   = Additive (("==" | "!=" | "<=" | ">=" | "<" | ">") Additive)*
//! Additive     = Multiplicative (("+" | "-") Multiplicative)*
//! Multiplicative = Unary (("*" | "/" | "%") Unary)*
//! Unary        = ("!" | "-") Unary | Postfix
//! Postfix      = Primary Link*
//! Link         = "." ident "(" Args ")" | "?." ident "(" Args ")"
//!              | "." ident | "?." ident | "[" Expression "]"
//! Primary      = "(" Expression ")" | "[" Args "]" | "{" Entries "}"
//!              | number | string | "true" | "false" | "null" | "undefined"
//!              | ident "(" Args ")" | ident
//! Args         = (Expression ("," Expression)* ","?)?
//! Entries      = ((ident | string) ":" Expression ("," ...)* ","?)?
//! ```
//!
//! `//` and `/* */` comments are insignificant whitespace.
//!
//! The comparison level folds to the left like the other binary levels, so
//! `a < b < c` is read as `(a < b) < c`. Switching
//! [`COMPARISON`]'s chaining to [`Chaining::Single`] makes the analyzer
//! accept at most one comparison operator per level instead.
//!
//! The parser descends once per bracket and prefix operator, and every
//! binary operator adds a level to the tree. [`check_limits`] bounds both
//! before any descent starts.

use crate::ast::{BinaryOperator, Literal, UnaryOperator};
use crate::tokenizer::{
    keyword::Keyword,
    symbol::{Delimiter, Operator},
    token::Token,
};

/// Deepest nesting of brackets and prefix operators an expression may have.
pub const MAX_NESTING: usize = 64;

/// Most binary operators one expression may hold.
pub const MAX_BINARY_OPERATORS: usize = 256;

/// How repeated operators of one binary level combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chaining {
    /// `a op b op c` is `(a op b) op c`.
    LeftFold,
    /// At most one operator; a second one is left for the caller and
    /// surfaces as trailing input.
    Single,
}

/// One precedence level of binary operators.
#[derive(Debug)]
pub struct BinaryLevel {
    pub name: &'static str,
    pub operators: &'static [(Operator, BinaryOperator)],
    pub chaining: Chaining,
}

impl BinaryLevel {
    /// The binary operator this level assigns to a token operator, if any.
    pub fn lookup(&self, op: &Operator) -> Option<BinaryOperator> {
        self.operators
            .iter()
            .find(|(token, _)| token == op)
            .map(|(_, binary)| *binary)
    }
}

pub const LOGICAL_OR: BinaryLevel = BinaryLevel {
    name: "logical or",
    operators: &[(Operator::Or, BinaryOperator::Or)],
    chaining: Chaining::LeftFold,
};

pub const LOGICAL_AND: BinaryLevel = BinaryLevel {
    name: "logical and",
    operators: &[(Operator::And, BinaryOperator::And)],
    chaining: Chaining::LeftFold,
};

pub const COMPARISON: BinaryLevel = BinaryLevel {
    name: "comparison",
    operators: &[
        (Operator::EqualEqual, BinaryOperator::Equal),
        (Operator::NotEqual, BinaryOperator::NotEqual),
        (Operator::LessEqual, BinaryOperator::LessThanEqual),
        (Operator::GreaterEqual, BinaryOperator::GreaterThanEqual),
        (Operator::Less, BinaryOperator::LessThan),
        (Operator::Greater, BinaryOperator::GreaterThan),
    ],
    chaining: Chaining::LeftFold,
};

pub const ADDITIVE: BinaryLevel = BinaryLevel {
    name: "additive",
    operators: &[
        (Operator::Plus, BinaryOperator::Add),
        (Operator::Minus, BinaryOperator::Subtract),
    ],
    chaining: Chaining::LeftFold,
};

pub const MULTIPLICATIVE: BinaryLevel = BinaryLevel {
    name: "multiplicative",
    operators: &[
        (Operator::Multiply, BinaryOperator::Multiply),
        (Operator::Divide, BinaryOperator::Divide),
        (Operator::Modulo, BinaryOperator::Modulo),
    ],
    chaining: Chaining::LeftFold,
};

/// Binary levels, loosest binding first.
pub const BINARY_LEVELS: [&BinaryLevel; 5] = [
    &LOGICAL_OR,
    &LOGICAL_AND,
    &COMPARISON,
    &ADDITIVE,
    &MULTIPLICATIVE,
];

pub const UNARY_OPERATORS: &[(Operator, UnaryOperator)] = &[
    (Operator::Not, UnaryOperator::Not),
    (Operator::Minus, UnaryOperator::Negate),
];

/// Access operators introducing a chain link, paired with their optionality.
pub const ACCESS_OPERATORS: &[(Operator, bool)] =
    &[(Operator::Dot, false), (Operator::OptionalDot, true)];

pub const LITERAL_KEYWORDS: &[(Keyword, Literal)] = &[
    (Keyword::True, Literal::Boolean(true)),
    (Keyword::False, Literal::Boolean(false)),
    (Keyword::Null, Literal::Null),
    (Keyword::Undefined, Literal::Undefined),
];

pub fn unary_operator(op: &Operator) -> Option<UnaryOperator> {
    UNARY_OPERATORS
        .iter()
        .find(|(token, _)| token == op)
        .map(|(_, unary)| *unary)
}

pub fn access_operator(op: &Operator) -> Option<bool> {
    ACCESS_OPERATORS
        .iter()
        .find(|(token, _)| token == op)
        .map(|(_, optional)| *optional)
}

pub fn keyword_literal(keyword: &Keyword) -> Option<Literal> {
    LITERAL_KEYWORDS
        .iter()
        .find(|(kw, _)| kw == keyword)
        .map(|(_, literal)| literal.clone())
}

/// The first limit a token sequence breaks, with the offending token's index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitExceeded {
    Nesting(usize),
    BinaryOperators(usize),
}

/// Checks significant tokens against [`MAX_NESTING`] and
/// [`MAX_BINARY_OPERATORS`].
///
/// Nesting counts open brackets plus the prefix operators still waiting for
/// their operand, including those in front of an open bracket (`!(!(x))` is
/// four deep). A `-` directly after an operand is binary.
pub fn check_limits(tokens: &[Token]) -> Result<(), LimitExceeded> {
    // 括弧ごとに、その直前の前置演算子の数を積む
    let mut held: Vec<usize> = Vec::new();
    let mut held_total = 0;
    let mut prefix = 0;
    let mut operators = 0;
    let mut after_operand = false;

    for (index, token) in tokens.iter().enumerate() {
        match token {
            Token::Delimiter(
                Delimiter::OpenParen | Delimiter::OpenBracket | Delimiter::OpenBrace,
            ) => {
                held.push(prefix);
                held_total += prefix;
                prefix = 0;
                after_operand = false;
            }
            Token::Delimiter(
                Delimiter::CloseParen | Delimiter::CloseBracket | Delimiter::CloseBrace,
            ) => {
                held_total -= held.pop().unwrap_or(0);
                prefix = 0;
                after_operand = true;
            }
            Token::Delimiter(Delimiter::Comma | Delimiter::Colon) => {
                prefix = 0;
                after_operand = false;
            }
            Token::Operator(op) if !after_operand && unary_operator(op).is_some() => {
                prefix += 1;
            }
            Token::Operator(op) => {
                if BINARY_LEVELS.iter().any(|level| level.lookup(op).is_some()) {
                    operators += 1;
                    if operators > MAX_BINARY_OPERATORS {
                        return Err(LimitExceeded::BinaryOperators(index));
                    }
                }
                prefix = 0;
                after_operand = false;
            }
            _ => {
                prefix = 0;
                after_operand = true;
            }
        }

        if held.len() + held_total + prefix > MAX_NESTING {
            return Err(LimitExceeded::Nesting(index));
        }
    }
    Ok(())
}

/// Binding strength of a binary operator; larger binds tighter.
pub fn precedence(op: BinaryOperator) -> usize {
    BINARY_LEVELS
        .iter()
        .position(|level| level.operators.iter().any(|(_, binary)| *binary == op))
        .map(|index| index + 1)
        .unwrap_or(0)
}

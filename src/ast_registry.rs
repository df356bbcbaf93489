use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::analyzer::{parsers::expression::parse_expression, Parser};
use crate::ast::Expression;
use crate::error::ParseFailure;
use crate::grammar::{self, LimitExceeded};
use crate::preprocessor::{Preprocessor, TokenPreprocessor};
use crate::tokenizer::token::{Token, TokenSpan, Tokenizer};

pub type ParseOutcome = Result<Arc<Expression>, ParseFailure>;

/// Memoizing parser keyed by exact expression text.
///
/// Repeated parses of one text hand out the same `Arc`. Failed parses are
/// memoized too unless disabled, so malformed text is reported once.
#[derive(Debug, Clone)]
pub struct AstRegistry {
    asts: Arc<DashMap<String, ParseOutcome>>,
    memoize_failures: bool,
}

impl Default for AstRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AstRegistry {
    pub fn new(memoize_failures: bool) -> Self {
        Self {
            asts: Arc::new(DashMap::new()),
            memoize_failures,
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn parse(&self, text: &str) -> ParseOutcome {
        if let Some(hit) = self.asts.get(text) {
            return hit.value().clone();
        }

        let outcome = parse_text(text).map(Arc::new);
        match &outcome {
            Ok(expr) => debug!(nodes = expr.size(), "parsed expression"),
            Err(failure) => {
                warn!(text, %failure, "expression failed to parse");
                if !self.memoize_failures {
                    return outcome;
                }
            }
        }

        // 先に登録された結果を優先する
        self.asts
            .entry(text.to_string())
            .or_insert(outcome)
            .value()
            .clone()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.asts.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.asts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asts.is_empty()
    }

    pub fn clear(&self) {
        self.asts.clear();
    }
}

/// Parses one expression text without touching any cache.
///
/// The whole text must form a single expression; leftovers are reported as
/// [`ParseFailure::TrailingInput`] with their byte offset.
pub fn parse_text(text: &str) -> Result<Expression, ParseFailure> {
    let spans = significant_tokens(text)?;
    let tokens: Vec<Token> = spans.iter().map(|span| span.token.clone()).collect();
    let (pos, expr) = parse_expression().parse(&tokens, 0)?;

    match spans.get(pos) {
        Some(span) => Err(ParseFailure::TrailingInput {
            position: span.start,
            found: span.token.to_string(),
        }),
        None => Ok(expr),
    }
}

/// Tokens of `text` the parser sees, once they pass the grammar's nesting
/// limits.
pub fn significant_tokens(text: &str) -> Result<Vec<TokenSpan>, ParseFailure> {
    let spans = Tokenizer::new().tokenize(text)?;
    let spans: Vec<TokenSpan> = TokenPreprocessor::new().process(spans);
    if spans.is_empty() {
        return Err(ParseFailure::Empty);
    }

    let tokens: Vec<Token> = spans.iter().map(|span| span.token.clone()).collect();
    match grammar::check_limits(&tokens) {
        Ok(()) => Ok(spans),
        Err(LimitExceeded::Nesting(index)) => Err(ParseFailure::TooDeep {
            position: spans[index].start,
            limit: grammar::MAX_NESTING,
        }),
        Err(LimitExceeded::BinaryOperators(index)) => Err(ParseFailure::TooManyOperators {
            position: spans[index].start,
            limit: grammar::MAX_BINARY_OPERATORS,
        }),
    }
}

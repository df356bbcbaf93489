//! # Trigger Expression Analyzer
//!
//! Turns the preprocessed token stream into an
//! [`Expression`](crate::ast::Expression) tree using parser combinators.
//!
//! ## Core Components
//!
//! * **Parser Trait**: the parsing contract ([`core`])
//! * **Combinators**: small composable parsers ([`combinators`], constructed via [`prelude`])
//! * **Productions**: one parser per grammar rule ([`parsers`]), driven by the
//!   tables in [`grammar`](crate::grammar)
//!
//! ## Position in the Pipeline
//!
//! ```text
//! Expression Text → Tokenizer → Preprocessor → Analyzer → Evaluator
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use tripwire::analyzer::{parsers::expression::parse_expression, Parser};
//! use tripwire::preprocessor::{Preprocessor, TokenPreprocessor};
//! use tripwire::tokenizer::token::{Token, Tokenizer};
//!
//! let spans = Tokenizer::new().tokenize("2 + 3 * 4").unwrap();
//! let tokens: Vec<Token> = TokenPreprocessor::new().process(spans);
//! let (pos, expr) = parse_expression().parse(&tokens, 0).unwrap();
//! assert_eq!(pos, tokens.len());
//! assert_eq!(expr.to_string(), "(2 + (3 * 4))");
//! ```

pub mod combinators;
pub mod core;
pub mod parsers;
pub mod prelude;

pub use core::ParseError;
pub use core::ParseResult;
pub use core::Parser;

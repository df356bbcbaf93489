//! # Tokenizer Component
//!
//! Lexical analysis of trigger expression text. Raw text becomes a stream of
//! [`TokenSpan`](token::TokenSpan)s, each with line, column and byte offsets.
//!
//! ## Component Structure
//!
//! * [`token`]: Core token types and the [`Tokenizer`](token::Tokenizer)
//! * [`keyword`]: Reserved words (`true`, `false`, `null`, `undefined`)
//! * [`symbol`]: Operators and delimiters
//! * [`literal`]: Number and string literals
//! * [`whitespace`]: Whitespace and newline handling
//! * [`comment`]: Line and block comments
//!
//! Whitespace and comment tokens are preserved here and removed by the
//! [`TokenPreprocessor`](crate::preprocessor::TokenPreprocessor).
//!
//! ## Usage Example
//!
//! ```rust
//! use tripwire::tokenizer::token::{Tokenizer, TokenSpan};
//!
//! fn tokenize_example() -> Result<Vec<TokenSpan>, Box<dyn std::error::Error>> {
//!     let mut tokenizer = Tokenizer::new();
//!     let tokens = tokenizer.tokenize("self.hp < self.maxHp * 0.3")?;
//!     Ok(tokens)
//! }
//! # tokenize_example().unwrap();
//! ```

pub mod comment;
pub mod keyword;
pub mod literal;
pub mod symbol;
pub mod token;
pub mod whitespace;

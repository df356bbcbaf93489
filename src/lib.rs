//! # Tripwire: Trigger Expression Engine
//!
//! Tripwire evaluates small boolean and numeric predicates such as
//! `distance(closest.enemy()?.pos) <= 2 && self.hp < self.maxHp * 0.3`
//! against live simulation state, many times per frame.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Text → Tokenizer → Preprocessor → Parser → Evaluator
//!   └──────────→ Specializing Compiler ──────────┘
//! ```
//!
//! ### Stage 1: Tokenization
//!
//! The [`tokenizer`] module turns raw text into positioned tokens, and the
//! [`preprocessor`] drops whitespace and comments.
//!
//! ### Stage 2: Parsing
//!
//! The [`analyzer`] module builds the [`ast`] with token-level parser
//! combinators, driven by the tables in [`grammar`]. The [`ast_registry`]
//! memoizes results by exact text.
//!
//! ### Stage 3: Evaluation
//!
//! The [`eval`] module walks the tree against a [`Context`] composed from
//! helper groups; [`helpers`] holds the standard groups a game host wires in.
//!
//! ### Stage 4: Compilation
//!
//! The [`compiler`] recognizes common shapes and emits closures that read host
//! data directly. The [`cache`] stores whichever tier resolved a text first.
//!
//! ```
//! use tripwire::{ExpressionCache, Context, Value};
//!
//! let cache = ExpressionCache::new();
//! let subject = Value::object([("hp", Value::Number(40.0)), ("maxHp", Value::Number(100.0))]);
//! let low = cache.compile("self.hp < self.maxHp * 0.5");
//! assert_eq!(low.call(&subject, &Context::empty()), Value::Boolean(true));
//! ```
//!
//! Language-level problems never abort the host: malformed text and failed
//! lookups evaluate to [`Value::Absent`].

pub mod analyzer;
pub mod ast;
pub mod ast_registry;
pub mod cache;
pub mod compiler;
pub mod config;
pub mod error;
pub mod eval;
pub mod grammar;
pub mod helpers;
pub mod preprocessor;
pub mod tokenizer;

pub use ast::Expression;
pub use ast_registry::AstRegistry;
pub use cache::{CacheStats, ExpressionCache};
pub use compiler::{CompiledPredicate, SpecializingCompiler, Tier};
pub use config::EngineConfig;
pub use error::{Error, InternalResult, ParseFailure};
pub use eval::{Context, ContextBuilder, Evaluator, HostObject, Value};

#[cfg(test)]
#[ctor::ctor]
fn init_tests() {
    // テスト全体で一度だけ tracing を初期化
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

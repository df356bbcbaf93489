//! # Expression Compilation
//!
//! A [`CompiledPredicate`] is what callers hold for an expression text: a
//! closure over `(subject, context)`. It comes from one of two tiers:
//!
//! * **Specialized**: the text matched a shape of the [`patterns`] catalog
//!   and the closure reads host data directly.
//! * **Generic**: the memoized tree is walked by the
//!   [`ExpressionEvaluator`].
//!
//! Both tiers answer the same value for the same inputs.

pub mod patterns;

use core::fmt;
use std::sync::Arc;

use crate::ast::Expression;
use crate::ast_registry::significant_tokens;
use crate::eval::{Context, ExpressionEvaluator, Scope, Value};

pub type PredicateFn = dyn Fn(&Value, &Context) -> Value + Send + Sync;

/// Which tier produced a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Name of the catalog pattern that matched.
    Specialized(&'static str),
    Generic,
}

#[derive(Clone)]
pub struct CompiledPredicate {
    tier: Tier,
    predicate: Arc<PredicateFn>,
}

impl CompiledPredicate {
    pub fn new(tier: Tier, predicate: Arc<PredicateFn>) -> Self {
        Self { tier, predicate }
    }

    /// Generic tier: walk `expr` with `subject_name` bound to the subject.
    pub fn generic(expr: Arc<Expression>, subject_name: impl Into<String>) -> Self {
        let subject_name = subject_name.into();
        let evaluator = ExpressionEvaluator::new();
        Self::new(
            Tier::Generic,
            Arc::new(move |subject: &Value, context: &Context| {
                let scope = Scope::new(context).with_subject(&subject_name, subject);
                evaluator.eval_expression(&expr, &scope)
            }),
        )
    }

    /// Stand-in for text that does not parse.
    pub fn absent() -> Self {
        Self::new(
            Tier::Generic,
            Arc::new(|_: &Value, _: &Context| Value::Absent),
        )
    }

    pub fn call(&self, subject: &Value, context: &Context) -> Value {
        (self.predicate)(subject, context)
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn is_specialized(&self) -> bool {
        matches!(self.tier, Tier::Specialized(_))
    }

    pub fn ptr_eq(&self, other: &CompiledPredicate) -> bool {
        Arc::ptr_eq(&self.predicate, &other.predicate)
    }
}

impl fmt::Debug for CompiledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("tier", &self.tier)
            .finish_non_exhaustive()
    }
}

/// Front of the catalog in [`patterns`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecializingCompiler;

impl SpecializingCompiler {
    pub fn new() -> Self {
        Self
    }

    /// The specialized predicate for `text`, or `None` when no pattern
    /// applies and the caller must fall back to parse + evaluate.
    ///
    /// Text the parser would reject for its nesting is never specialized,
    /// so both tiers answer absent for it.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn try_compile(&self, text: &str) -> Option<CompiledPredicate> {
        significant_tokens(text).ok()?;
        let (pattern, predicate) = patterns::specialize(text)?;
        tracing::debug!(pattern, "specialized");
        Some(CompiledPredicate::new(Tier::Specialized(pattern), predicate))
    }
}

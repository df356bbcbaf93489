use tracing::trace;

use super::{
    context::Context,
    expression::{ExpressionEvaluator, Scope},
    value::Value,
};
use crate::ast::Expression;
use crate::ast_registry::AstRegistry;
use crate::config::EngineConfig;

/// Parse + evaluate driver over a memoizing [`AstRegistry`].
///
/// Parse failures never reach the caller; the text evaluates to
/// [`Value::Absent`].
#[derive(Debug, Clone)]
pub struct Evaluator {
    registry: AstRegistry,
    expression_evaluator: ExpressionEvaluator,
    subject_name: String,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self::with_registry(
            AstRegistry::new(config.memoize_parse_failures),
            config.subject_name.clone(),
        )
    }

    pub fn with_registry(registry: AstRegistry, subject_name: impl Into<String>) -> Self {
        Self {
            registry,
            expression_evaluator: ExpressionEvaluator::new(),
            subject_name: subject_name.into(),
        }
    }

    pub fn registry(&self) -> &AstRegistry {
        &self.registry
    }

    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Evaluates a tree against the context alone.
    pub fn evaluate(&self, expr: &Expression, context: &Context) -> Value {
        self.expression_evaluator
            .eval_expression(expr, &Scope::new(context))
    }

    /// Evaluates a tree with the subject bound to the configured name.
    pub fn evaluate_with_subject(
        &self,
        expr: &Expression,
        subject: &Value,
        context: &Context,
    ) -> Value {
        let scope = Scope::new(context).with_subject(&self.subject_name, subject);
        self.expression_evaluator.eval_expression(expr, &scope)
    }

    /// Top level entry point: parse (memoized) and evaluate.
    pub fn evaluate_text(&self, text: &str, subject: &Value, context: &Context) -> Value {
        match self.registry.parse(text) {
            Ok(expr) => self.evaluate_with_subject(&expr, subject, context),
            Err(failure) => {
                trace!(text, %failure, "evaluating unparsable text as absent");
                Value::Absent
            }
        }
    }
}

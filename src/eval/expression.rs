use std::cmp::Ordering;

use tracing::trace;

use super::context::Context;
use super::value::Value;
use crate::ast::{BinaryOperator, ChainLink, Expression, Literal, UnaryOperator};

/// Name resolution for one evaluation: the subject binding first, then the
/// context.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    context: &'a Context,
    subject: Option<(&'a str, &'a Value)>,
}

impl<'a> Scope<'a> {
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            subject: None,
        }
    }

    pub fn with_subject(mut self, name: &'a str, subject: &'a Value) -> Self {
        self.subject = Some((name, subject));
        self
    }

    pub fn resolve(&self, name: &str) -> Value {
        if let Some((subject_name, subject)) = self.subject {
            if subject_name == name {
                return subject.clone();
            }
        }
        self.context.resolve(name).unwrap_or_else(|| {
            trace!(name, "unresolved identifier");
            Value::Absent
        })
    }
}

/// Whether an ordering operator holds for a comparison outcome. An
/// incomparable pair (NaN after coercion) never satisfies any of them.
pub fn ordering_holds(op: BinaryOperator, ordering: Option<Ordering>) -> bool {
    match (op, ordering) {
        (_, None) => false,
        (BinaryOperator::LessThan, Some(o)) => o == Ordering::Less,
        (BinaryOperator::GreaterThan, Some(o)) => o == Ordering::Greater,
        (BinaryOperator::LessThanEqual, Some(o)) => o != Ordering::Greater,
        (BinaryOperator::GreaterThanEqual, Some(o)) => o != Ordering::Less,
        _ => false,
    }
}

/// Tree-walking evaluator with one rule per production.
///
/// Evaluation never fails: anything that cannot be resolved becomes
/// [`Value::Absent`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn eval_expression(&self, expr: &Expression, scope: &Scope) -> Value {
        match expr {
            Expression::Literal(lit) => Self::eval_literal(lit),
            Expression::Identifier(name) => scope.resolve(name),
            Expression::Array(items) => Value::Array(self.eval_arguments(items, scope)),
            Expression::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), self.eval_expression(value, scope)))
                    .collect(),
            ),
            Expression::Call {
                function,
                arguments,
            } => self.eval_call(&scope.resolve(function), arguments, scope),
            Expression::Chain { base, links } => self.eval_chain(base, links, scope),
            Expression::Unary { op, operand } => self.eval_unary_op(op, operand, scope),
            Expression::Binary { op, left, right } => self.eval_binary_op(op, left, right, scope),
        }
    }

    fn eval_literal(lit: &Literal) -> Value {
        match lit {
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
            Literal::Undefined => Value::Absent,
        }
    }

    fn eval_arguments(&self, arguments: &[Expression], scope: &Scope) -> Vec<Value> {
        arguments
            .iter()
            .map(|arg| self.eval_expression(arg, scope))
            .collect()
    }

    // 呼び出し先が関数でなければ引数は評価しない
    fn eval_call(&self, callee: &Value, arguments: &[Expression], scope: &Scope) -> Value {
        match callee {
            Value::Function(f) => f.call(&self.eval_arguments(arguments, scope)),
            other => {
                trace!(callee = other.type_name(), "call of non-callable value");
                Value::Absent
            }
        }
    }

    fn eval_chain(&self, base: &Expression, links: &[ChainLink], scope: &Scope) -> Value {
        let mut current = self.eval_expression(base, scope);
        for link in links {
            if link.is_optional() && current.is_nullish() {
                return Value::Absent;
            }
            current = match link {
                ChainLink::Member { name, .. } => current.member(name),
                ChainLink::MethodCall {
                    name, arguments, ..
                } => self.eval_method_call(&current, name, arguments, scope),
                ChainLink::Index(index) => current.index(&self.eval_expression(index, scope)),
            };
        }
        current
    }

    fn eval_method_call(
        &self,
        receiver: &Value,
        name: &str,
        arguments: &[Expression],
        scope: &Scope,
    ) -> Value {
        match receiver {
            Value::Host(host) => host.call_method(name, &self.eval_arguments(arguments, scope)),
            other => self.eval_call(&other.member(name), arguments, scope),
        }
    }

    fn eval_unary_op(&self, op: &UnaryOperator, operand: &Expression, scope: &Scope) -> Value {
        let value = self.eval_expression(operand, scope);
        match op {
            UnaryOperator::Not => Value::Boolean(!value.is_truthy()),
            UnaryOperator::Negate => Value::Number(-value.to_number()),
        }
    }

    fn eval_binary_op(
        &self,
        op: &BinaryOperator,
        left: &Expression,
        right: &Expression,
        scope: &Scope,
    ) -> Value {
        let left_val = self.eval_expression(left, scope);
        // 右辺は必要になるまで評価しない (短絡評価)
        let right_val = || self.eval_expression(right, scope);

        match op {
            BinaryOperator::Or => {
                if left_val.is_truthy() {
                    left_val
                } else {
                    right_val()
                }
            }
            BinaryOperator::And => {
                if left_val.is_truthy() {
                    right_val()
                } else {
                    left_val
                }
            }
            BinaryOperator::Equal => Value::Boolean(left_val.loose_equals(&right_val())),
            BinaryOperator::NotEqual => Value::Boolean(!left_val.loose_equals(&right_val())),
            BinaryOperator::LessThan
            | BinaryOperator::GreaterThan
            | BinaryOperator::LessThanEqual
            | BinaryOperator::GreaterThanEqual => {
                Value::Boolean(ordering_holds(*op, left_val.compare(&right_val())))
            }
            BinaryOperator::Add => Value::Number(left_val.to_number() + right_val().to_number()),
            BinaryOperator::Subtract => {
                Value::Number(left_val.to_number() - right_val().to_number())
            }
            BinaryOperator::Multiply => {
                Value::Number(left_val.to_number() * right_val().to_number())
            }
            BinaryOperator::Divide => Value::Number(left_val.to_number() / right_val().to_number()),
            BinaryOperator::Modulo => Value::Number(left_val.to_number() % right_val().to_number()),
        }
    }
}

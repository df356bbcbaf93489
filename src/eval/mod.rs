//! # Trigger Expression Evaluation
//!
//! * [`value`]: runtime values and the host object interface
//! * [`context`]: helper groups composed into a resolution environment
//! * [`expression`]: the tree-walking evaluator
//! * [`evaluator`]: parse + evaluate driver

pub mod context;
pub mod evaluator;
pub mod expression;
pub mod value;

pub use context::{Bindings, Context, ContextBuilder, HelperGroup};
pub use evaluator::Evaluator;
pub use expression::{ExpressionEvaluator, Scope};
pub use value::{Callable, HostObject, Value};

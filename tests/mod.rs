mod cache_tests;
mod evaluator_tests;
mod specialization_tests;

use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use tripwire::helpers::{roster::Roster, shared, standard_context};
use tripwire::{Context, Value};

#[ctor::ctor]
fn init_tests() {
    // テストの前に一度だけ実行したい処理
    // tracing_subscriberの初期化
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

pub const SEED: u64 = 42;

pub fn unit(x: f64, y: f64, hp: f64) -> Value {
    Value::object([
        ("pos", Value::point(x, y)),
        ("hp", Value::Number(hp)),
        ("maxHp", Value::Number(100.0)),
    ])
}

/// Standard helpers around `subject` with a seeded random source.
pub fn arena(subject: &Value, allies: Vec<Value>, enemies: Vec<Value>) -> Context {
    standard_context(
        subject,
        Roster::new(allies, enemies),
        shared(StdRng::seed_from_u64(SEED)),
    )
}

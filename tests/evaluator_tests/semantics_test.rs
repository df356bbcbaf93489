use std::{cell::Cell, rc::Rc};

use pretty_assertions::assert_eq;
use tripwire::{Context, ContextBuilder, Evaluator, Value};

fn eval(text: &str, context: &Context) -> Value {
    Evaluator::new().evaluate_text(text, &Value::Absent, context)
}

fn eval_plain(text: &str) -> Value {
    eval(text, &Context::empty())
}

/// A context whose `sideEffect()` counts its calls.
fn recording_context() -> (Context, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let recorder = calls.clone();
    let context = ContextBuilder::new()
        .add_value(
            "sideEffect",
            Value::function(move |_| {
                recorder.set(recorder.get() + 1);
                Value::Boolean(true)
            }),
        )
        .build();
    (context, calls)
}

#[test]
fn test_precedence() {
    assert_eq!(eval_plain("2 + 3 * 4"), Value::Number(14.0));
    assert_eq!(eval_plain("(2 + 3) * 4"), Value::Number(20.0));
    assert_eq!(eval_plain("10 - 4 - 3"), Value::Number(3.0));
    assert_eq!(eval_plain("7 % 4 * 2"), Value::Number(6.0));
    assert_eq!(eval_plain("-2 * -3"), Value::Number(6.0));
}

#[test]
fn test_short_circuit() {
    let (context, calls) = recording_context();
    assert_eq!(eval("false && sideEffect()", &context), Value::Boolean(false));
    assert_eq!(eval("true || sideEffect()", &context), Value::Boolean(true));
    assert_eq!(calls.get(), 0);

    assert_eq!(eval("true && sideEffect()", &context), Value::Boolean(true));
    assert_eq!(eval("false || sideEffect()", &context), Value::Boolean(true));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_logical_operators_return_the_winning_operand() {
    assert_eq!(eval_plain("0 || 'fallback'"), Value::from("fallback"));
    assert_eq!(eval_plain("'' && 1"), Value::from(""));
    assert_eq!(eval_plain("null || undefined"), Value::Absent);
    assert_eq!(eval_plain("true && false"), Value::Boolean(false));
    assert_eq!(eval_plain("true || false"), Value::Boolean(true));
}

#[test]
fn test_division_follows_ieee() {
    assert_eq!(eval_plain("1 / 0"), Value::Number(f64::INFINITY));
    assert_eq!(eval_plain("-1 / 0"), Value::Number(f64::NEG_INFINITY));
    assert!(eval_plain("0 / 0").to_number().is_nan());
    assert!(eval_plain("5 % 0").to_number().is_nan());
}

#[test]
fn test_comparisons() {
    assert_eq!(eval_plain("1 == '1'"), Value::Boolean(true));
    assert_eq!(eval_plain("null == undefined"), Value::Boolean(true));
    assert_eq!(eval_plain("null == 0"), Value::Boolean(false));
    assert_eq!(eval_plain("'abc' < 'abd'"), Value::Boolean(true));
    assert_eq!(eval_plain("'10' < 9"), Value::Boolean(false));
    assert_eq!(eval_plain("[1, 2] == [1, 2]"), Value::Boolean(true));
    // undefined は NaN になり、どの順序比較も偽
    assert_eq!(eval_plain("undefined < 1"), Value::Boolean(false));
    assert_eq!(eval_plain("undefined >= 1"), Value::Boolean(false));
    // (3 > 2) > 1 → true > 1 → 1 > 1
    assert_eq!(eval_plain("3 > 2 > 1"), Value::Boolean(false));
}

#[test]
fn test_optional_chaining() {
    let context = ContextBuilder::new().add_value("empty", Value::Null).build();
    assert_eq!(eval("empty?.name", &context), Value::Absent);
    assert_eq!(eval("missing?.a?.b", &context), Value::Absent);
    assert_eq!(eval("empty.name", &context), Value::Absent);
    assert_eq!(eval("missing.a.b.c()", &context), Value::Absent);
}

#[test]
fn test_optional_link_skips_the_rest_of_the_chain() {
    let (context, calls) = recording_context();
    let context = ContextBuilder::new()
        .add_value("nothing", Value::Null)
        .add_value(
            "record",
            context.resolve("sideEffect").unwrap_or_default(),
        )
        .build();
    assert_eq!(eval("nothing?.a[record()]", &context), Value::Absent);
    assert_eq!(eval("nothing?.f(record())", &context), Value::Absent);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_calls() {
    let (context, calls) = recording_context();
    // 呼び出せない値は引数を評価しない
    assert_eq!(eval("missing(sideEffect())", &context), Value::Absent);
    assert_eq!(calls.get(), 0);

    let context = ContextBuilder::new()
        .add_value(
            "add",
            Value::function(|args| {
                Value::Number(args.iter().map(Value::to_number).sum())
            }),
        )
        .add_value(
            "stats",
            Value::object([(
                "double",
                Value::function(|args| Value::Number(args[0].to_number() * 2.0)),
            )]),
        )
        .build();
    assert_eq!(eval("add(1, 2, 3,)", &context), Value::Number(6.0));
    assert_eq!(eval("stats.double(add(1, 2))", &context), Value::Number(6.0));
    assert_eq!(eval("stats.triple(1)", &context), Value::Absent);
}

#[test]
fn test_collections_keep_absent_elements() {
    assert_eq!(
        eval_plain("[1, missing, 'x']"),
        Value::Array(vec![Value::Number(1.0), Value::Absent, Value::from("x")])
    );
    assert_eq!(eval_plain("[1, 2, 3].length"), Value::Number(3.0));
    assert_eq!(eval_plain("{ a: { b: 4 } }.a.b"), Value::Number(4.0));
    assert_eq!(eval_plain("{ 'k': 1 }['k']"), Value::Number(1.0));
    assert_eq!(eval_plain("'hey'[1]"), Value::from("e"));
    assert_eq!(eval_plain("[1][5]"), Value::Absent);
}

#[test]
fn test_unary() {
    assert_eq!(eval_plain("!0"), Value::Boolean(true));
    assert_eq!(eval_plain("!'text'"), Value::Boolean(false));
    assert_eq!(eval_plain("!!null"), Value::Boolean(false));
    assert_eq!(eval_plain("-'4'"), Value::Number(-4.0));
    assert!(eval_plain("-undefined").to_number().is_nan());
}

#[test]
fn test_malformed_text_never_raises() {
    for text in ["", "1 +", "(((", "a ? b", "'x", "1 2"] {
        assert_eq!(eval_plain(text), Value::Absent, "{:?}", text);
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use tripwire::{ContextBuilder, Evaluator, HostObject, Value};

/// A host unit handle; the engine only sees it through `HostObject`.
struct Turret {
    hp: f64,
    log: Rc<RefCell<Vec<String>>>,
}

impl HostObject for Turret {
    fn get_member(&self, name: &str) -> Value {
        self.log.borrow_mut().push(format!("get {}", name));
        match name {
            "hp" => Value::Number(self.hp),
            "pos" => Value::point(3.0, 4.0),
            _ => Value::Absent,
        }
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Value {
        self.log
            .borrow_mut()
            .push(format!("call {}({})", name, args.len()));
        match name {
            "canFire" => Value::Boolean(self.hp > args.first().map(Value::to_number).unwrap_or(0.0)),
            _ => Value::Absent,
        }
    }

    fn type_name(&self) -> &'static str {
        "turret"
    }
}

#[test]
fn test_members_and_methods_go_through_the_host() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let turret = Value::host(Turret {
        hp: 30.0,
        log: log.clone(),
    });
    assert_eq!(turret.type_name(), "turret");

    let evaluator = Evaluator::new();
    let context = ContextBuilder::new().build();

    assert_eq!(
        evaluator.evaluate_text("self.hp > 10 && self.canFire(20)", &turret, &context),
        Value::Boolean(true)
    );
    assert_eq!(
        evaluator.evaluate_text("distance(self.pos)", &turret, &context),
        Value::Absent
    );
    assert_eq!(
        evaluator.evaluate_text("self.pos.x + self.pos.y", &turret, &context),
        Value::Number(7.0)
    );
    // 未知のメソッドでもホスト側に引数ごと渡る
    assert_eq!(
        evaluator.evaluate_text("self.reload(1, 2)", &turret, &context),
        Value::Absent
    );

    assert_eq!(
        log.borrow()[..3],
        [
            "get hp".to_string(),
            "call canFire(1)".to_string(),
            "get pos".to_string(),
        ]
    );
    assert_eq!(log.borrow().last().unwrap(), "call reload(2)");
}

#[test]
fn test_hosts_compare_by_identity() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let turret = Value::host(Turret { hp: 1.0, log });
    let context = ContextBuilder::new()
        .add_value("other", turret.clone())
        .build();
    let evaluator = Evaluator::new();
    assert_eq!(
        evaluator.evaluate_text("self == other", &turret, &context),
        Value::Boolean(true)
    );
    assert_eq!(
        evaluator.evaluate_text("self == [1]", &turret, &context),
        Value::Boolean(false)
    );
}

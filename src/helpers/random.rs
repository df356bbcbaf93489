use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, RngCore};

use crate::eval::{Bindings, Value};

/// Host-supplied source of uniform numbers in `[0, 1)`.
///
/// Expressions never touch an ambient generator; hosts that replay
/// simulations pass a seeded one.
pub trait RandomSource {
    fn next(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

pub type SharedRandom = Rc<RefCell<dyn RandomSource>>;

pub fn shared<R: RandomSource + 'static>(source: R) -> SharedRandom {
    Rc::new(RefCell::new(source))
}

/// `random()`.
pub fn random_helpers(source: SharedRandom) -> Bindings {
    Bindings::from([(
        "random".to_string(),
        Value::function(move |_| Value::Number(source.borrow_mut().next())),
    )])
}

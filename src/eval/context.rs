use std::cell::OnceCell;
use std::collections::HashMap;

use tracing::trace;

use super::value::Value;

pub type Bindings = HashMap<String, Value>;

type Producer = Box<dyn Fn() -> Bindings>;

/// A named bundle of context bindings.
pub enum HelperGroup {
    /// Materialized when the context is built.
    Eager(Bindings),
    /// Produced the first time one of `names` is resolved, then kept for the
    /// life of the context.
    Lazy {
        names: Vec<String>,
        producer: Producer,
        bindings: OnceCell<Bindings>,
    },
}

impl HelperGroup {
    pub fn lazy<F>(names: Vec<String>, producer: F) -> Self
    where
        F: Fn() -> Bindings + 'static,
    {
        HelperGroup::Lazy {
            names,
            producer: Box::new(producer),
            bindings: OnceCell::new(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            HelperGroup::Eager(bindings) => bindings.keys().map(String::as_str).collect(),
            HelperGroup::Lazy { names, .. } => names.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_materialized(&self) -> bool {
        match self {
            HelperGroup::Eager(_) => true,
            HelperGroup::Lazy { bindings, .. } => bindings.get().is_some(),
        }
    }

    fn lookup(&self, group_name: &str, name: &str) -> Option<Value> {
        match self {
            HelperGroup::Eager(bindings) => bindings.get(name).cloned(),
            HelperGroup::Lazy {
                producer, bindings, ..
            } => bindings
                .get_or_init(|| {
                    trace!(group = group_name, "materializing lazy helper group");
                    producer()
                })
                .get(name)
                .cloned(),
        }
    }
}

struct NamedGroup {
    name: String,
    group: HelperGroup,
}

/// Composes helper groups into a [`Context`]. Later groups shadow earlier
/// ones name by name.
#[derive(Default)]
pub struct ContextBuilder {
    groups: Vec<NamedGroup>,
}

impl ContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(mut self, name: impl Into<String>, group: HelperGroup) -> Self {
        self.groups.push(NamedGroup {
            name: name.into(),
            group,
        });
        self
    }

    pub fn add_helpers(self, name: impl Into<String>, bindings: Bindings) -> Self {
        self.add_group(name, HelperGroup::Eager(bindings))
    }

    /// Lazy group defining `names`; `producer` runs at most once per context.
    pub fn add_lazy_helpers<I, S, F>(self, name: impl Into<String>, names: I, producer: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn() -> Bindings + 'static,
    {
        let names = names.into_iter().map(Into::into).collect();
        self.add_group(name, HelperGroup::lazy(names, producer))
    }

    /// Single lazily computed binding named after its group.
    pub fn add_lazy_value<F>(self, name: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Value + 'static,
    {
        let name = name.into();
        let binding = name.clone();
        self.add_lazy_helpers(name, [binding.clone()], move || {
            Bindings::from([(binding.clone(), producer())])
        })
    }

    pub fn add_value(self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        self.add_helpers(name.clone(), Bindings::from([(name, value)]))
    }

    pub fn build(self) -> Context {
        let mut index = HashMap::new();
        for (position, named) in self.groups.iter().enumerate() {
            for name in named.group.names() {
                index.insert(name.to_string(), position);
            }
        }
        Context {
            groups: self.groups,
            index,
        }
    }
}

/// Flat name resolution environment for one evaluation.
#[derive(Default)]
pub struct Context {
    groups: Vec<NamedGroup>,
    index: HashMap<String, usize>,
}

impl Context {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn resolve(&self, name: &str) -> Option<Value> {
        let named = &self.groups[*self.index.get(name)?];
        named.group.lookup(&named.name, name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Whether the group registered as `group_name` has been produced.
    /// Eager groups always have.
    pub fn is_materialized(&self, group_name: &str) -> Option<bool> {
        self.groups
            .iter()
            .rev()
            .find(|named| named.name == group_name)
            .map(|named| named.group.is_materialized())
    }
}

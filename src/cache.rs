use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;
use tracing::{debug, trace};

use crate::ast_registry::AstRegistry;
use crate::compiler::{CompiledPredicate, SpecializingCompiler, Tier};
use crate::config::EngineConfig;
use crate::eval::{Context, Value};

/// Counters since construction or the last [`ExpressionCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub specialized: usize,
    pub generic: usize,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicUsize,
    misses: AtomicUsize,
    specialized: AtomicUsize,
    generic: AtomicUsize,
}

impl Counters {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            specialized: self.specialized.load(Ordering::Relaxed),
            generic: self.generic.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        for counter in [&self.hits, &self.misses, &self.specialized, &self.generic] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Expression text → compiled predicate, shared by both tiers.
///
/// Entries live until [`clear`](Self::clear); there is no eviction. The
/// first predicate stored for a text wins, so concurrent misses on the same
/// text all end up calling one predicate.
#[derive(Debug, Clone)]
pub struct ExpressionCache {
    predicates: Arc<DashMap<String, CompiledPredicate>>,
    registry: AstRegistry,
    compiler: SpecializingCompiler,
    config: EngineConfig,
    counters: Arc<Counters>,
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl ExpressionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            predicates: Arc::new(DashMap::new()),
            registry: AstRegistry::new(config.memoize_parse_failures),
            compiler: SpecializingCompiler::new(),
            config,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &AstRegistry {
        &self.registry
    }

    /// The predicate for `text`, compiling it on first use.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn compile(&self, text: &str) -> CompiledPredicate {
        if let Some(hit) = self.predicates.get(text) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            trace!("cache hit");
            return hit.value().clone();
        }
        self.counters.misses.fetch_add(1, Ordering::Relaxed);

        let compiled = self.resolve(text);
        match self.predicates.entry(text.to_string()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let counter = match compiled.tier() {
                    Tier::Specialized(_) => &self.counters.specialized,
                    Tier::Generic => &self.counters.generic,
                };
                counter.fetch_add(1, Ordering::Relaxed);
                debug!(tier = ?compiled.tier(), "compiled expression");
                entry.insert(compiled).value().clone()
            }
        }
    }

    /// Compile and call in one step.
    pub fn evaluate(&self, text: &str, subject: &Value, context: &Context) -> Value {
        self.compile(text).call(subject, context)
    }

    fn resolve(&self, text: &str) -> CompiledPredicate {
        // 特殊化パターンは `self` 前提
        if self.specializes() {
            if let Some(compiled) = self.compiler.try_compile(text) {
                return compiled;
            }
        }
        match self.registry.parse(text) {
            Ok(expr) => CompiledPredicate::generic(expr, self.config.subject_name.as_str()),
            Err(_) => CompiledPredicate::absent(),
        }
    }

    fn specializes(&self) -> bool {
        self.config.specialization && self.config.subject_name == "self"
    }

    /// Drops every compiled predicate and memoized parse.
    pub fn clear(&self) {
        self.predicates.clear();
        self.registry.clear();
        self.counters.reset();
        debug!("expression cache cleared");
    }

    pub fn contains(&self, text: &str) -> bool {
        self.predicates.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

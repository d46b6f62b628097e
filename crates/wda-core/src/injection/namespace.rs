//! Espacio de nombres heterogéneo: cada entrada es un invocable o un valor
//! plano. Resolver un valor plano como objetivo de llamada produce
//! `KitError::NotInvocable`.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use super::invoker::{inject_call, Invocable};
use crate::errors::KitError;

#[derive(Clone)]
pub enum Entry {
    Callable(Arc<dyn Invocable>),
    Value(Value),
}

impl Entry {
    pub fn is_callable(&self) -> bool { matches!(self, Entry::Callable(_)) }
}

/// Registro ordenado de entradas por nombre.
#[derive(Clone, Default)]
pub struct Namespace {
    entries: IndexMap<String, Entry>,
}

impl Namespace {
    pub fn new() -> Self { Self::default() }

    /// Registra un invocable bajo su propio nombre. Reemplaza la entrada previa.
    pub fn register(&mut self, target: impl Invocable + 'static) -> &mut Self {
        let name = target.name().to_string();
        self.entries.insert(name, Entry::Callable(Arc::new(target)));
        self
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.entries.insert(name.into(), Entry::Value(value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Entry> { self.entries.get(name) }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Resuelve `name` a un invocable.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Invocable>, KitError> {
        match self.entries.get(name) {
            Some(Entry::Callable(f)) => Ok(Arc::clone(f)),
            Some(Entry::Value(_)) => Err(KitError::NotInvocable(name.to_string())),
            None => Err(KitError::UnknownName(name.to_string())),
        }
    }

    /// `inject_call` sobre la entrada `name`.
    pub fn inject_call<I>(&self, name: &str, positional: Vec<Value>, pool: I) -> Result<Value, KitError>
        where I: IntoIterator<Item = (String, Value)>
    {
        let target = self.resolve(name)?;
        inject_call(target.as_ref(), positional, pool)
    }
}

impl std::fmt::Debug for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
         .entries(self.entries.iter().map(|(k, e)| (k, if e.is_callable() { "<callable>" } else { "<value>" })))
         .finish()
    }
}

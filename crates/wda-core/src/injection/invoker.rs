//! Invocación selectiva: llama a un `Invocable` pasando sólo la parte del
//! pool de argumentos que su firma declara.

use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use super::binding::{bind, BoundArguments};
use super::signature::Signature;
use crate::errors::KitError;

/// Contrato de un invocable con firma declarada.
pub trait Invocable: Send + Sync {
    /// Nombre para diagnósticos.
    fn name(&self) -> &str;

    fn signature(&self) -> &Signature;

    /// Ejecuta con argumentos ya enlazados y con defaults aplicados.
    fn call(&self, args: &BoundArguments<'_>) -> Result<Value, KitError>;
}

type CallFn = dyn Fn(&BoundArguments<'_>) -> Result<Value, KitError> + Send + Sync;

/// Adaptador de closure + firma.
pub struct FnInvocable {
    name: String,
    signature: Signature,
    func: Box<CallFn>,
}

impl FnInvocable {
    pub fn new<F>(name: impl Into<String>, signature: Signature, func: F) -> Self
        where F: Fn(&BoundArguments<'_>) -> Result<Value, KitError> + Send + Sync + 'static
    {
        Self { name: name.into(),
               signature,
               func: Box::new(func) }
    }
}

impl fmt::Debug for FnInvocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInvocable").field("name", &self.name).field("signature", &self.signature).finish()
    }
}

impl Invocable for FnInvocable {
    fn name(&self) -> &str { &self.name }

    fn signature(&self) -> &Signature { &self.signature }

    fn call(&self, args: &BoundArguments<'_>) -> Result<Value, KitError> { (self.func)(args) }
}

/// Reduce `pool` a las entradas cuyo nombre aparece en `signature`,
/// conservando el orden del pool. El resto se descarta en silencio.
pub fn filter_pool<I>(signature: &Signature, pool: I) -> IndexMap<String, Value>
    where I: IntoIterator<Item = (String, Value)>
{
    pool.into_iter()
        .filter(|(k, _)| {
            let keep = signature.contains(k);
            if !keep {
                debug!("dropping pool entry '{}' (not declared)", k);
            }
            keep
        })
        .collect()
}

/// Llama a `target` sin conocer de antemano todos sus argumentos.
///
/// Los posicionales se pasan tal cual; del `pool` sólo se toman las claves
/// declaradas en la firma. Tras enlazar se aplican los defaults y se invoca.
pub fn inject_call<I>(target: &dyn Invocable, positional: Vec<Value>, pool: I) -> Result<Value, KitError>
    where I: IntoIterator<Item = (String, Value)>
{
    let signature = target.signature();
    let keywords = filter_pool(signature, pool);
    let mut bound = bind(signature, positional, keywords)?;
    bound.apply_defaults();
    debug!("invoking '{}' with {} bound arguments", target.name(), bound.arguments().len());
    target.call(&bound)
}

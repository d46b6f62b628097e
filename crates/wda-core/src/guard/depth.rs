//! Tabla lateral de profundidades y ticket de entrada.
//!
//! Cada guard mantiene un `DashMap<K, usize>` con las llamadas en vuelo por
//! owner. El chequeo `depth > limit` y el incremento ocurren bajo el lock de
//! la entrada; el decremento lo hace `DepthTicket` al soltarse, así que se
//! ejecuta en retorno normal, en error y en panic. Una entrada que vuelve a
//! cero se elimina de la tabla.

use std::fmt::Debug;
use std::hash::Hash;

use dashmap::DashMap;
use log::{debug, warn};

use super::owner::{FunctionId, HasInstanceId, InstanceId};
use crate::errors::KitError;

pub struct DepthGuard<K>
    where K: Eq + Hash + Clone + Debug
{
    name: String,
    limit: usize,
    depths: DashMap<K, usize>,
}

impl<K> DepthGuard<K> where K: Eq + Hash + Clone + Debug
{
    pub fn new(name: impl Into<String>, limit: usize) -> Self {
        Self { name: name.into(),
               limit,
               depths: DashMap::new() }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn limit(&self) -> usize { self.limit }

    /// Llamadas en vuelo para `key` (0 si nunca se vio).
    pub fn depth(&self, key: &K) -> usize { self.depths.get(key).map(|d| *d).unwrap_or(0) }

    /// Cantidad de owners con llamadas en vuelo.
    pub fn active_owners(&self) -> usize { self.depths.len() }

    /// Registra una entrada para `key`. Falla sin tocar el contador si ya
    /// supera el límite.
    pub fn enter(&self, key: K) -> Result<DepthTicket<'_, K>, KitError> {
        let mut slot = self.depths.entry(key.clone()).or_insert(0);
        if *slot > self.limit {
            let depth = *slot;
            drop(slot);
            warn!("'{}' rejected for {:?}: depth {} exceeds limit {}", self.name, key, depth, self.limit);
            return Err(KitError::DepthExceeded { limit: self.limit });
        }
        *slot += 1;
        debug!("'{}' entered for {:?} at depth {}", self.name, key, *slot - 1);
        drop(slot);
        Ok(DepthTicket { guard: self, key })
    }

    /// Ejecuta `body` bajo el guard.
    pub fn run<R>(&self, key: K, body: impl FnOnce() -> R) -> Result<R, KitError> {
        let _ticket = self.enter(key)?;
        Ok(body())
    }

    /// Variante para cuerpos falibles; el error de profundidad se convierte
    /// al error del cuerpo.
    pub fn try_run<R, E>(&self, key: K, body: impl FnOnce() -> Result<R, E>) -> Result<R, E>
        where E: From<KitError>
    {
        let _ticket = self.enter(key)?;
        body()
    }

    fn leave(&self, key: &K) {
        // el ticket sólo existe si la entrada fue incrementada
        self.depths.remove_if_mut(key, |_, depth| {
                       *depth = depth.saturating_sub(1);
                       *depth == 0
                   });
    }
}

impl<K> Debug for DepthGuard<K> where K: Eq + Hash + Clone + Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthGuard")
         .field("name", &self.name)
         .field("limit", &self.limit)
         .field("active_owners", &self.depths.len())
         .finish()
    }
}

/// Marca una llamada en vuelo; decrementa al soltarse.
#[must_use = "the depth is released as soon as the ticket is dropped"]
pub struct DepthTicket<'g, K>
    where K: Eq + Hash + Clone + Debug
{
    guard: &'g DepthGuard<K>,
    key: K,
}

impl<K> DepthTicket<'_, K> where K: Eq + Hash + Clone + Debug
{
    pub fn key(&self) -> &K { &self.key }
}

impl<K> Debug for DepthTicket<'_, K> where K: Eq + Hash + Clone + Debug
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepthTicket").field("guard", &self.guard.name).field("key", &self.key).finish()
    }
}

impl<K> Drop for DepthTicket<'_, K> where K: Eq + Hash + Clone + Debug
{
    fn drop(&mut self) {
        self.guard.leave(&self.key);
        debug!("'{}' left for {:?}", self.guard.name, self.key);
    }
}

/// Guard por método: la profundidad se cuenta por instancia receptora.
pub type MethodGuard = DepthGuard<InstanceId>;

impl DepthGuard<InstanceId> {
    pub fn run_on<O, R>(&self, owner: &O, body: impl FnOnce() -> R) -> Result<R, KitError>
        where O: HasInstanceId + ?Sized
    {
        self.run(owner.instance_id(), body)
    }

    pub fn try_run_on<O, R, E>(&self, owner: &O, body: impl FnOnce() -> Result<R, E>) -> Result<R, E>
        where O: HasInstanceId + ?Sized,
              E: From<KitError>
    {
        self.try_run(owner.instance_id(), body)
    }

    pub fn depth_of<O: HasInstanceId + ?Sized>(&self, owner: &O) -> usize { self.depth(&owner.instance_id()) }
}

/// Guard por función: un único contador global para la definición.
#[derive(Debug)]
pub struct FunctionGuard {
    id: FunctionId,
    inner: DepthGuard<FunctionId>,
}

impl FunctionGuard {
    pub fn new(id: FunctionId, limit: usize) -> Self {
        Self { id,
               inner: DepthGuard::new(id.0, limit) }
    }

    pub fn id(&self) -> FunctionId { self.id }

    pub fn limit(&self) -> usize { self.inner.limit() }

    pub fn depth(&self) -> usize { self.inner.depth(&self.id) }

    pub fn enter(&self) -> Result<DepthTicket<'_, FunctionId>, KitError> { self.inner.enter(self.id) }

    pub fn run<R>(&self, body: impl FnOnce() -> R) -> Result<R, KitError> { self.inner.run(self.id, body) }

    pub fn try_run<R, E>(&self, body: impl FnOnce() -> Result<R, E>) -> Result<R, E>
        where E: From<KitError>
    {
        self.inner.try_run(self.id, body)
    }
}

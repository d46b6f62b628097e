//! Límite de profundidad de recursión por función o por instancia.
//!
//! `limit_depth(n)` fija el máximo: con `n = 0` la primera llamada entra y
//! cualquier reentrada se rechaza. El chequeo es `depth > n`, así que se
//! admiten `n + 1` llamadas anidadas.
//!
//! ```
//! use wda_core::guard::{limit_depth, FunctionGuard};
//!
//! fn countdown(guard: &FunctionGuard, n: u32) -> Result<u32, wda_core::KitError> {
//!     guard.try_run(|| if n == 0 { Ok(0) } else { countdown(guard, n - 1).map(|v| v + 1) })
//! }
//!
//! let guard = limit_depth(2).function("countdown");
//! assert_eq!(countdown(&guard, 2).unwrap(), 2);
//! assert!(countdown(&guard, 3).is_err());
//! ```

pub mod depth;
pub mod owner;

pub use depth::{DepthGuard, DepthTicket, FunctionGuard, MethodGuard};
pub use owner::{FunctionId, HasInstanceId, InstanceId};

/// Límite configurado; punto de partida para construir guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthLimit(usize);

impl DepthLimit {
    pub fn get(self) -> usize { self.0 }

    /// Guard con contador único para la función `name`.
    pub fn function(self, name: &'static str) -> FunctionGuard { FunctionGuard::new(FunctionId(name), self.0) }

    /// Guard con un contador por instancia receptora.
    pub fn per_instance(self, name: impl Into<String>) -> MethodGuard { DepthGuard::new(name, self.0) }
}

pub fn limit_depth(n: usize) -> DepthLimit { DepthLimit(n) }

//! wda-core: utilidades hoja sin dependencias entre sí.
//!
//! - `injection`: invoca funciones filtrando un pool de argumentos por firma.
//! - `guard`: limita la profundidad de recursión por función o por instancia.
//! - `attrs`: mapa con acceso por clave y por atributo.
pub mod attrs;
pub mod errors;
pub mod guard;
pub mod injection;

pub use attrs::{convert, wrap, AttrMap};
pub use errors::{BindError, KitError};
pub use guard::{limit_depth, DepthGuard, DepthLimit, FunctionGuard, HasInstanceId, InstanceId, MethodGuard};
pub use injection::{inject_call, BoundArguments, FnInvocable, Invocable, Namespace, ParamKind, Parameter, Signature};

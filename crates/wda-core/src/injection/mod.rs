//! Invocación selectiva de funciones (inject call).
//!
//! Dado un invocable con firma declarada y un pool de argumentos candidatos,
//! se filtran las entradas que la firma no declara, se enlazan posicionales y
//! keywords, se aplican defaults y se invoca.

pub mod binding;
pub mod invoker;
pub mod namespace;
pub mod signature;

pub use binding::{bind, BoundArguments};
pub use invoker::{filter_pool, inject_call, FnInvocable, Invocable};
pub use namespace::{Entry, Namespace};
pub use signature::{ParamKind, Parameter, Signature};

//! Errores del núcleo: invocación selectiva, guard de profundidad y mapas
//! con acceso por atributo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallos al enlazar argumentos contra una `Signature`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum BindError {
    #[error("missing required argument '{name}'")] MissingArgument { name: String },
    #[error("too many positional arguments: accepts at most {max}, got {given}")] TooManyPositional { max: usize, given: usize },
    #[error("multiple values for argument '{name}'")] MultipleValues { name: String },
    #[error("positional-only argument '{name}' passed as keyword")] PositionalOnlyAsKeyword { name: String },
    #[error("unexpected keyword argument '{name}'")] UnexpectedKeyword { name: String },
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum KitError {
    #[error("'{0}' is not callable")] NotInvocable(String),
    #[error("unknown name '{0}'")] UnknownName(String),
    #[error("binding error: {0}")] Binding(#[from] BindError),
    #[error("invalid signature: {0}")] InvalidSignature(String),
    #[error("call depth exceed {limit}")] DepthExceeded { limit: usize },
    #[error("attribute key not found: '{key}'")] AttributeNotFound { key: String },
    #[error("call failed: {0}")] CallFailed(String),
    #[error("decode: {0}")] Decode(String),
}

impl KitError {
    /// `true` si el error proviene del guard de profundidad.
    pub fn is_depth_exceeded(&self) -> bool { matches!(self, KitError::DepthExceeded { .. }) }
}

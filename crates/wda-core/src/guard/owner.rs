//! Identidades de "owner" del contador de profundidad.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identidad estática de una función guardada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionId(pub &'static str);

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.0) }
}

/// Handle de instancia. Dos instancias distintas nunca comparten id, incluso
/// si una se clona (el clon conserva el id del original).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(Uuid);

impl InstanceId {
    pub fn new() -> Self { Self(Uuid::new_v4()) }

    pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for InstanceId {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Tipos cuyos métodos guardados llevan la cuenta de profundidad por instancia.
pub trait HasInstanceId {
    fn instance_id(&self) -> InstanceId;
}

impl HasInstanceId for InstanceId {
    fn instance_id(&self) -> InstanceId { *self }
}

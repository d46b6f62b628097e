use thiserror::Error;
use wda_core::KitError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error(transparent)]
    Kit(#[from] KitError),
}

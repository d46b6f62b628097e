//! Configuración central.
//! Carga variables de entorno (.env) una sola vez y expone una estructura
//! inmutable (`CONFIG`).
use std::env;

use dotenvy::dotenv;
use log::warn;
use once_cell::sync::Lazy;
use wda_core::{limit_depth, DepthLimit};

use crate::errors::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Configuración global (extensible para más secciones).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub guard: GuardConfig,
}

/// Parámetros del guard de profundidad.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardConfig {
    /// Límite usado por `default_limit` (`WDA_DEFAULT_CALL_DEPTH`).
    pub default_call_depth: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda de
    /// variables (útil en tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CoreError> {
        let default_call_depth = match lookup("WDA_DEFAULT_CALL_DEPTH") {
            Some(raw) => raw.trim()
                            .parse()
                            .map_err(|e| CoreError::Config(format!("WDA_DEFAULT_CALL_DEPTH='{raw}': {e}")))?,
            None => 0,
        };
        Ok(Self { guard: GuardConfig { default_call_depth } })
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    AppConfig::from_env().unwrap_or_else(|e| {
                             warn!("{e}; using defaults");
                             AppConfig::default()
                         })
});

/// Límite de profundidad configurado por entorno.
pub fn default_limit() -> DepthLimit { limit_depth(CONFIG.guard.default_call_depth) }

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() { Lazy::force(&DOTENV_LOADED); }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_uses_zero() {
        let cfg = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.guard.default_call_depth, 0);
    }

    #[test]
    fn parses_depth() {
        let cfg = AppConfig::from_lookup(|k| (k == "WDA_DEFAULT_CALL_DEPTH").then(|| " 4 ".to_string())).unwrap();
        assert_eq!(cfg.guard.default_call_depth, 4);
    }

    #[test]
    fn rejects_garbage() {
        let err = AppConfig::from_lookup(|_| Some("-1".into())).unwrap_err();
        assert!(err.to_string().contains("WDA_DEFAULT_CALL_DEPTH"));
    }
}

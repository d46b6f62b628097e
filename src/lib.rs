//! wda-utils
//!
//! Este crate reúne las utilidades de `wda-core` con la capa de aplicación:
//! - Expone `config` (límite de profundidad por defecto desde entorno).
//! - Expone `errors` con `CoreError`.
//! - Re-exporta `wda_core` completo.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub mod config;
pub mod errors;

pub use wda_core::*;

#[cfg(test)]
mod tests {
	use super::errors::CoreError;
	use super::KitError;

	#[test]
	fn core_error_wraps_kit_error() {
		let e: CoreError = KitError::NotInvocable("x".into()).into();
		assert_eq!(e.to_string(), "'x' is not callable");
	}
}

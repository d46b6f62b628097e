//! Descriptores de parámetros.
//!
//! Rust no permite inspeccionar la firma de un closure arbitrario, así que
//! cada invocable declara explícitamente su `Signature`: una lista ordenada de
//! parámetros con nombre, tipo de enlace y default opcional. El invocador
//! selectivo usa esta lista para filtrar el pool de argumentos candidatos.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::KitError;

/// Forma en la que un parámetro acepta valores. El orden de las variantes es
/// el orden canónico dentro de una firma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    /// Absorbe los posicionales sobrantes (como array).
    VarPositional,
    KeywordOnly,
    /// Absorbe keywords sin parámetro propio (como objeto).
    VarKeyword,
}

impl ParamKind {
    pub fn is_positional(self) -> bool { matches!(self, ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword) }

    pub fn is_variadic(self) -> bool { matches!(self, ParamKind::VarPositional | ParamKind::VarKeyword) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl Parameter {
    /// Parámetro posicional-o-keyword sin default.
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               kind: ParamKind::PositionalOrKeyword,
               default: None }
    }

    /// Parámetro posicional-o-keyword con default.
    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self { name: name.into(),
               kind: ParamKind::PositionalOrKeyword,
               default: Some(default) }
    }

    pub fn with_kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               kind: ParamKind::VarPositional,
               default: None }
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               kind: ParamKind::VarKeyword,
               default: None }
    }

    pub fn has_default(&self) -> bool { self.default.is_some() }
}

/// Firma ordenada de un invocable. Se valida al construirse; una `Signature`
/// existente siempre respeta el orden canónico de `ParamKind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signature {
    params: Vec<Parameter>,
}

impl Signature {
    pub fn new(params: Vec<Parameter>) -> Result<Self, KitError> {
        let mut seen_default = false;
        for (i, p) in params.iter().enumerate() {
            if params[..i].iter().any(|q| q.name == p.name) {
                return Err(KitError::InvalidSignature(format!("duplicate parameter '{}'", p.name)));
            }
            if let Some(prev) = i.checked_sub(1).map(|j| &params[j]) {
                if prev.kind > p.kind {
                    return Err(KitError::InvalidSignature(format!("parameter '{}' ({:?}) cannot follow {:?}", p.name, p.kind, prev.kind)));
                }
                if prev.kind == p.kind && p.kind.is_variadic() {
                    return Err(KitError::InvalidSignature(format!("more than one {:?} parameter", p.kind)));
                }
            }
            if p.kind.is_variadic() && p.default.is_some() {
                return Err(KitError::InvalidSignature(format!("variadic parameter '{}' cannot declare a default", p.name)));
            }
            if p.kind.is_positional() {
                if p.has_default() {
                    seen_default = true;
                } else if seen_default {
                    return Err(KitError::InvalidSignature(format!("non-default parameter '{}' follows default parameter", p.name)));
                }
            }
        }
        Ok(Self { params })
    }

    /// Atajo para firmas de parámetros posicional-o-keyword sin defaults.
    pub fn from_names(names: &[&str]) -> Result<Self, KitError> {
        Self::new(names.iter().map(|n| Parameter::required(*n)).collect())
    }

    pub fn params(&self) -> &[Parameter] { &self.params }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.params.iter().map(|p| p.name.as_str()) }

    pub fn get(&self, name: &str) -> Option<&Parameter> { self.params.iter().find(|p| p.name == name) }

    pub fn contains(&self, name: &str) -> bool { self.get(name).is_some() }

    pub fn len(&self) -> usize { self.params.len() }

    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    pub(crate) fn positional(&self) -> impl Iterator<Item = &Parameter> { self.params.iter().filter(|p| p.kind.is_positional()) }

    pub(crate) fn find_kind(&self, kind: ParamKind) -> Option<&Parameter> { self.params.iter().find(|p| p.kind == kind) }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: serde::Deserializer<'de>
    {
        #[derive(Deserialize)]
        struct Raw {
            params: Vec<Parameter>,
        }
        let raw = Raw::deserialize(deserializer)?;
        Signature::new(raw.params).map_err(serde::de::Error::custom)
    }
}

//! `AttrMap`: mapa con acceso por clave y por "atributo".
//!
//! El acceso por clave es el de `IndexMap` (vía `Deref` / `Index`). El acceso
//! por atributo (`attr`) devuelve un error que lleva el nombre de la clave
//! cuando no existe, en lugar de `None` o panic. Se conserva el orden de
//! inserción.

use std::ops::{Deref, DerefMut, Index};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::KitError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrMap {
    inner: IndexMap<String, Value>,
}

impl AttrMap {
    pub fn new() -> Self { Self::default() }

    /// Lectura estilo atributo.
    pub fn attr(&self, key: &str) -> Result<&Value, KitError> {
        self.inner.get(key).ok_or_else(|| KitError::AttributeNotFound { key: key.to_string() })
    }

    /// Lectura estilo atributo decodificando a `T`.
    pub fn attr_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, KitError> {
        let v = self.attr(key)?;
        serde_json::from_value(v.clone()).map_err(|e| KitError::Decode(format!("attribute '{key}': {e}")))
    }

    pub fn into_inner(self) -> IndexMap<String, Value> { self.inner }
}

impl Deref for AttrMap {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target { &self.inner }
}

impl DerefMut for AttrMap {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.inner }
}

impl Index<&str> for AttrMap {
    type Output = Value;

    /// Panics si la clave no existe, como `IndexMap`.
    fn index(&self, key: &str) -> &Value { &self.inner[key] }
}

impl From<IndexMap<String, Value>> for AttrMap {
    fn from(inner: IndexMap<String, Value>) -> Self { Self { inner } }
}

impl From<Map<String, Value>> for AttrMap {
    fn from(map: Map<String, Value>) -> Self { map.into_iter().collect() }
}

impl<K: Into<String>> FromIterator<(K, Value)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self { inner: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

impl TryFrom<Value> for AttrMap {
    type Error = KitError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(map.into()),
            other => Err(KitError::Decode(format!("expected a JSON object, got {other}"))),
        }
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter { self.inner.into_iter() }
}

impl<'a> IntoIterator for &'a AttrMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter { self.inner.iter() }
}

/// Copia `dictionary` dentro de un `AttrMap`.
pub fn wrap<'a, I>(dictionary: I) -> AttrMap
    where I: IntoIterator<Item = (&'a String, &'a Value)>
{
    dictionary.into_iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

/// Alias de `wrap` que consume el mapa de origen.
pub fn convert<I, K>(dictionary: I) -> AttrMap
    where I: IntoIterator<Item = (K, Value)>,
          K: Into<String>
{
    dictionary.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attr_and_index_agree() {
        let m = convert([("x", json!(1))]);
        assert_eq!(m.attr("x").unwrap(), &json!(1));
        assert_eq!(m["x"], json!(1));
        assert_eq!(m.get("x"), Some(&json!(1)));
    }

    #[test]
    fn missing_attr_carries_key() {
        let m = convert([("x", json!(1))]);
        assert_eq!(m.attr("y").unwrap_err(), KitError::AttributeNotFound { key: "y".into() });
    }

    #[test]
    fn try_from_rejects_non_objects() {
        assert!(AttrMap::try_from(json!([1, 2])).is_err());
        let m = AttrMap::try_from(json!({"b": 2, "a": 1})).unwrap();
        assert_eq!(m.attr_as::<i64>("a").unwrap(), 1);
    }
}

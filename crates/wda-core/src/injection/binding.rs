//! Enlace de argumentos contra una `Signature`.
//!
//! Reglas estándar: los posicionales llenan los slots posicionales en orden,
//! los sobrantes van al parámetro `VarPositional` (si existe), las keywords se
//! asignan por nombre y las que no tienen parámetro propio van al
//! `VarKeyword`. `apply_defaults` completa lo que quede sin valor.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::signature::{ParamKind, Signature};
use crate::errors::{BindError, KitError};

/// Resultado de enlazar argumentos. Las claves de `arguments` siguen el orden
/// de la firma.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArguments<'s> {
    signature: &'s Signature,
    arguments: IndexMap<String, Value>,
}

impl<'s> BoundArguments<'s> {
    pub fn signature(&self) -> &'s Signature { self.signature }

    pub fn arguments(&self) -> &IndexMap<String, Value> { &self.arguments }

    pub fn into_arguments(self) -> IndexMap<String, Value> { self.arguments }

    pub fn get(&self, name: &str) -> Option<&Value> { self.arguments.get(name) }

    /// Decodifica el argumento `name` a un tipo concreto.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, KitError> {
        let v = self.arguments
                    .get(name)
                    .ok_or_else(|| KitError::Decode(format!("no argument bound to '{name}'")))?;
        serde_json::from_value(v.clone()).map_err(|e| KitError::Decode(format!("argument '{name}': {e}")))
    }

    /// Completa los parámetros sin valor con su default declarado; los
    /// variádicos reciben un array u objeto vacío.
    pub fn apply_defaults(&mut self) {
        let mut ordered = IndexMap::with_capacity(self.signature.len());
        for p in self.signature.params() {
            let value = match self.arguments.shift_remove(&p.name) {
                Some(v) => v,
                None => match (p.kind, &p.default) {
                    (_, Some(d)) => d.clone(),
                    (ParamKind::VarPositional, None) => Value::Array(Vec::new()),
                    (ParamKind::VarKeyword, None) => Value::Object(Map::new()),
                    _ => continue,
                },
            };
            ordered.insert(p.name.clone(), value);
        }
        self.arguments = ordered;
    }

    /// Valores que se pasarían posicionalmente.
    pub fn args(&self) -> Vec<Value> { self.split().0 }

    /// Valores que se pasarían por keyword.
    pub fn kwargs(&self) -> IndexMap<String, Value> { self.split().1 }

    fn split(&self) -> (Vec<Value>, IndexMap<String, Value>) {
        let mut args = Vec::new();
        let mut kwargs = IndexMap::new();
        let mut kwargs_started = false;
        for p in self.signature.params() {
            let bound = self.arguments.get(&p.name);
            match p.kind {
                ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword => match bound {
                    Some(v) if !kwargs_started => args.push(v.clone()),
                    Some(v) => {
                        kwargs.insert(p.name.clone(), v.clone());
                    }
                    None => kwargs_started = true,
                },
                ParamKind::VarPositional => {
                    if let (false, Some(Value::Array(items))) = (kwargs_started, bound) {
                        args.extend(items.iter().cloned());
                    }
                }
                ParamKind::KeywordOnly => {
                    if let Some(v) = bound {
                        kwargs.insert(p.name.clone(), v.clone());
                    }
                }
                ParamKind::VarKeyword => {
                    if let Some(Value::Object(extra)) = bound {
                        kwargs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
                    }
                }
            }
        }
        (args, kwargs)
    }
}

/// Enlaza `positional` y `keywords` contra `signature`.
pub fn bind<'s>(signature: &'s Signature, positional: Vec<Value>, keywords: IndexMap<String, Value>) -> Result<BoundArguments<'s>, BindError> {
    let mut arguments: IndexMap<String, Value> = IndexMap::new();

    let slots: Vec<&str> = signature.positional().map(|p| p.name.as_str()).collect();
    let var_positional = signature.find_kind(ParamKind::VarPositional);
    let given = positional.len();
    let mut extra = Vec::new();
    for (i, value) in positional.into_iter().enumerate() {
        match slots.get(i) {
            Some(name) => {
                arguments.insert((*name).to_string(), value);
            }
            None if var_positional.is_some() => extra.push(value),
            None => return Err(BindError::TooManyPositional { max: slots.len(), given }),
        }
    }
    if let (Some(p), false) = (var_positional, extra.is_empty()) {
        arguments.insert(p.name.clone(), Value::Array(extra));
    }

    let var_keyword = signature.find_kind(ParamKind::VarKeyword);
    let mut extra_kw = Map::new();
    for (name, value) in keywords {
        match signature.get(&name).map(|p| p.kind) {
            Some(ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly) => {
                if arguments.contains_key(&name) {
                    return Err(BindError::MultipleValues { name });
                }
                arguments.insert(name, value);
            }
            Some(ParamKind::PositionalOnly) if var_keyword.is_none() => return Err(BindError::PositionalOnlyAsKeyword { name }),
            _ if var_keyword.is_some() => {
                extra_kw.insert(name, value);
            }
            _ => return Err(BindError::UnexpectedKeyword { name }),
        }
    }
    if let (Some(p), false) = (var_keyword, extra_kw.is_empty()) {
        arguments.insert(p.name.clone(), Value::Object(extra_kw));
    }

    if let Some(missing) = signature.params()
                                    .iter()
                                    .find(|p| !p.kind.is_variadic() && !p.has_default() && !arguments.contains_key(&p.name))
    {
        return Err(BindError::MissingArgument { name: missing.name.clone() });
    }

    // orden de la firma
    let mut ordered = IndexMap::with_capacity(arguments.len());
    for p in signature.params() {
        if let Some(v) = arguments.shift_remove(&p.name) {
            ordered.insert(p.name.clone(), v);
        }
    }
    Ok(BoundArguments { signature,
                        arguments: ordered })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::signature::Parameter;
    use serde_json::json;

    fn kw(pairs: &[(&str, Value)]) -> IndexMap<String, Value> { pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect() }

    #[test]
    fn positional_then_keyword() {
        let sig = Signature::from_names(&["a", "b"]).unwrap();
        let bound = bind(&sig, vec![json!(1)], kw(&[("b", json!(2))])).unwrap();
        assert_eq!(bound.args(), vec![json!(1), json!(2)]);
        assert!(bound.kwargs().is_empty());
    }

    #[test]
    fn duplicate_positional_and_keyword_is_an_error() {
        let sig = Signature::from_names(&["a", "b"]).unwrap();
        let err = bind(&sig, vec![json!(1)], kw(&[("a", json!(9)), ("b", json!(2))])).unwrap_err();
        assert_eq!(err, BindError::MultipleValues { name: "a".into() });
    }

    #[test]
    fn too_many_positional() {
        let sig = Signature::from_names(&["a"]).unwrap();
        let err = bind(&sig, vec![json!(1), json!(2)], IndexMap::new()).unwrap_err();
        assert_eq!(err, BindError::TooManyPositional { max: 1, given: 2 });
    }

    #[test]
    fn missing_required() {
        let sig = Signature::new(vec![Parameter::required("a"), Parameter::optional("b", json!(5))]).unwrap();
        let err = bind(&sig, vec![], kw(&[("b", json!(1))])).unwrap_err();
        assert_eq!(err, BindError::MissingArgument { name: "a".into() });
    }

    #[test]
    fn variadics_collect_extras_and_default_to_empty() {
        let sig = Signature::new(vec![Parameter::required("a"), Parameter::var_positional("rest"), Parameter::var_keyword("opts")]).unwrap();
        let mut bound = bind(&sig, vec![json!(1), json!(2), json!(3)], kw(&[("z", json!(true))])).unwrap();
        bound.apply_defaults();
        assert_eq!(bound.get("rest"), Some(&json!([2, 3])));
        assert_eq!(bound.get("opts"), Some(&json!({"z": true})));
        assert_eq!(bound.args(), vec![json!(1), json!(2), json!(3)]);
        assert_eq!(bound.kwargs().get("z"), Some(&json!(true)));

        let mut empty = bind(&sig, vec![json!(1)], IndexMap::new()).unwrap();
        empty.apply_defaults();
        assert_eq!(empty.get("rest"), Some(&json!([])));
        assert_eq!(empty.get("opts"), Some(&json!({})));
    }

    #[test]
    fn positional_only_by_keyword() {
        let sig = Signature::new(vec![Parameter::required("a").with_kind(ParamKind::PositionalOnly)]).unwrap();
        let err = bind(&sig, vec![], kw(&[("a", json!(1))])).unwrap_err();
        assert_eq!(err, BindError::PositionalOnlyAsKeyword { name: "a".into() });
    }

    #[test]
    fn keyword_only_lands_in_kwargs() {
        let sig = Signature::new(vec![Parameter::required("a"),
                                      Parameter::optional("flag", json!(false)).with_kind(ParamKind::KeywordOnly)]).unwrap();
        let mut bound = bind(&sig, vec![json!("x")], IndexMap::new()).unwrap();
        bound.apply_defaults();
        assert_eq!(bound.args(), vec![json!("x")]);
        assert_eq!(bound.kwargs().get("flag"), Some(&json!(false)));
        assert!(!bound.get_as::<bool>("flag").unwrap());
    }

    #[test]
    fn bound_arguments_keep_signature_and_release_arguments() {
        let sig = Signature::new(vec![Parameter::required("b"), Parameter::optional("a", json!(0))]).unwrap();
        let mut bound = bind(&sig, vec![], kw(&[("a", json!(1)), ("b", json!(2))])).unwrap();
        bound.apply_defaults();
        assert!(std::ptr::eq(bound.signature(), &sig));
        let args = bound.into_arguments();
        // orden de la firma, no del pool
        assert_eq!(args.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}

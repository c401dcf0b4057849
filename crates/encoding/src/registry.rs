use crate::error::{EncodingError, Result};
use crate::predicates::reduce_digits;
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type EncodingFn = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// A named, pure `text -> value` function.
#[derive(Clone)]
pub struct Encoding {
    name: String,
    func: EncodingFn,
}

impl Encoding {
    pub fn new(name: impl Into<String>, func: impl Fn(&str) -> Value + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn evaluate(&self, text: &str) -> Value {
        (self.func)(text)
    }

    /// Derived encoding: digit-sum reduction of this encoding's output,
    /// stopping at any of `masters`. Non-integral output maps to
    /// [`Value::NotApplicable`].
    pub fn reduced(&self, name: impl Into<String>, masters: &'static [u64]) -> Self {
        let base = Arc::clone(&self.func);
        Self::new(name, move |text| match base(text).as_integer() {
            Some(n) => Value::Int(reduce_digits(n.unsigned_abs(), masters) as i64),
            None => Value::NotApplicable,
        })
    }
}

impl fmt::Debug for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoding").field("name", &self.name).finish()
    }
}

/// Ordered table of encodings, keyed by name.
///
/// Names are validated when registered; lookups by unknown names fail with
/// [`EncodingError::UnknownLayer`].
#[derive(Clone, Default, Debug)]
pub struct EncodingRegistry {
    encodings: Vec<Encoding>,
    by_name: HashMap<String, usize>,
}

impl EncodingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl Fn(&str) -> Value + Send + Sync + 'static,
    ) -> Result<()> {
        self.insert(Encoding::new(name, func))
    }

    pub fn insert(&mut self, encoding: Encoding) -> Result<()> {
        let name = encoding.name().to_string();
        if name.trim().is_empty() || name.trim() != name {
            return Err(EncodingError::InvalidName(name));
        }
        if self.by_name.contains_key(&name) {
            return Err(EncodingError::DuplicateEncoding(name));
        }
        self.by_name.insert(name, self.encodings.len());
        self.encodings.push(encoding);
        Ok(())
    }

    /// Register `name` as the digit reduction of an already registered encoding.
    pub fn register_reduced(&mut self, name: &str, base: &str, masters: &'static [u64]) -> Result<()> {
        let derived = self.get(base)?.reduced(name, masters);
        self.insert(derived)
    }

    pub fn get(&self, name: &str) -> Result<&Encoding> {
        self.by_name
            .get(name)
            .map(|&idx| &self.encodings[idx])
            .ok_or_else(|| EncodingError::UnknownLayer(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.encodings.iter().map(Encoding::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Encoding> {
        self.encodings.iter()
    }

    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// Fail on the first name that is not registered.
    pub fn ensure_known<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.get(name)?;
        }
        Ok(())
    }

    /// New registry holding `names` in the given order.
    pub fn select<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut selected = Self::new();
        for name in names {
            selected.insert(self.get(name)?.clone())?;
        }
        Ok(selected)
    }

    /// Evaluate every encoding on `text`, in registration order.
    pub fn evaluate_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = (&'a str, Value)> + 'a {
        self.encodings.iter().map(move |e| (e.name(), e.evaluate(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn length_registry() -> EncodingRegistry {
        let mut registry = EncodingRegistry::new();
        registry
            .register("Length", |text| Value::Int(text.chars().count() as i64))
            .unwrap();
        registry
    }

    #[test]
    fn register_and_lookup() {
        let registry = length_registry();
        assert_eq!(registry.get("Length").unwrap().evaluate("abc"), Value::Int(3));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Length"]);
    }

    #[test]
    fn duplicate_and_blank_names_are_rejected() {
        let mut registry = length_registry();
        let err = registry.register("Length", |_| Value::Int(0)).unwrap_err();
        assert_eq!(err, EncodingError::DuplicateEncoding("Length".into()));

        let err = registry.register(" ", |_| Value::Int(0)).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidName(_)));
    }

    #[test]
    fn unknown_layer_lookup_fails() {
        let registry = length_registry();
        assert_eq!(
            registry.get("Nope").unwrap_err(),
            EncodingError::UnknownLayer("Nope".into())
        );
        assert!(registry.select(["Length", "Nope"]).is_err());
    }

    #[test]
    fn reduced_encoding_is_registered_by_name() {
        let mut registry = EncodingRegistry::new();
        registry.register("Big", |_| Value::Int(29)).unwrap();
        registry.register("Word", |t| Value::Text(t.to_string())).unwrap();
        registry.register_reduced("Big Reduced", "Big", &[]).unwrap();
        registry.register_reduced("Big Master", "Big", &[11, 22]).unwrap();
        registry.register_reduced("Word Reduced", "Word", &[]).unwrap();

        assert_eq!(registry.get("Big Reduced").unwrap().evaluate("x"), Value::Int(2));
        assert_eq!(registry.get("Big Master").unwrap().evaluate("x"), Value::Int(11));
        assert_eq!(
            registry.get("Word Reduced").unwrap().evaluate("x"),
            Value::NotApplicable
        );
    }
}

pub mod loader;

pub use loader::{load_facts, parse_facts, FactsError};

use serde::de::DeserializeOwned;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised when reading a fact as a concrete type.
#[derive(Error, Debug)]
pub enum FactError {
    #[error("fact '{0}' is not defined")]
    Missing(String),

    #[error("fact '{name}' has an unexpected type: {source}")]
    Type {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A single named value visible to rule conditions and actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Fact {
    pub name: String,
    pub value: Value,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Fact {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fact{{name='{}', value={}}}", self.name, self.value)
    }
}

/// Named facts for one firing session.
///
/// Names are unique. Enumeration follows insertion order; replacing an
/// existing fact keeps its original position.
///
/// A `Facts` value is not meant to be shared across concurrent firings:
/// `fire` needs `&mut Facts`, so the borrow checker enforces exclusive use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facts {
    entries: Vec<Fact>,
}

impl Facts {
    /// Create an empty fact store.
    pub fn new() -> Self {
        Facts::default()
    }

    /// Insert or replace a fact, returning the previous value if any.
    pub fn put(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();

        match self.position(&name) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].value, value)),
            None => {
                self.entries.push(Fact { name, value });
                None
            }
        }
    }

    /// Look up a fact by exact name. Absence is a normal outcome.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|fact| fact.name == name)
            .map(|fact| &fact.value)
    }

    /// Look up a fact and deserialize it into `T`.
    ///
    /// Returns `Ok(None)` when the fact is absent and `FactError::Type` when
    /// it is present but has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, FactError> {
        match self.get(name) {
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|source| FactError::Type {
                    name: name.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Like [`Facts::get_as`], but a missing fact is an error.
    pub fn require<T: DeserializeOwned>(&self, name: &str) -> Result<T, FactError> {
        self.get_as(name)?
            .ok_or_else(|| FactError::Missing(name.to_string()))
    }

    /// Remove a fact, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.position(name)?;
        Some(self.entries.remove(idx).value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterate facts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Fact> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|fact| fact.name == name)
    }
}

impl<'a> IntoIterator for &'a Facts {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<N, V> FromIterator<(N, V)> for Facts
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut facts = Facts::new();
        for (name, value) in iter {
            facts.put(name, value);
        }
        facts
    }
}

impl Serialize for Facts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for fact in &self.entries {
            map.serialize_entry(&fact.name, &fact.value)?;
        }
        map.end()
    }
}

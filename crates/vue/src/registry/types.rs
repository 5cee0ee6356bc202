//! Ordered component registry types.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single sub-component import: `import {name} from '{module}'`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentImport {
    /// Local identifier the module is bound to.
    pub name: String,
    /// Already-resolved module specifier.
    pub module: String,
}

/// Ordered mapping from local component identifiers to module specifiers.
///
/// Insertion order is kept. Re-inserting a known identifier replaces its
/// module in place, so later entries win without moving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    entries: Vec<ComponentImport>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as an import of `module`, returning the module it replaced.
    pub fn insert(&mut self, name: impl Into<String>, module: impl Into<String>) -> Option<String> {
        let name = name.into();
        let module = module.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => Some(std::mem::replace(&mut entry.module, module)),
            None => {
                self.entries.push(ComponentImport { name, module });
                None
            }
        }
    }

    /// Module specifier registered for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.module.as_str())
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no component is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentImport> {
        self.entries.iter()
    }

    /// Local identifiers in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for ComponentRegistry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

impl<K, V> Extend<(K, V)> for ComponentRegistry
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, module) in iter {
            self.insert(name, module);
        }
    }
}

impl<'a> IntoIterator for &'a ComponentRegistry {
    type Item = &'a ComponentImport;
    type IntoIter = std::slice::Iter<'a, ComponentImport>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for ComponentRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.module)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ComponentRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = ComponentRegistry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of component names to module specifiers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registry = ComponentRegistry::new();
                while let Some((name, module)) = access.next_entry::<String, String>()? {
                    registry.insert(name, module);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

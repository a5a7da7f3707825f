use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Placeholder color carried by a submodule until colors are assigned.
pub const DEFAULT_SUBMODULE_COLOR: &str = "#D3D3D3";

/// String-keyed map that remembers insertion order.
///
/// Re-inserting an existing key replaces the value but keeps the key at its
/// original position, so the map doubles as an ordered set of first-seen keys.
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns `true` when the key was not present before.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => {
                self.entries[pos].1 = value;
                false
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                true
            }
        }
    }

    /// Inserts `value` only if the key is absent and returns the stored value.
    pub fn get_or_insert(&mut self, key: impl Into<String>, value: V) -> &mut V {
        let key = key.into();
        let pos = match self.index.get(&key) {
            Some(&pos) => pos,
            None => {
                let pos = self.entries.len();
                self.index.insert(key.clone(), pos);
                self.entries.push((key, value));
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for OrderedMap<V> {}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Target path → "respects the layering".
pub type Dependencies = OrderedMap<bool>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub submodule: String,
    pub name: String,
    pub description: String,
    pub dependencies: Dependencies,
}

impl Unit {
    /// Copy of this unit carrying a different dependency map.
    pub fn with_dependencies(&self, dependencies: Dependencies) -> Self {
        Self {
            submodule: self.submodule.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            dependencies,
        }
    }
}

/// Full unit path → unit, in heading order.
pub type Units = OrderedMap<Unit>;

/// Submodule path → short unit names, in heading order.
pub type UnitOrder = OrderedMap<Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submodule {
    pub module: String,
    pub color: String,
    pub units: Vec<String>,
    pub dependencies: Dependencies,
}

/// Submodule path → submodule, in flattened hierarchy order.
pub type Submodules = OrderedMap<Submodule>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerHierarchy {
    pub root_layers: Vec<Vec<String>>,
    #[serde(default)]
    pub submodule_layers: BTreeMap<String, Vec<Vec<String>>>,
}

/// The document handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchitectureGraph {
    /// The hierarchy document echoed back unchanged.
    pub layers: serde_json::Value,
    pub submodules: Submodules,
    pub units: Units,
}

/// Raw inputs as read from storage.
#[derive(Debug, Clone)]
pub struct SourceDocuments {
    pub layers: LayerHierarchy,
    /// `layers.json` as parsed, in source key order.
    pub layers_document: serde_json::Value,
    pub unit_descriptions: String,
}

impl SourceDocuments {
    /// Reads the typed hierarchy out of the document; unknown fields are kept only in the echo.
    pub fn new(
        layers_document: serde_json::Value,
        unit_descriptions: String,
    ) -> serde_json::Result<Self> {
        let layers = LayerHierarchy::deserialize(&layers_document)?;
        Ok(Self {
            layers,
            layers_document,
            unit_descriptions,
        })
    }
}

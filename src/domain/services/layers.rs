//! Layer hierarchy flattening and the allowed-dependency relation derived from it.

use crate::domain::diagnostics::Diagnostic;
use crate::domain::model::LayerHierarchy;
use crate::utils::error::{GraphError, Result};
use std::collections::{HashMap, HashSet};

/// Flattens `root_layers` / `submodule_layers` into one ordered submodule list.
///
/// A module with no `submodule_layers` entry is its own (leaf) submodule.
pub fn flatten_layers(layers: &LayerHierarchy) -> Result<Vec<String>> {
    for (module, rows) in &layers.submodule_layers {
        let prefix = format!("{}.", module);
        if let Some(bad) = rows.iter().flatten().find(|sm| !sm.starts_with(&prefix)) {
            return Err(GraphError::MalformedSubmoduleName {
                submodule: bad.clone(),
                module: module.clone(),
            });
        }
    }

    let mut all_submodules = Vec::new();
    let mut seen = HashSet::new();
    let mut add = |sm: &str| -> Result<()> {
        if !seen.insert(sm.to_string()) {
            return Err(GraphError::DuplicateSubmodule {
                submodule: sm.to_string(),
            });
        }
        all_submodules.push(sm.to_string());
        Ok(())
    };

    for root_row in &layers.root_layers {
        for module in root_row {
            match layers.submodule_layers.get(module) {
                None => add(module)?,
                Some(rows) => {
                    for sm in rows.iter().flatten() {
                        add(sm)?;
                    }
                }
            }
        }
    }

    Ok(all_submodules)
}

/// `submodule_layers` keys that no root layer mentions; their submodules are ignored.
pub fn unused_module_layers(layers: &LayerHierarchy) -> Vec<Diagnostic> {
    let listed: HashSet<&str> = layers.root_layers.iter().flatten().map(String::as_str).collect();
    layers
        .submodule_layers
        .keys()
        .filter(|module| !listed.contains(module.as_str()))
        .map(|module| Diagnostic::UnusedModuleLayers {
            module: module.clone(),
        })
        .collect()
}

/// Where a submodule sits in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPosition {
    pub root_row: usize,
    /// Row within the module's `submodule_layers`; 0 for leaf modules.
    pub sub_row: usize,
    pub module: String,
}

#[derive(Debug, Clone, Default)]
pub struct LayerIndex {
    positions: HashMap<String, LayerPosition>,
}

impl LayerIndex {
    pub fn build(layers: &LayerHierarchy) -> Self {
        let mut positions = HashMap::new();
        for (root_row, row) in layers.root_layers.iter().enumerate() {
            for module in row {
                match layers.submodule_layers.get(module) {
                    None => {
                        positions.insert(
                            module.clone(),
                            LayerPosition {
                                root_row,
                                sub_row: 0,
                                module: module.clone(),
                            },
                        );
                    }
                    Some(rows) => {
                        for (sub_row, sub) in rows.iter().enumerate() {
                            for sm in sub {
                                positions.insert(
                                    sm.clone(),
                                    LayerPosition {
                                        root_row,
                                        sub_row,
                                        module: module.clone(),
                                    },
                                );
                            }
                        }
                    }
                }
            }
        }
        Self { positions }
    }

    pub fn position(&self, submodule: &str) -> Option<&LayerPosition> {
        self.positions.get(submodule)
    }

    /// Dependencies must point to a strictly lower root row, or to a strictly
    /// lower sub-row of the same module. Siblings in one row are never allowed.
    pub fn permits(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        let (Some(a), Some(b)) = (self.position(from), self.position(to)) else {
            return false;
        };
        b.root_row > a.root_row || (a.module == b.module && b.sub_row > a.sub_row)
    }

    pub fn submodules(&self) -> impl Iterator<Item = &str> {
        self.positions.keys().map(String::as_str)
    }
}

/// Submodule → submodules it may depend on (itself included), computed once per run.
#[derive(Debug, Clone, Default)]
pub struct AllowedDependencies {
    allowed: HashMap<String, HashSet<String>>,
}

impl AllowedDependencies {
    pub fn build(index: &LayerIndex) -> Self {
        let mut allowed = HashMap::new();
        for from in index.submodules() {
            let targets: HashSet<String> = index
                .submodules()
                .filter(|to| index.permits(from, to))
                .map(str::to_string)
                .collect();
            allowed.insert(from.to_string(), targets);
        }
        Self { allowed }
    }

    pub fn from_layers(layers: &LayerHierarchy) -> Self {
        Self::build(&LayerIndex::build(layers))
    }

    /// `None` when `from` is not part of the hierarchy.
    pub fn targets(&self, from: &str) -> Option<&HashSet<String>> {
        self.allowed.get(from)
    }

    pub fn contains(&self, submodule: &str) -> bool {
        self.allowed.contains_key(submodule)
    }

    pub fn allows(&self, from: &str, to: &str) -> bool {
        self.targets(from).is_some_and(|targets| targets.contains(to))
    }
}

use crate::domain::diagnostics::Diagnostic;
use crate::domain::model::{Dependencies, LayerHierarchy, Units};
use crate::domain::services::layers::AllowedDependencies;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub unit: String,
    pub dependency: String,
}

impl From<&Violation> for Diagnostic {
    fn from(v: &Violation) -> Self {
        Diagnostic::LayerViolation {
            unit: v.unit.clone(),
            dependency: v.dependency.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerCheck {
    pub units: Units,
    pub violations: Vec<Violation>,
}

impl LayerCheck {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.violations.iter().map(Diagnostic::from).collect()
    }
}

pub fn check_layer_violations(units: &Units, layers: &LayerHierarchy) -> LayerCheck {
    check_with(units, &AllowedDependencies::from_layers(layers))
}

/// Recomputes every dependency flag; violating entries are kept and set to `false`.
pub fn check_with(units: &Units, allowed: &AllowedDependencies) -> LayerCheck {
    let mut violations = Vec::new();

    let checked: Units = units
        .iter()
        .map(|(path, unit)| {
            let from = unit.submodule.as_str();
            let dependencies: Dependencies = unit
                .dependencies
                .iter()
                .map(|(target, &current)| {
                    let Some(to) = units.get(target).map(|t| t.submodule.as_str()) else {
                        return (target, current);
                    };
                    if !allowed.contains(from) || !allowed.contains(to) {
                        return (target, current);
                    }
                    let ok = allowed.allows(from, to);
                    if !ok {
                        violations.push(Violation {
                            unit: path.to_string(),
                            dependency: target.to_string(),
                        });
                    }
                    (target, ok)
                })
                .collect();
            (path, unit.with_dependencies(dependencies))
        })
        .collect();

    LayerCheck {
        units: checked,
        violations,
    }
}

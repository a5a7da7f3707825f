//! Rewrites raw `@` references into canonical unit paths.

use crate::domain::diagnostics::Diagnostic;
use crate::domain::model::{Dependencies, Units};

/// A reference that only matched after trimming its last segment
/// (e.g. `core.prediction.Model.predict` → `core.prediction.Model`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub unit: String,
    pub reference: String,
    pub resolved: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub unit: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub units: Units,
    pub rewrites: Vec<Rewrite>,
    pub failures: Vec<UnresolvedReference>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Rewrites and failures, in the order the references were declared.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Informational record counting the unresolved references.
    pub fn summary(&self) -> Diagnostic {
        Diagnostic::ResolutionSummary {
            errors: self.error_count(),
        }
    }
}

/// What a single reference resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    SelfReference,
    Exact,
    Trimmed(String),
    Unresolved,
}

fn resolve_reference(units: &Units, owner: &str, reference: &str) -> Outcome {
    if reference == owner {
        return Outcome::SelfReference;
    }
    if units.contains_key(reference) {
        return Outcome::Exact;
    }
    // Exactly one trim; deeper prefixes are not tried.
    match reference.rsplit_once('.') {
        Some((parent, _)) if parent == owner => Outcome::SelfReference,
        Some((parent, _)) if units.contains_key(parent) => Outcome::Trimmed(parent.to_string()),
        _ => Outcome::Unresolved,
    }
}

pub fn resolve_dependencies(units: &Units) -> Resolution {
    let mut rewrites = Vec::new();
    let mut failures = Vec::new();
    let mut diagnostics = Vec::new();

    let resolved_units: Units = units
        .iter()
        .map(|(path, unit)| {
            let mut resolved = Dependencies::new();
            for reference in unit.dependencies.keys() {
                match resolve_reference(units, path, reference) {
                    Outcome::SelfReference => {}
                    Outcome::Exact => {
                        resolved.get_or_insert(reference, true);
                    }
                    Outcome::Trimmed(parent) => {
                        diagnostics.push(Diagnostic::DependencyRewritten {
                            unit: path.to_string(),
                            reference: reference.to_string(),
                            resolved: parent.clone(),
                        });
                        rewrites.push(Rewrite {
                            unit: path.to_string(),
                            reference: reference.to_string(),
                            resolved: parent.clone(),
                        });
                        resolved.get_or_insert(parent, true);
                    }
                    Outcome::Unresolved => {
                        diagnostics.push(Diagnostic::UnresolvedReference {
                            unit: path.to_string(),
                            reference: reference.to_string(),
                        });
                        failures.push(UnresolvedReference {
                            unit: path.to_string(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
            (path, unit.with_dependencies(resolved))
        })
        .collect();

    Resolution {
        units: resolved_units,
        rewrites,
        failures,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Unit;

    fn make_units(deps_map: &[(&str, &[&str])]) -> Units {
        deps_map
            .iter()
            .map(|(path, deps)| {
                let (submodule, name) = path.rsplit_once('.').unwrap();
                (
                    *path,
                    Unit {
                        submodule: submodule.to_string(),
                        name: name.to_string(),
                        description: String::new(),
                        dependencies: deps.iter().map(|d| (*d, true)).collect(),
                    },
                )
            })
            .collect()
    }

    fn dep_keys(resolution: &Resolution, path: &str) -> Vec<String> {
        resolution
            .units
            .get(path)
            .unwrap()
            .dependencies
            .keys()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_exact_match_kept() {
        let units = make_units(&[("a.b.f", &["a.b.g"]), ("a.b.g", &[])]);
        let resolution = resolve_dependencies(&units);
        assert_eq!(resolution.units.get("a.b.f").unwrap().dependencies.get("a.b.g"), Some(&true));
        assert!(resolution.diagnostics().is_empty());
    }

    #[test]
    fn test_self_reference_dropped_silently() {
        let units = make_units(&[("a.b.f", &["a.b.f"])]);
        let resolution = resolve_dependencies(&units);
        assert!(dep_keys(&resolution, "a.b.f").is_empty());
        assert_eq!(resolution.error_count(), 0);
        assert!(resolution.diagnostics().is_empty());
    }

    #[test]
    fn test_own_member_reference_dropped_silently() {
        let units = make_units(&[("a.b.Model", &["a.b.Model.predict"])]);
        let resolution = resolve_dependencies(&units);
        assert!(dep_keys(&resolution, "a.b.Model").is_empty());
        assert!(resolution.rewrites.is_empty());
        assert!(resolution.diagnostics().is_empty());
    }

    #[test]
    fn test_member_reference_matched_to_parent() {
        let units = make_units(&[("a.b.f", &["a.b.Model.predict"]), ("a.b.Model", &[])]);
        let resolution = resolve_dependencies(&units);
        assert_eq!(dep_keys(&resolution, "a.b.f"), vec!["a.b.Model"]);
        assert_eq!(
            resolution.rewrites,
            vec![Rewrite {
                unit: "a.b.f".to_string(),
                reference: "a.b.Model.predict".to_string(),
                resolved: "a.b.Model".to_string(),
            }]
        );
        assert_eq!(
            resolution.diagnostics()[0].to_string(),
            "a.b.f dependency a.b.Model.predict was matched to a.b.Model"
        );
    }

    #[test]
    fn test_member_references_collapse_to_one_entry() {
        let units = make_units(&[
            ("a.b.f", &["a.b.Model.fit", "a.b.g", "a.b.Model.predict", "a.b.Model"]),
            ("a.b.Model", &[]),
            ("a.b.g", &[]),
        ]);
        let resolution = resolve_dependencies(&units);
        assert_eq!(dep_keys(&resolution, "a.b.f"), vec!["a.b.Model", "a.b.g"]);
        assert_eq!(resolution.rewrites.len(), 2);
    }

    #[test]
    fn test_only_one_trim_is_attempted() {
        let units = make_units(&[("a.b.f", &["a.b.Model.inner.method"]), ("a.b.Model", &[])]);
        let resolution = resolve_dependencies(&units);
        assert!(dep_keys(&resolution, "a.b.f").is_empty());
        assert_eq!(resolution.error_count(), 1);
    }

    #[test]
    fn test_unknown_reference_dropped_and_reported() {
        let units = make_units(&[("a.b.f", &["x.y.z", "p.q.r"])]);
        let resolution = resolve_dependencies(&units);
        assert!(dep_keys(&resolution, "a.b.f").is_empty());
        assert_eq!(resolution.error_count(), 2);
        assert_eq!(resolution.summary(), Diagnostic::ResolutionSummary { errors: 2 });
        assert_eq!(
            resolution.diagnostics()[0].to_string(),
            "Referenced Unit Unknown: a.b.f depends on x.y.z, which could not be resolved"
        );
    }

    #[test]
    fn test_reference_without_dot_is_unresolved() {
        let units = make_units(&[("a.b.f", &["orphan"])]);
        let resolution = resolve_dependencies(&units);
        assert_eq!(
            resolution.failures,
            vec![UnresolvedReference {
                unit: "a.b.f".to_string(),
                reference: "orphan".to_string(),
            }]
        );
    }

    #[test]
    fn test_input_is_not_modified() {
        let units = make_units(&[("a.b.f", &["x.y.z", "a.b.f"])]);
        let original = units.clone();
        let resolution = resolve_dependencies(&units);
        assert_eq!(units, original);
        assert_ne!(resolution.units, original);
    }

    #[test]
    fn test_diagnostics_follow_declaration_order() {
        let units = make_units(&[
            ("a.b.f", &["x.y.z", "a.b.Model.fit"]),
            ("a.b.Model", &["gone.unit"]),
        ]);
        let resolution = resolve_dependencies(&units);
        let kinds: Vec<_> = resolution
            .diagnostics()
            .iter()
            .map(|d| match d {
                Diagnostic::UnresolvedReference { reference, .. } => format!("unresolved {}", reference),
                Diagnostic::DependencyRewritten { reference, .. } => format!("rewritten {}", reference),
                other => other.to_string(),
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["unresolved x.y.z", "rewritten a.b.Model.fit", "unresolved gone.unit"]
        );
    }
}

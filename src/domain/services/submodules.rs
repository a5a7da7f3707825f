use crate::domain::diagnostics::Diagnostic;
use crate::domain::model::{
    Dependencies, Submodule, Submodules, UnitOrder, Units, DEFAULT_SUBMODULE_COLOR,
};
use crate::domain::services::parser::split_unit_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleSkeleton {
    pub submodules: Submodules,
    pub diagnostics: Vec<Diagnostic>,
}

/// `catalog.pricing` → `catalog`; a dotless path is its own module.
pub fn module_of(submodule: &str) -> &str {
    submodule.split('.').next().unwrap_or(submodule)
}

pub fn create_submodules(all_submodules: &[String], unit_order: &UnitOrder) -> SubmoduleSkeleton {
    let mut diagnostics = Vec::new();

    let submodules = all_submodules
        .iter()
        .map(|sm| {
            let units = unit_order.get(sm).cloned().unwrap_or_default();
            if units.is_empty() {
                diagnostics.push(Diagnostic::EmptySubmodule {
                    submodule: sm.clone(),
                });
            }
            (
                sm.as_str(),
                Submodule {
                    module: module_of(sm).to_string(),
                    color: DEFAULT_SUBMODULE_COLOR.to_string(),
                    units,
                    dependencies: Dependencies::new(),
                },
            )
        })
        .collect();

    SubmoduleSkeleton {
        submodules,
        diagnostics,
    }
}

/// Rolls unit-level flags up to submodule pairs.
///
/// An edge is `true` only if every unit-level edge behind it is `true`.
/// Edges inside a submodule produce no entry.
pub fn assign_submodule_dependencies(submodules: &Submodules, units: &Units) -> Submodules {
    let mut result = submodules.clone();

    for (_, unit) in units.iter() {
        let source = unit.submodule.as_str();
        let Some(sm) = result.get_mut(source) else {
            continue;
        };
        for (target, &valid) in unit.dependencies.iter() {
            let target_sm = match units.get(target) {
                Some(t) => t.submodule.as_str(),
                None => split_unit_path(target).map_or(target, |(sm, _)| sm),
            };
            if target_sm == source {
                continue;
            }
            let edge = sm.dependencies.get_or_insert(target_sm, true);
            *edge = *edge && valid;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Unit;

    fn bare(module: &str) -> Submodule {
        Submodule {
            module: module.to_string(),
            color: "#ffffff".to_string(),
            units: Vec::new(),
            dependencies: Dependencies::new(),
        }
    }

    fn unit(path: &str, deps: &[(&str, bool)]) -> (String, Unit) {
        let (submodule, name) = path.rsplit_once('.').unwrap();
        (
            path.to_string(),
            Unit {
                submodule: submodule.to_string(),
                name: name.to_string(),
                description: String::new(),
                dependencies: deps.iter().copied().collect(),
            },
        )
    }

    #[test]
    fn test_skeleton_structure() {
        let order: UnitOrder = [
            ("api.routes", vec!["get_samples".to_string()]),
            ("main", vec!["run".to_string()]),
        ]
        .into_iter()
        .collect();
        let all = vec!["main".to_string(), "api.routes".to_string(), "db.x".to_string()];

        let skeleton = create_submodules(&all, &order);
        let sm = skeleton.submodules.get("api.routes").unwrap();
        assert_eq!(sm.module, "api");
        assert_eq!(sm.color, DEFAULT_SUBMODULE_COLOR);
        assert_eq!(sm.units, vec!["get_samples"]);
        assert!(sm.dependencies.is_empty());
        assert_eq!(skeleton.submodules.get("main").unwrap().module, "main");

        assert_eq!(
            skeleton.submodules.keys().collect::<Vec<_>>(),
            vec!["main", "api.routes", "db.x"]
        );
        assert_eq!(
            skeleton.diagnostics,
            vec![Diagnostic::EmptySubmodule {
                submodule: "db.x".to_string()
            }]
        );
        assert!(skeleton.submodules.get("db.x").unwrap().units.is_empty());
    }

    #[test]
    fn test_unit_deps_aggregated_to_submodule() {
        let submodules: Submodules = [("a.x", bare("a")), ("b.y", bare("b"))].into_iter().collect();
        let units: Units = [unit("a.x.f", &[("b.y.g", true)]), unit("b.y.g", &[])]
            .into_iter()
            .collect();
        let result = assign_submodule_dependencies(&submodules, &units);
        assert_eq!(result.get("a.x").unwrap().dependencies.get("b.y"), Some(&true));
        assert!(result.get("b.y").unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_any_violation_makes_edge_invalid() {
        let submodules: Submodules = [("a.x", bare("a"))].into_iter().collect();
        let units: Units = [
            unit("a.x.f", &[("b.y.g", true)]),
            unit("a.x.h", &[("b.y.g", false)]),
            unit("a.x.i", &[("b.y.g", true)]),
        ]
        .into_iter()
        .collect();
        let result = assign_submodule_dependencies(&submodules, &units);
        assert_eq!(result.get("a.x").unwrap().dependencies.get("b.y"), Some(&false));
    }

    #[test]
    fn test_aggregate_independent_of_unit_order() {
        let submodules: Submodules = [("a.x", bare("a"))].into_iter().collect();
        let forward: Units = [unit("a.x.f", &[("b.y.g", false)]), unit("a.x.h", &[("b.y.i", true)])]
            .into_iter()
            .collect();
        let backward: Units = [unit("a.x.h", &[("b.y.i", true)]), unit("a.x.f", &[("b.y.g", false)])]
            .into_iter()
            .collect();
        let a = assign_submodule_dependencies(&submodules, &forward);
        let b = assign_submodule_dependencies(&submodules, &backward);
        assert_eq!(a.get("a.x").unwrap().dependencies.get("b.y"), Some(&false));
        assert_eq!(b.get("a.x").unwrap().dependencies.get("b.y"), Some(&false));
    }

    #[test]
    fn test_multiple_target_submodules() {
        let submodules: Submodules = [("a.x", bare("a"))].into_iter().collect();
        let units: Units = [unit("a.x.f", &[("b.y.h", true)]), unit("a.x.g", &[("c.z.i", false)])]
            .into_iter()
            .collect();
        let result = assign_submodule_dependencies(&submodules, &units);
        let deps = &result.get("a.x").unwrap().dependencies;
        assert_eq!(deps.keys().collect::<Vec<_>>(), vec!["b.y", "c.z"]);
        assert_eq!(deps.get("c.z"), Some(&false));
    }

    #[test]
    fn test_intra_submodule_deps_skipped() {
        let submodules: Submodules = [("a.x", bare("a"))].into_iter().collect();
        let units: Units = [unit("a.x.f", &[("a.x.g", true)]), unit("a.x.g", &[("a.x.f", true)])]
            .into_iter()
            .collect();
        let result = assign_submodule_dependencies(&submodules, &units);
        assert!(result.get("a.x").unwrap().dependencies.is_empty());
    }

    #[test]
    fn test_does_not_modify_input() {
        let submodules: Submodules = [("a.x", bare("a"))].into_iter().collect();
        let original = submodules.clone();
        let units: Units = [unit("a.x.f", &[("b.y.g", true)])].into_iter().collect();
        assign_submodule_dependencies(&submodules, &units);
        assert_eq!(submodules, original);
    }

    #[test]
    fn test_module_of() {
        assert_eq!(module_of("catalog.pricing"), "catalog");
        assert_eq!(module_of("db.queries.sample"), "db");
        assert_eq!(module_of("main"), "main");
    }
}

use crate::domain::model::Units;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathProblem {
    /// The unit path names a submodule instead of something inside one.
    UnitIsSubmodule { unit: String },
    UnknownSubmodule { unit: String, submodule: String },
}

impl fmt::Display for PathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathProblem::UnitIsSubmodule { unit } => write!(
                f,
                "Unit Is Submodule: {}: a unit is supposed to be contained in a submodule \
                 (like a function or class), not be the submodule itself",
                unit
            ),
            PathProblem::UnknownSubmodule { unit, .. } => write!(
                f,
                "Unknown Submodule: {} is not part of any submodule in the provided architectural layers",
                unit
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathReport {
    pub problems: Vec<PathProblem>,
}

impl PathReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

pub fn validate_unit_paths(units: &Units, all_submodules: &[String]) -> PathReport {
    let known: HashSet<&str> = all_submodules.iter().map(String::as_str).collect();

    let problems = units
        .iter()
        .filter_map(|(path, unit)| {
            if known.contains(path) {
                Some(PathProblem::UnitIsSubmodule {
                    unit: path.to_string(),
                })
            } else if !known.contains(unit.submodule.as_str()) {
                Some(PathProblem::UnknownSubmodule {
                    unit: path.to_string(),
                    submodule: unit.submodule.clone(),
                })
            } else {
                None
            }
        })
        .collect();

    PathReport { problems }
}

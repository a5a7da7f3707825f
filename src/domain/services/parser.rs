//! Unit description parsing.
//!
//! A unit block starts with a `### <submodule>.<Name>` heading and runs until
//! the next heading. Dependencies are written inline as `` `@full.unit.path` ``.

use crate::domain::model::{Dependencies, Unit, UnitOrder, Units};
use crate::utils::error::{GraphError, Result};
use regex::Regex;
use std::sync::OnceLock;

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^### ([^\n]+)(?:\n|\z)").expect("valid heading regex"))
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`@([\w.]+)`").expect("valid reference regex"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnits {
    pub units: Units,
    pub unit_order: UnitOrder,
}

/// Splits `submodule.Name` at the last dot.
pub fn split_unit_path(path: &str) -> Option<(&str, &str)> {
    path.rfind('.').map(|dot| (&path[..dot], &path[dot + 1..]))
}

pub fn parse_unit_descriptions(text: &str) -> Result<ParsedUnits> {
    let mut parsed = ParsedUnits::default();

    let headings: Vec<_> = heading_re().captures_iter(text).collect();
    for (i, caps) in headings.iter().enumerate() {
        let (Some(whole), Some(header)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let body_end = headings
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(text.len(), |m| m.start());

        let unit_path = header.as_str().trim();
        let description = text[whole.end()..body_end].trim();

        if parsed.units.contains_key(unit_path) {
            return Err(GraphError::DuplicateUnit {
                path: unit_path.to_string(),
            });
        }
        let (submodule, name) =
            split_unit_path(unit_path).ok_or_else(|| GraphError::MissingSeparator {
                path: unit_path.to_string(),
            })?;

        let dependencies: Dependencies = reference_re()
            .captures_iter(description)
            .filter_map(|c| c.get(1))
            .map(|m| (m.as_str(), true))
            .collect();

        tracing::debug!(
            "Parsed unit {} with {} reference(s)",
            unit_path,
            dependencies.len()
        );

        parsed.units.insert(
            unit_path,
            Unit {
                submodule: submodule.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                dependencies,
            },
        );
        parsed
            .unit_order
            .get_or_insert(submodule, Vec::new())
            .push(name.to_string());
    }

    Ok(parsed)
}

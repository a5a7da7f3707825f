use crate::domain::services::paths::PathProblem;
use std::fmt;

/// A non-fatal finding produced while building the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    Path(PathProblem),
    EmptySubmodule {
        submodule: String,
    },
    UnusedModuleLayers {
        module: String,
    },
    DependencyRewritten {
        unit: String,
        reference: String,
        resolved: String,
    },
    UnresolvedReference {
        unit: String,
        reference: String,
    },
    LayerViolation {
        unit: String,
        dependency: String,
    },
    /// Closes the resolver's records with the number of unresolved references.
    ResolutionSummary {
        errors: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

impl Diagnostic {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Diagnostic::Path(_) | Diagnostic::UnresolvedReference { .. } => DiagnosticLevel::Error,
            Diagnostic::EmptySubmodule { .. }
            | Diagnostic::UnusedModuleLayers { .. }
            | Diagnostic::DependencyRewritten { .. }
            | Diagnostic::LayerViolation { .. } => DiagnosticLevel::Warning,
            Diagnostic::ResolutionSummary { .. } => DiagnosticLevel::Info,
        }
    }

    pub fn emit(&self) {
        match self.level() {
            DiagnosticLevel::Error => tracing::error!("{}", self),
            DiagnosticLevel::Warning => tracing::warn!("{}", self),
            DiagnosticLevel::Info => tracing::info!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Path(problem) => write!(f, "{}", problem),
            Diagnostic::EmptySubmodule { submodule } => {
                write!(f, "Submodule {} has no units", submodule)
            }
            Diagnostic::UnusedModuleLayers { module } => write!(
                f,
                "Module {} has submodule layers but does not appear in root_layers",
                module
            ),
            Diagnostic::DependencyRewritten {
                unit,
                reference,
                resolved,
            } => write!(f, "{} dependency {} was matched to {}", unit, reference, resolved),
            Diagnostic::UnresolvedReference { unit, reference } => write!(
                f,
                "Referenced Unit Unknown: {} depends on {}, which could not be resolved",
                unit, reference
            ),
            Diagnostic::LayerViolation { unit, dependency } => write!(
                f,
                "Architecture Validation: {} must not depend on {}",
                unit, dependency
            ),
            Diagnostic::ResolutionSummary { errors } => {
                write!(f, "Dependency resolution completed with {} error(s)", errors)
            }
        }
    }
}

impl From<PathProblem> for Diagnostic {
    fn from(problem: PathProblem) -> Self {
        Diagnostic::Path(problem)
    }
}

/// Diagnostics in the order the stages produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.entries.extend(diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticLevel::Warning)
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.entries.iter().filter(|d| d.level() == level).count()
    }

    /// Logs every entry at its own level, in order.
    pub fn emit_entries(&self) {
        for diagnostic in &self.entries {
            diagnostic.emit();
        }
    }

    /// Logs every entry followed by the error/warning summary.
    pub fn emit(&self) {
        self.emit_entries();
        tracing::info!(
            "Graph built with {} error(s) and {} warning(s)",
            self.error_count(),
            self.warning_count()
        );
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_log_format() {
        let rewritten = Diagnostic::DependencyRewritten {
            unit: "a.b.f".to_string(),
            reference: "a.b.Model.predict".to_string(),
            resolved: "a.b.Model".to_string(),
        };
        assert_eq!(
            rewritten.to_string(),
            "a.b.f dependency a.b.Model.predict was matched to a.b.Model"
        );

        let violation = Diagnostic::LayerViolation {
            unit: "core.db.fetch_x".to_string(),
            dependency: "api.routes.get_x".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "Architecture Validation: core.db.fetch_x must not depend on api.routes.get_x"
        );
    }

    #[test]
    fn test_counts_by_level() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::UnresolvedReference {
            unit: "a.b.f".to_string(),
            reference: "x.y.z".to_string(),
        });
        diagnostics.push(Diagnostic::EmptySubmodule {
            submodule: "a.c".to_string(),
        });
        diagnostics.push(Diagnostic::LayerViolation {
            unit: "a.b.f".to_string(),
            dependency: "a.c.g".to_string(),
        });

        diagnostics.push(Diagnostic::ResolutionSummary { errors: 1 });

        assert_eq!(diagnostics.len(), 4);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn test_resolution_summary_is_informational() {
        let summary = Diagnostic::ResolutionSummary { errors: 2 };
        assert_eq!(summary.level(), DiagnosticLevel::Info);
        assert_eq!(
            summary.to_string(),
            "Dependency resolution completed with 2 error(s)"
        );
    }
}

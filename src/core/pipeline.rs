use crate::domain::diagnostics::{Diagnostic, Diagnostics};
use crate::domain::model::{ArchitectureGraph, LayerHierarchy, SourceDocuments};
use crate::domain::services::colors::{assign_submodule_colors, Palette};
use crate::domain::services::layers::{flatten_layers, unused_module_layers, AllowedDependencies};
use crate::domain::services::parser::parse_unit_descriptions;
use crate::domain::services::paths::validate_unit_paths;
use crate::domain::services::resolver::resolve_dependencies;
use crate::domain::services::submodules::{assign_submodule_dependencies, create_submodules};
use crate::domain::services::violations::check_with;
use crate::utils::error::{GraphError, Result};

pub use crate::app::pipelines::graph_pipeline::GraphPipeline;

/// The assembled graph plus every soft diagnostic collected on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub graph: ArchitectureGraph,
    pub diagnostics: Diagnostics,
}

/// Runs every stage from raw unit text to the finished graph.
///
/// Structural problems and unit path problems abort the run; unresolved
/// references and layer violations are only collected as diagnostics.
/// The result's `layers` is `layers` serialized back; use [`process_sources`]
/// to echo the document exactly as it was read.
pub fn process(
    unit_descriptions: &str,
    layers: &LayerHierarchy,
    palette: &Palette,
) -> Result<ProcessOutput> {
    let echo = serde_json::to_value(layers)?;
    build_graph(unit_descriptions, layers, echo, palette)
}

/// Same as [`process`], echoing `layers.json` verbatim (key order and extra fields).
pub fn process_sources(sources: &SourceDocuments, palette: &Palette) -> Result<ProcessOutput> {
    build_graph(
        &sources.unit_descriptions,
        &sources.layers,
        sources.layers_document.clone(),
        palette,
    )
}

fn build_graph(
    unit_descriptions: &str,
    layers: &LayerHierarchy,
    layers_echo: serde_json::Value,
    palette: &Palette,
) -> Result<ProcessOutput> {
    let mut diagnostics = Diagnostics::new();

    let parsed = parse_unit_descriptions(unit_descriptions)?;
    let all_submodules = flatten_layers(layers)?;
    diagnostics.extend(unused_module_layers(layers));
    tracing::debug!(
        "Parsed {} unit(s) across {} submodule(s)",
        parsed.units.len(),
        all_submodules.len()
    );

    let report = validate_unit_paths(&parsed.units, &all_submodules);
    if !report.is_valid() {
        // The error only carries a count in its message; log each problem here.
        diagnostics.extend(report.problems.iter().cloned().map(Diagnostic::from));
        diagnostics.emit_entries();
        return Err(GraphError::ValidationFailed {
            problems: report.problems,
        });
    }

    let skeleton = create_submodules(&all_submodules, &parsed.unit_order);
    diagnostics.extend(skeleton.diagnostics);
    let submodules = assign_submodule_colors(&skeleton.submodules, layers, palette);

    let resolution = resolve_dependencies(&parsed.units);
    diagnostics.extend(resolution.diagnostics().iter().cloned());
    diagnostics.push(resolution.summary());

    let allowed = AllowedDependencies::from_layers(layers);
    let checked = check_with(&resolution.units, &allowed);
    diagnostics.extend(checked.diagnostics());

    let submodules = assign_submodule_dependencies(&submodules, &checked.units);

    Ok(ProcessOutput {
        graph: ArchitectureGraph {
            layers: layers_echo,
            submodules,
            units: checked.units,
        },
        diagnostics,
    })
}

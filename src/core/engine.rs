use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct GraphEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GraphEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract → transform → load and returns where the graph was written.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Reading architecture inputs...");
        let sources = self.pipeline.extract().await?;
        tracing::info!(
            "Loaded {} root layer(s) and {} bytes of unit descriptions",
            sources.layers.root_layers.len(),
            sources.unit_descriptions.len()
        );

        tracing::info!("Building dependency graph...");
        let output = self.pipeline.transform(sources).await?;
        output.diagnostics.emit();
        tracing::info!(
            "Graph has {} submodule(s) and {} unit(s)",
            output.graph.submodules.len(),
            output.graph.units.len()
        );

        tracing::info!("Writing result...");
        let output_path = self.pipeline.load(output).await?;
        tracing::info!("Saved result to {}", output_path);

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::{process_sources, ProcessOutput};
    use crate::domain::model::SourceDocuments;
    use crate::domain::services::colors::Palette;
    use crate::utils::error::GraphError;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    struct StaticPipeline {
        units: String,
        loaded: Arc<Mutex<Option<ProcessOutput>>>,
    }

    #[async_trait::async_trait]
    impl Pipeline for StaticPipeline {
        async fn extract(&self) -> Result<SourceDocuments> {
            Ok(SourceDocuments::new(
                serde_json::json!({"root_layers": [["api"], ["core"]]}),
                self.units.clone(),
            )?)
        }

        async fn transform(&self, sources: SourceDocuments) -> Result<ProcessOutput> {
            process_sources(&sources, &Palette::default())
        }

        async fn load(&self, output: ProcessOutput) -> Result<String> {
            *self.loaded.lock().await = Some(output);
            Ok("memory://result.json".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_passes_graph_to_load() {
        let loaded = Arc::new(Mutex::new(None));
        let engine = GraphEngine::new(StaticPipeline {
            units: "### api.get\n\nUses `@core.fetch`.\n\n### core.fetch\n\nLeaf.".to_string(),
            loaded: loaded.clone(),
        });

        let path = engine.run().await.unwrap();
        assert_eq!(path, "memory://result.json");

        let output = loaded.lock().await.take().unwrap();
        assert_eq!(
            output.graph.submodules.get("api").unwrap().dependencies.get("core"),
            Some(&true)
        );
    }

    #[tokio::test]
    async fn test_run_stops_before_load_on_structural_error() {
        let loaded = Arc::new(Mutex::new(None));
        let engine = GraphEngine::new(StaticPipeline {
            units: "### api.get\n\n### api.get\n".to_string(),
            loaded: loaded.clone(),
        });

        let err = engine.run().await.unwrap_err();
        assert!(matches!(err, GraphError::DuplicateUnit { .. }));
        assert!(loaded.lock().await.is_none());
    }
}

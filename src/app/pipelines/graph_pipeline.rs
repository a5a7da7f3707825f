use crate::core::pipeline::{process_sources, ProcessOutput};
use crate::core::{ConfigProvider, Pipeline, SourceDocuments, Storage};
use crate::utils::error::{GraphError, Result};

/// Reads `layers.json` + `units.md` from storage and writes `result.json` back.
pub struct GraphPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> GraphPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn render(&self, output: &ProcessOutput) -> Result<Vec<u8>> {
        let mut json = if self.config.pretty_output() {
            serde_json::to_vec_pretty(&output.graph)?
        } else {
            serde_json::to_vec(&output.graph)?
        };
        json.push(b'\n');
        Ok(json)
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GraphPipeline<S, C> {
    async fn extract(&self) -> Result<SourceDocuments> {
        let layers_path = self.config.layers_path();
        let units_path = self.config.units_path();

        tracing::debug!("Reading layer hierarchy from: {}", layers_path);
        let raw_layers = self.storage.read_file(layers_path).await?;
        let invalid_layers = |e: serde_json::Error| GraphError::InvalidInput {
            source_name: layers_path.to_string(),
            message: e.to_string(),
        };
        let layers_document: serde_json::Value =
            serde_json::from_slice(&raw_layers).map_err(invalid_layers)?;

        tracing::debug!("Reading unit descriptions from: {}", units_path);
        let raw_units = self.storage.read_file(units_path).await?;
        let unit_descriptions =
            String::from_utf8(raw_units).map_err(|e| GraphError::InvalidInput {
                source_name: units_path.to_string(),
                message: e.to_string(),
            })?;

        SourceDocuments::new(layers_document, unit_descriptions).map_err(invalid_layers)
    }

    async fn transform(&self, sources: SourceDocuments) -> Result<ProcessOutput> {
        process_sources(&sources, &self.config.palette())
    }

    async fn load(&self, output: ProcessOutput) -> Result<String> {
        let output_path = self.config.output_path();
        let data = self.render(&output)?;

        tracing::debug!("Writing {} bytes to storage", data.len());
        self.storage.write_file(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}

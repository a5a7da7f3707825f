use crate::core::pipeline::ProcessOutput;
use crate::domain::model::SourceDocuments;
use crate::domain::services::colors::Palette;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn layers_path(&self) -> &str;
    fn units_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn pretty_output(&self) -> bool;
    fn palette(&self) -> Palette;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceDocuments>;
    async fn transform(&self, sources: SourceDocuments) -> Result<ProcessOutput>;
    async fn load(&self, output: ProcessOutput) -> Result<String>;
}

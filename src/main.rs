use clap::Parser;
use layergraph::config::LogFormat;
use layergraph::utils::error::GraphError;
use layergraph::utils::{logger, validation::Validate};
use layergraph::{CliConfig, GraphEngine, GraphPipeline, LocalStorage};

fn fail(e: &GraphError) -> ! {
    tracing::error!(
        "❌ layergraph failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting layergraph");
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => fail(&e),
    };
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }
    tracing::debug!("Resolved settings: {:?}", settings);

    let storage = LocalStorage::new(".");
    let pipeline = GraphPipeline::new(storage, settings);
    let engine = GraphEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Graph written to {}", output_path);
        }
        Err(e) => fail(&e),
    }
}

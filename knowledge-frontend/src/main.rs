use dotenvy::dotenv;
use knowledge_frontend::config::get_configuration;
use knowledge_frontend::startup::Application;
use service_core::observability::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "knowledge-frontend",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    );

    knowledge_frontend::services::metrics::init_metrics();

    let app = Application::build(configuration).await?;

    info!("Starting knowledge-frontend on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}

use contact_form::{
    error::ContactFormError,
    settings::Settings,
    telemetry::{get_tracing_subscriber, init_tracing_subscriber},
};
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> Result<(), ContactFormError> {
    let tracing_subscriber =
        get_tracing_subscriber("contact_form", LevelFilter::INFO, std::io::stdout);
    init_tracing_subscriber(tracing_subscriber);

    let settings = Settings::get_settings()?;
    let server = settings.build_server().await?;

    tracing::info!(port = server.port()?, "Starting Server");
    server.run().await?;

    Ok(())
}

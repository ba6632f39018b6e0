use missive::configuration::get_configuration;
use missive::startup::build;
use missive::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("missive".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = get_configuration()?;
    let app = build(config)?;
    tracing::info!(port = app.port(), "Listening for contact submissions");
    app.run().await?;

    Ok(())
}

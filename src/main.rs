use contact_relay::configuration::Settings;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("contact_relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get().expect("Failed to read configuration.");
    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}

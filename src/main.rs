use helpdesk::{configuration::get_configuration, startup::run, telemetry::init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration()?;
    let _guard = init(&configuration.logger);
    run(configuration).await
}

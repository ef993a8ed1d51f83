use shiftboard::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting shift planning board");

    // Load configuration
    let config = startup::load_config()?;

    // Start the web server
    startup::start_server(config).await
}

use museo_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load .env before reading any configuration
    dotenv::dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Set up environment (working directories, logging)
    setup_environment(&config)?;

    print_banner();

    tracing::info!("Museo server starting...");

    // 4. Initialize server state (database, schema, admin seed, JWT)
    let state = ServerState::initialize(&config).await?;

    // 5. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

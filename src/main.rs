//! Bootstrap binary: prepares the local database and seed data.

use dotenvy::dotenv;
use stallbook::config::{database, seed};
use stallbook::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = seed::load_default_config()
        .inspect_err(|e| error!("Failed to load stallbook.toml: {e}"))?;
    info!(owner = %app_config.owner_id, "loaded application configuration");

    // 4. Connect and make sure the schema exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("database connection established"))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Seed configured markets and vendors
    seed::seed_from_config(&db, &app_config)
        .await
        .inspect(|()| info!("seed data is in place"))
        .inspect_err(|e| error!("Failed to seed markets/vendors: {e}"))?;

    info!(
        storage_root = %app_config.storage_root,
        "stallbook workspace is ready"
    );
    Ok(())
}

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use migration::{Migrator, MigratorTrait};

mod settings;

/// Small-business finance tracker service.
#[derive(Debug, Parser)]
#[command(name = "ledgerly", version, about)]
struct Cli {
    /// Path of the settings file.
    #[arg(long, env = "LEDGERLY_CONFIG", default_value = "settings.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = settings::Settings::new(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledgerly={level},server={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let db = connect(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let addr: SocketAddr = format!("{}:{}", settings.server.bind, settings.server.port).parse()?;
    server::run(engine, addr).await?;

    Ok(())
}

async fn connect(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}

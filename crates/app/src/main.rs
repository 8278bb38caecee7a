use engine::{Engine, JsonFileStorage, MemoryStorage};
use settings::Storage;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "budget_tracker={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let timezone = settings.timezone()?;
    tracing::info!("bucketing transactions in timezone {timezone}");

    let builder = Engine::builder()
        .timezone(timezone)
        .seed_demo(settings.app.seed_demo);
    let builder = match &settings.server.storage {
        Storage::Memory => {
            tracing::info!("using in-memory storage, data will not survive a restart");
            builder.storage(MemoryStorage::new())
        }
        Storage::Json(path) => {
            tracing::info!("using JSON storage at {}", path.display());
            builder.storage(JsonFileStorage::new(path.clone()))
        }
    };
    let engine = builder.build()?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

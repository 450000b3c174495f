use chip_tracker::AppResources;
use chip_tracker::alarms::alarm_loop;
use chip_tracker::api::start_webserver;
use chip_tracker::config::load_config_or_panic;
use chip_tracker::store::ChipStore;
use sea_orm::Database;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_tracing() {
    let default_directives = "chip_tracker=info,sea_orm=info";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let layer = fmt::layer().with_target(true).with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .init();
}

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    initialize_tracing();

    let config = Arc::new(load_config_or_panic());

    let store = match config.database_url.as_deref() {
        Some(url) => ChipStore::new(Arc::new(Database::connect(url).await?)),
        None => {
            tracing::warn!(
                name = "startup.storage.unavailable",
                target = concat!(env!("CARGO_PKG_NAME"), "::", module_path!()),
                message = "No database_url configured, running without storage"
            );
            ChipStore::unavailable()
        }
    };

    if config.alarms.enabled && store.is_available() {
        tokio::spawn(alarm_loop(store.clone(), config.alarms.clone()));
    }

    let resources = AppResources { store, config };
    start_webserver(resources).await?;
    Ok(())
}

use chrono::Utc;
use color_eyre::eyre::Result;
use dotenv::dotenv;
use lessonsync_api::config::ApiConfig;
use lessonsync_calendar::feed::GoogleCalendarFeed;
use lessonsync_calendar::sync::SyncEngine;
use lessonsync_core::studio::studio_offset;
use lessonsync_db::store::PgStore;
use lessonsync_db::{create_pool, schema::initialize_database};
use tracing_subscriber::FmtSubscriber;

/// Runs a single calendar reconciliation pass and exits. Meant for cron.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    let store = PgStore::new(db_pool);
    let feed = GoogleCalendarFeed::new(
        config.calendar_api_key.clone(),
        config.calendar_id.clone(),
    );
    let offset = studio_offset(config.studio_utc_offset_hours)?;

    let outcome = SyncEngine::new(&feed, &store, offset).run(Utc::now()).await?;

    println!(
        "Sync finished: {} upserted, {} deleted",
        outcome.upserted, outcome.deleted
    );
    if let Some(error) = outcome.last_error {
        println!("Some rows failed; last error: {error}");
    }

    Ok(())
}

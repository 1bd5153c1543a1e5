use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use lessonsync_api::config::ApiConfig;
use lessonsync_api::ApiState;
use lessonsync_calendar::feed::GoogleCalendarFeed;
use lessonsync_core::studio::studio_offset;
use lessonsync_db::store::PgStore;
use lessonsync_db::{create_pool, schema::initialize_database};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Wire up the store, the calendar feed, and the studio locale
    let state = Arc::new(ApiState {
        store: Arc::new(PgStore::new(db_pool)),
        feed: Arc::new(GoogleCalendarFeed::new(
            config.calendar_api_key.clone(),
            config.calendar_id.clone(),
        )),
        studio_offset: studio_offset(config.studio_utc_offset_hours)?,
    });

    // Start API server
    lessonsync_api::start_server(config, state).await?;

    Ok(())
}

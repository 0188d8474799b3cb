mod reminder;
mod shared;

pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, SqliteReminderRepo};
pub use shared::feed::ReminderSubscription;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{str::FromStr, sync::Arc};
use tracing::{info, warn};

/// Every connection to an in memory sqlite database opens its own empty
/// database, so the pool has to stay at a single connection
fn pool_size(connection_string: &str, max_connections: u32) -> u32 {
    let in_memory =
        connection_string.contains(":memory:") || connection_string.contains("mode=memory");
    if in_memory && max_connections > 1 {
        warn!(
            "In memory database: {} can not be shared between {} connections, using 1",
            connection_string, max_connections
        );
        return 1;
    }
    max_connections.max(1)
}

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
}

impl Repos {
    pub async fn create_sqlite(
        connection_string: &str,
        max_connections: u32,
    ) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(connection_string)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size(connection_string, max_connections))
            // An in memory database only lives as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let reminders = SqliteReminderRepo::new(pool);
        info!("DB MIGRATING ...");
        reminders.migrate().await?;
        info!("DB MIGRATING ... [done]");

        Ok(Self {
            reminders: Arc::new(reminders),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
        }
    }
}

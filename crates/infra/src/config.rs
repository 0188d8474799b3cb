use tracing::{info, warn};

/// Connection string that selects the in memory repositories
pub const INMEMORY_DATABASE_URL: &str = "inmemory";

#[derive(Debug, Clone)]
pub struct Config {
    /// Sqlite connection string for the reminders database, or `inmemory`
    pub database_url: String,
    /// Size of the sqlite connection pool
    pub database_max_connections: u32,
    /// Register alarms again for all future reminders when the application starts.
    /// Alarms that were pending when the previous process died are lost otherwise.
    pub reschedule_on_startup: bool,
    /// Id of the channel notifications are posted to
    pub notification_channel: String,
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T
where
    T: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let url = "sqlite://reminders.db".to_string();
                info!(
                    "Did not find DATABASE_URL environment variable. Going to use: {}",
                    url
                );
                url
            }
        };

        Self {
            database_url,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 1),
            reschedule_on_startup: parse_env("RESCHEDULE_ON_STARTUP", true),
            notification_channel: std::env::var("NOTIFICATION_CHANNEL")
                .unwrap_or_else(|_| "reminder_channel".into()),
        }
    }

    pub fn inmemory() -> Self {
        Self {
            database_url: INMEMORY_DATABASE_URL.into(),
            database_max_connections: 1,
            reschedule_on_startup: true,
            notification_channel: "reminder_channel".into(),
        }
    }

    pub fn uses_inmemory_database(&self) -> bool {
        self.database_url == INMEMORY_DATABASE_URL
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

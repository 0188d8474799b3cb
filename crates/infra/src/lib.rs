mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
use nettu_reminders_domain::NotificationChannel;
pub use repos::{IReminderRepo, ReminderSubscription, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{FixedSys, ISys, RealSys};

#[derive(Clone)]
pub struct ReminderContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub alarms: Arc<dyn IAlarmService>,
    pub notifications: Arc<dyn INotificationSurface>,
}

impl ReminderContext {
    pub fn new(
        repos: Repos,
        config: Config,
        sys: Arc<dyn ISys>,
        alarms: Arc<dyn IAlarmService>,
        notifications: Arc<dyn INotificationSurface>,
    ) -> Self {
        Self {
            repos,
            config,
            sys,
            alarms,
            notifications,
        }
    }

    async fn create(config: Config) -> anyhow::Result<Self> {
        let repos = if config.uses_inmemory_database() {
            Repos::create_inmemory()
        } else {
            Repos::create_sqlite(&config.database_url, config.database_max_connections).await?
        };
        let sys: Arc<dyn ISys> = Arc::new(RealSys {});
        let notifications = LogNotificationSurface::new(NotificationChannel::reminders(
            &config.notification_channel,
        ));

        Ok(Self {
            repos,
            alarms: Arc::new(TokioAlarmService::new(sys.clone())),
            notifications: Arc::new(notifications),
            sys,
            config,
        })
    }

    /// Context where nothing leaves the process and time does not move
    pub fn create_inmemory() -> Self {
        Self::new(
            Repos::create_inmemory(),
            Config::inmemory(),
            Arc::new(FixedSys::new(0)),
            Arc::new(InMemoryAlarmService::new()),
            Arc::new(InMemoryNotificationSurface::new()),
        )
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<ReminderContext> {
    ReminderContext::create(Config::new()).await
}

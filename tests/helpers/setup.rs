use nettu_reminders_api::Application;
use nettu_reminders_infra::{
    Config, FixedSys, IAlarmService, InMemoryAlarmService, InMemoryNotificationSurface,
    ReminderContext, Repos, TokioAlarmService,
};
use std::sync::Arc;

pub struct TestApp {
    pub app: Application,
    pub sys: Arc<FixedSys>,
    pub notifications: Arc<InMemoryNotificationSurface>,
}

/// Application where alarms only fire when the test says so
pub struct ManualTestApp {
    pub app: Application,
    pub alarms: Arc<InMemoryAlarmService>,
    pub notifications: Arc<InMemoryNotificationSurface>,
}

pub async fn spawn_app() -> ManualTestApp {
    let alarms = Arc::new(InMemoryAlarmService::new());
    let notifications = Arc::new(InMemoryNotificationSurface::new());
    let ctx = ReminderContext::new(
        Repos::create_inmemory(),
        Config::inmemory(),
        Arc::new(FixedSys::new(0)),
        alarms.clone(),
        notifications.clone(),
    );
    let app = Application::new(ctx).await;

    ManualTestApp {
        app,
        alarms,
        notifications,
    }
}

/// Application with real timers, meant to be used with a paused tokio clock
pub async fn spawn_timer_app() -> TestApp {
    let sys = Arc::new(FixedSys::new(0));
    let notifications = Arc::new(InMemoryNotificationSurface::new());
    let alarms: Arc<dyn IAlarmService> = Arc::new(TokioAlarmService::new(sys.clone()));
    let ctx = ReminderContext::new(
        Repos::create_inmemory(),
        Config::inmemory(),
        sys.clone(),
        alarms,
        notifications.clone(),
    );
    let app = Application::new(ctx).await;

    TestApp {
        app,
        sys,
        notifications,
    }
}

/// Application on top of an existing store, as after a process restart
pub async fn restart_app(repos: Repos, now: i64) -> ManualTestApp {
    let alarms = Arc::new(InMemoryAlarmService::new());
    let notifications = Arc::new(InMemoryNotificationSurface::new());
    let ctx = ReminderContext::new(
        repos,
        Config::inmemory(),
        Arc::new(FixedSys::new(now)),
        alarms.clone(),
        notifications.clone(),
    );
    let app = Application::new(ctx).await;

    ManualTestApp {
        app,
        alarms,
        notifications,
    }
}

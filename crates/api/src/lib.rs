mod error;
mod reminder;
mod shared;

pub use error::ReminderError;
use nettu_reminders_infra::ReminderContext;
pub use reminder::Reminders;
use reminder::{
    dispatch_notification::NotificationDispatcher,
    sync_reminder_alarms::{SyncReminderAlarmsTrigger, SyncReminderAlarmsUseCase},
};
use shared::usecase::execute;
use std::sync::Arc;
use tracing::warn;

pub struct Application {
    context: ReminderContext,
    reminders: Reminders,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Self {
        Application::start_notification_dispatcher(&context);
        if context.config.reschedule_on_startup {
            Application::reschedule_stored_reminders(&context).await;
        }

        Self {
            reminders: Reminders::new(context.clone()),
            context,
        }
    }

    pub fn reminders(&self) -> &Reminders {
        &self.reminders
    }

    pub fn context(&self) -> &ReminderContext {
        &self.context
    }

    fn start_notification_dispatcher(context: &ReminderContext) {
        let dispatcher = NotificationDispatcher::new(context);
        context.alarms.register_receiver(Arc::new(dispatcher));
    }

    async fn reschedule_stored_reminders(context: &ReminderContext) {
        let usecase = SyncReminderAlarmsUseCase {
            request: SyncReminderAlarmsTrigger::Startup,
        };
        if execute(usecase, context).await.is_err() {
            warn!("Stored reminders were not rescheduled, they stay silent until updated");
        }
    }
}

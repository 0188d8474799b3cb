use nettu_reminders_domain::{AlarmPayload, Notification, ReminderNotification};
use nettu_reminders_infra::{IAlarmReceiver, INotificationSurface, ReminderContext};
use std::sync::Arc;
use tracing::info;

/// Turns fired alarms into user visible notifications.
///
/// Runs on whatever task the alarm service delivers on and knows nothing
/// about the caller that scheduled the alarm. The notification is keyed by
/// the reminder id so a redelivered alarm replaces the visible notification.
pub struct NotificationDispatcher {
    notifications: Arc<dyn INotificationSurface>,
}

impl NotificationDispatcher {
    pub fn new(ctx: &ReminderContext) -> Self {
        Self {
            notifications: ctx.notifications.clone(),
        }
    }

    pub fn dispatch(&self, payload: &AlarmPayload) {
        let reminder = ReminderNotification::from_payload(payload);
        info!("Showing notification for reminder: {}", reminder.reminder_id);
        self.notifications.show(Notification::from(reminder));
    }
}

#[async_trait::async_trait]
impl IAlarmReceiver for NotificationDispatcher {
    async fn on_receive(&self, payload: AlarmPayload) {
        self.dispatch(&payload);
    }
}

use super::INotificationSurface;
use nettu_reminders_domain::{Notification, NotificationChannel};
use tracing::info;

/// Notification surface for headless hosts, alerts are written to the log
pub struct LogNotificationSurface {
    channel: NotificationChannel,
}

impl LogNotificationSurface {
    pub fn new(channel: NotificationChannel) -> Self {
        info!(
            "Created notification channel: {} ({:?} importance)",
            channel.id, channel.importance
        );
        Self { channel }
    }

    pub fn channel(&self) -> &NotificationChannel {
        &self.channel
    }
}

impl INotificationSurface for LogNotificationSurface {
    fn show(&self, notification: Notification) {
        info!(
            channel = %self.channel.id,
            slot = %notification.slot,
            "{}: {}",
            notification.title,
            notification.body
        );
    }
}

mod inmemory;
mod logger;

pub use logger::LogNotificationSurface;
pub use inmemory::InMemoryNotificationSurface;

use nettu_reminders_domain::Notification;

/// Renders user visible alerts. There is no feedback to the caller
/// on whether the alert was actually shown.
pub trait INotificationSurface: Send + Sync {
    fn show(&self, notification: Notification);
}

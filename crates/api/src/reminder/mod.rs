mod add_reminder;
mod delete_reminder;
pub mod dispatch_notification;
mod get_reminders;
mod lifecycle;
pub mod scheduler;
pub mod sync_reminder_alarms;
mod update_reminder;

pub use lifecycle::Reminders;

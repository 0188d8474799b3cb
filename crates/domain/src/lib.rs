mod alarm;
mod notification;
mod reminder;
mod shared;

pub use alarm::{AlarmPayload, AlarmRequest};
pub use notification::{
    Notification, NotificationChannel, NotificationImportance, ReminderNotification,
    DEFAULT_NOTIFICATION_TITLE, REMINDER_DESCRIPTION_KEY, REMINDER_ID_KEY, REMINDER_TITLE_KEY,
};
pub use reminder::{NewReminder, Reminder};
pub use shared::entity::{Entity, ID};

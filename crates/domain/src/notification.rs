use crate::{alarm::AlarmPayload, reminder::Reminder, shared::entity::ID};
use serde::{Deserialize, Serialize};

pub const REMINDER_ID_KEY: &str = "reminder_id";
pub const REMINDER_TITLE_KEY: &str = "reminder_title";
pub const REMINDER_DESCRIPTION_KEY: &str = "reminder_description";

/// Title shown when a delivered payload does not carry one
pub const DEFAULT_NOTIFICATION_TITLE: &str = "Reminder";

/// The content of a `Reminder` that is carried through the alarm service
/// and shown to the user when the alarm fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderNotification {
    pub reminder_id: ID,
    pub title: String,
    pub description: String,
}

impl ReminderNotification {
    pub fn new(reminder_id: ID, title: &str, description: &str) -> Self {
        Self {
            reminder_id,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn into_payload(self) -> AlarmPayload {
        let mut payload = AlarmPayload::new();
        payload.put_int(REMINDER_ID_KEY, self.reminder_id.inner());
        payload.put_str(REMINDER_TITLE_KEY, &self.title);
        payload.put_str(REMINDER_DESCRIPTION_KEY, &self.description);
        payload
    }

    /// Never fails. Missing or malformed fields fall back to id `0`,
    /// the default title and an empty description.
    pub fn from_payload(payload: &AlarmPayload) -> Self {
        Self {
            reminder_id: ID::new(payload.get_int(REMINDER_ID_KEY).unwrap_or(0)),
            title: payload
                .get_str(REMINDER_TITLE_KEY)
                .unwrap_or(DEFAULT_NOTIFICATION_TITLE)
                .to_string(),
            description: payload
                .get_str(REMINDER_DESCRIPTION_KEY)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

impl From<&Reminder> for ReminderNotification {
    fn from(reminder: &Reminder) -> Self {
        Self::new(reminder.id, &reminder.title, &reminder.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationImportance {
    Default,
    High,
}

/// Channel that reminder notifications are posted to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: NotificationImportance,
    pub vibrate: bool,
    pub sound: bool,
}

impl NotificationChannel {
    pub fn reminders(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: "Reminder Notifications".into(),
            description: "Notifications for reminders".into(),
            importance: NotificationImportance::High,
            vibrate: true,
            sound: true,
        }
    }
}

/// A user visible alert. Showing a `Notification` with the same `slot`
/// as a visible one replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub slot: ID,
    pub title: String,
    pub body: String,
    /// Dismiss the notification once the user taps it
    pub auto_cancel: bool,
}

impl From<ReminderNotification> for Notification {
    fn from(n: ReminderNotification) -> Self {
        Self {
            slot: n.reminder_id,
            title: n.title,
            body: n.description,
            auto_cancel: true,
        }
    }
}

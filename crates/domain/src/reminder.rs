use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A `Reminder` is a user defined message that should be shown to the
/// user as a notification at `fire_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: ID,
    pub title: String,
    pub description: String,
    /// Timestamp in millis at which the notification should be produced
    pub fire_time: i64,
    /// Persisted for schema compatibility only. Nothing reads or sets it.
    pub is_completed: bool,
}

impl Reminder {
    pub fn is_due(&self, now_millis: i64) -> bool {
        self.fire_time <= now_millis
    }

    pub fn fire_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.fire_time).single()
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id
    }
}

/// A `Reminder` that has not been stored yet and therefore has no `ID`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub fire_time: i64,
}

impl NewReminder {
    pub fn new<T: Into<String>, D: Into<String>>(title: T, description: D, fire_time: i64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            fire_time,
        }
    }

    pub fn into_reminder(self, id: ID) -> Reminder {
        Reminder {
            id,
            title: self.title,
            description: self.description,
            fire_time: self.fire_time,
            is_completed: false,
        }
    }
}

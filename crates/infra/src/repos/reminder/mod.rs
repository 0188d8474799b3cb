mod inmemory;
mod sqlite;

pub use inmemory::InMemoryReminderRepo;
pub use sqlite::SqliteReminderRepo;

use crate::repos::shared::feed::ReminderSubscription;
use nettu_reminders_domain::{NewReminder, Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the `NewReminder` and returns the freshly assigned `ID`
    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<ID>;
    /// Replaces the stored row with the same id and returns whether there was one.
    /// Unknown ids are ignored.
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool>;
    async fn find(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>>;
    /// All reminders ordered by `fire_time` ascending
    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>>;
    /// Removes the row if it exists and returns it
    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>>;
    /// Live version of `find_all`
    async fn subscribe(&self) -> anyhow::Result<ReminderSubscription>;
}

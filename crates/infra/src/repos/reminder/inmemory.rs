use super::IReminderRepo;
use crate::repos::shared::{
    feed::{sort_by_fire_time, ReminderFeed, ReminderSubscription},
    inmemory_repo::*,
};
use nettu_reminders_domain::{NewReminder, Reminder, ID};
use std::sync::{
    atomic::{AtomicI64, Ordering},
    Mutex, MutexGuard,
};

pub struct InMemoryReminderRepo {
    reminders: Mutex<Vec<Reminder>>,
    last_id: AtomicI64,
    feed: ReminderFeed,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: Mutex::new(Vec::new()),
            last_id: AtomicI64::new(0),
            feed: ReminderFeed::new(),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot(reminders: &MutexGuard<Vec<Reminder>>) -> Vec<Reminder> {
    let mut snapshot = find_by(reminders, |_| true);
    sort_by_fire_time(&mut snapshot);
    snapshot
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<ID> {
        let mut reminders = self.reminders.lock().unwrap();
        let id = ID::new(self.last_id.fetch_add(1, Ordering::SeqCst) + 1);
        insert(&reminder.clone().into_reminder(id), &mut reminders);
        self.feed.publish(snapshot(&reminders));
        Ok(id)
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let mut reminders = self.reminders.lock().unwrap();
        let saved = save(reminder, &mut reminders);
        if saved {
            self.feed.publish(snapshot(&reminders));
        }
        Ok(saved)
    }

    async fn find(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let reminders = self.reminders.lock().unwrap();
        Ok(find(reminder_id, &reminders))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        let reminders = self.reminders.lock().unwrap();
        Ok(snapshot(&reminders))
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let mut reminders = self.reminders.lock().unwrap();
        let deleted = delete(reminder_id, &mut reminders);
        if deleted.is_some() {
            self.feed.publish(snapshot(&reminders));
        }
        Ok(deleted)
    }

    async fn subscribe(&self) -> anyhow::Result<ReminderSubscription> {
        let reminders = self.reminders.lock().unwrap();
        Ok(self.feed.subscribe(snapshot(&reminders)))
    }
}

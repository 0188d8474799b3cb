use futures::Stream;
use nettu_reminders_domain::Reminder;
use std::{
    pin::Pin,
    sync::Mutex,
    task::{Context, Poll},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Fans out a fresh snapshot of all `Reminder`s to every subscriber after each
/// mutation. Repositories call `publish` while still holding their write
/// lock so that subscribers observe the snapshots in mutation order.
pub struct ReminderFeed {
    subscribers: Mutex<Vec<UnboundedSender<Vec<Reminder>>>>,
}

impl ReminderFeed {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// `snapshot` is the current state and is the first item the subscription yields
    pub fn subscribe(&self, snapshot: Vec<Reminder>) -> ReminderSubscription {
        let (sender, receiver) = unbounded_channel();
        // Cannot fail, the receiver is alive
        let _ = sender.send(snapshot);
        self.subscribers.lock().unwrap().push(sender);
        ReminderSubscription { receiver }
    }

    pub fn publish(&self, snapshot: Vec<Reminder>) {
        let mut subscribers = self.subscribers.lock().unwrap();
        // Closed subscriptions are dropped here
        subscribers.retain(|s| s.send(snapshot.clone()).is_ok());
    }

    /// Ends every open subscription. Subscribers see the end of the stream
    /// and have to subscribe again to get a fresh snapshot.
    pub fn close(&self) {
        self.subscribers.lock().unwrap().clear();
    }

    pub fn has_subscribers(&self) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap();
        subscribers.retain(|s| !s.is_closed());
        !subscribers.is_empty()
    }
}

impl Default for ReminderFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Live, `fire_time` ordered view of all `Reminder`s.
///
/// Yields the snapshot taken at subscription time and then one snapshot per
/// completed mutation. Dropping the subscription unsubscribes.
#[derive(Debug)]
pub struct ReminderSubscription {
    receiver: UnboundedReceiver<Vec<Reminder>>,
}

impl ReminderSubscription {
    /// Waits for the next snapshot. `None` once the store is gone or could
    /// not produce a snapshot after a mutation.
    pub async fn next(&mut self) -> Option<Vec<Reminder>> {
        self.receiver.recv().await
    }

    /// Next snapshot if one is already queued
    pub fn try_next(&mut self) -> Option<Vec<Reminder>> {
        self.receiver.try_recv().ok()
    }

    /// Skips queued snapshots and returns the most recent one, if any
    pub fn latest(&mut self) -> Option<Vec<Reminder>> {
        let mut latest = None;
        while let Ok(snapshot) = self.receiver.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }

    pub fn unsubscribe(self) {}
}

impl Stream for ReminderSubscription {
    type Item = Vec<Reminder>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

pub fn sort_by_fire_time(reminders: &mut Vec<Reminder>) {
    reminders.sort_by_key(|r| (r.fire_time, r.id));
}

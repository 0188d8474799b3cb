use super::INotificationSurface;
use nettu_reminders_domain::{Notification, ID};
use std::sync::Mutex;

/// Keeps every shown `Notification` around so that tests can inspect them
#[derive(Default)]
pub struct InMemoryNotificationSurface {
    shown: Mutex<Vec<Notification>>,
}

impl InMemoryNotificationSurface {
    pub fn new() -> Self {
        Default::default()
    }

    /// Every `show` call in call order
    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }

    /// What the user currently sees, one notification per slot ordered by slot.
    /// A later notification for a slot replaces the earlier one.
    pub fn visible(&self) -> Vec<Notification> {
        let shown = self.shown.lock().unwrap();
        let mut visible: Vec<Notification> = Vec::new();
        for notification in shown.iter() {
            match visible.iter_mut().find(|n| n.slot == notification.slot) {
                Some(existing) => *existing = notification.clone(),
                None => visible.push(notification.clone()),
            }
        }
        visible.sort_by_key(|n| n.slot);
        visible
    }

    pub fn find_visible(&self, slot: ID) -> Option<Notification> {
        self.visible().into_iter().find(|n| n.slot == slot)
    }
}

impl INotificationSurface for InMemoryNotificationSurface {
    fn show(&self, notification: Notification) {
        self.shown.lock().unwrap().push(notification);
    }
}

use nettu_reminders_domain::{Entity, ID};
use std::sync::MutexGuard;

/// Useful functions for creating inmemory repositories.
/// They operate on an already locked collection so that callers can
/// publish a snapshot before releasing the lock.

pub fn insert<T: Clone>(val: &T, collection: &mut MutexGuard<Vec<T>>) {
    collection.push(val.clone());
}

/// Replaces the item with the same id, returns false if there is none
pub fn save<T: Clone + Entity>(val: &T, collection: &mut MutexGuard<Vec<T>>) -> bool {
    match collection.iter_mut().find(|item| item.id() == val.id()) {
        Some(item) => {
            *item = val.clone();
            true
        }
        None => false,
    }
}

pub fn find<T: Clone + Entity>(val_id: ID, collection: &MutexGuard<Vec<T>>) -> Option<T> {
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(
    collection: &MutexGuard<Vec<T>>,
    mut compare: F,
) -> Vec<T> {
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn delete<T: Clone + Entity>(val_id: ID, collection: &mut MutexGuard<Vec<T>>) -> Option<T> {
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

use super::{IAlarmReceiver, IAlarmService, Receivers};
use nettu_reminders_domain::{AlarmRequest, ID};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

/// Alarm service without timers. Pending requests are only recorded and
/// are delivered when `fire_due` is called, which makes it useful for testing.
#[derive(Default)]
pub struct InMemoryAlarmService {
    alarms: Mutex<HashMap<ID, AlarmRequest>>,
    receivers: Receivers,
    deny_requests: AtomicBool,
}

impl InMemoryAlarmService {
    pub fn new() -> Self {
        Default::default()
    }

    /// Simulates a platform that refuses to register alarms,
    /// e.g. because the permission was revoked
    pub fn set_deny_requests(&self, deny: bool) {
        self.deny_requests.store(deny, Ordering::SeqCst);
    }

    pub fn find(&self, alarm_id: ID) -> Option<AlarmRequest> {
        self.alarms.lock().unwrap().get(&alarm_id).cloned()
    }

    /// Delivers every alarm with `fire_at <= now` in `fire_at` order
    /// and returns how many fired
    pub async fn fire_due(&self, now: i64) -> usize {
        let due = {
            let mut alarms = self.alarms.lock().unwrap();
            let mut due_ids = alarms
                .values()
                .filter(|a| a.fire_at <= now)
                .map(|a| (a.fire_at, a.id))
                .collect::<Vec<_>>();
            due_ids.sort();
            due_ids
                .into_iter()
                .filter_map(|(_, id)| alarms.remove(&id))
                .collect::<Vec<_>>()
        };

        let fired = due.len();
        for request in due {
            self.receivers.deliver(request.payload).await;
        }
        fired
    }
}

#[async_trait::async_trait]
impl IAlarmService for InMemoryAlarmService {
    async fn set(&self, request: AlarmRequest) -> anyhow::Result<()> {
        if self.deny_requests.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!(
                "Not permitted to schedule alarm: {}",
                request.id
            ));
        }
        self.alarms.lock().unwrap().insert(request.id, request);
        Ok(())
    }

    async fn cancel(&self, alarm_id: ID) -> anyhow::Result<()> {
        self.alarms.lock().unwrap().remove(&alarm_id);
        Ok(())
    }

    async fn pending(&self) -> Vec<AlarmRequest> {
        let mut pending = self
            .alarms
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect::<Vec<_>>();
        pending.sort_by_key(|a| (a.fire_at, a.id));
        pending
    }

    fn register_receiver(&self, receiver: Arc<dyn IAlarmReceiver>) {
        self.receivers.register(receiver);
    }
}

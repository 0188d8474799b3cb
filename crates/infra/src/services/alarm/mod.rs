mod inmemory;
mod timer;

pub use inmemory::InMemoryAlarmService;
pub use timer::TokioAlarmService;

use nettu_reminders_domain::{AlarmPayload, AlarmRequest, ID};
use std::sync::{Arc, RwLock};

/// Handler that is invoked with the payload of a fired alarm. It runs without
/// any context of the caller that set the alarm.
#[async_trait::async_trait]
pub trait IAlarmReceiver: Send + Sync {
    async fn on_receive(&self, payload: AlarmPayload);
}

/// Deferred execution service. Alarms are keyed by their `ID`, setting an
/// alarm replaces any pending alarm with the same `ID`.
#[async_trait::async_trait]
pub trait IAlarmService: Send + Sync {
    async fn set(&self, request: AlarmRequest) -> anyhow::Result<()>;
    /// No-op if there is no pending alarm for `alarm_id`
    async fn cancel(&self, alarm_id: ID) -> anyhow::Result<()>;
    /// Alarms that have not fired yet, ordered by `fire_at`
    async fn pending(&self) -> Vec<AlarmRequest>;
    fn register_receiver(&self, receiver: Arc<dyn IAlarmReceiver>);
}

#[derive(Default, Clone)]
struct Receivers(Arc<RwLock<Vec<Arc<dyn IAlarmReceiver>>>>);

impl Receivers {
    fn register(&self, receiver: Arc<dyn IAlarmReceiver>) {
        self.0.write().unwrap().push(receiver);
    }

    async fn deliver(&self, payload: AlarmPayload) {
        let receivers = self.0.read().unwrap().clone();
        for receiver in receivers {
            receiver.on_receive(payload.clone()).await;
        }
    }
}

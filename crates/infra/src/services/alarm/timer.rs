use super::{IAlarmReceiver, IAlarmService, Receivers};
use crate::system::ISys;
use nettu_reminders_domain::{AlarmRequest, ID};
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tokio::{
    sync::oneshot,
    time::{sleep_until, Instant},
};
use tracing::{debug, info};

struct PendingAlarm {
    request: AlarmRequest,
    /// Distinguishes this timer from a later one that replaced it
    generation: u64,
    cancel: oneshot::Sender<()>,
}

/// Alarm service backed by tokio timers. Every pending alarm is a spawned
/// task that sleeps until the deadline unless it is cancelled first.
pub struct TokioAlarmService {
    sys: Arc<dyn ISys>,
    alarms: Arc<Mutex<HashMap<ID, PendingAlarm>>>,
    receivers: Receivers,
    generation: AtomicU64,
}

impl TokioAlarmService {
    pub fn new(sys: Arc<dyn ISys>) -> Self {
        Self {
            sys,
            alarms: Default::default(),
            receivers: Default::default(),
            generation: AtomicU64::new(0),
        }
    }
}

/// Deadline for alarms too far ahead to be represented
fn far_future() -> Instant {
    Instant::now() + Duration::from_secs(86400 * 365 * 30)
}

#[async_trait::async_trait]
impl IAlarmService for TokioAlarmService {
    async fn set(&self, request: AlarmRequest) -> anyhow::Result<()> {
        let alarm_id = request.id;
        let delay = Duration::from_millis(request.delay_millis(self.sys.get_timestamp_millis()));
        let generation = self.generation.fetch_add(1, Ordering::SeqCst);
        let (cancel_tx, cancel_rx) = oneshot::channel();

        {
            let mut alarms = self.alarms.lock().unwrap();
            let replaced = alarms.insert(
                alarm_id,
                PendingAlarm {
                    request,
                    generation,
                    cancel: cancel_tx,
                },
            );
            if let Some(previous) = replaced {
                let _ = previous.cancel.send(());
                debug!("Replaced pending alarm: {}", alarm_id);
            }
        }

        debug!(
            "Alarm {} set to fire in {} millis",
            alarm_id,
            delay.as_millis()
        );

        let deadline = Instant::now()
            .checked_add(delay)
            .unwrap_or_else(far_future);
        let alarms = self.alarms.clone();
        let receivers = self.receivers.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = sleep_until(deadline) => {
                    let fired = {
                        let mut alarms = alarms.lock().unwrap();
                        match alarms.get(&alarm_id) {
                            Some(pending) if pending.generation == generation => {
                                alarms.remove(&alarm_id).map(|p| p.request)
                            }
                            _ => None,
                        }
                    };
                    if let Some(request) = fired {
                        info!("Alarm fired: {}", alarm_id);
                        receivers.deliver(request.payload).await;
                    }
                }
                _ = cancel_rx => {
                    debug!("Alarm timer stopped: {}", alarm_id);
                }
            }
        });

        Ok(())
    }

    async fn cancel(&self, alarm_id: ID) -> anyhow::Result<()> {
        let removed = self.alarms.lock().unwrap().remove(&alarm_id);
        if let Some(pending) = removed {
            let _ = pending.cancel.send(());
            debug!("Cancelled alarm: {}", alarm_id);
        }
        Ok(())
    }

    async fn pending(&self) -> Vec<AlarmRequest> {
        let mut pending = self
            .alarms
            .lock()
            .unwrap()
            .values()
            .map(|p| p.request.clone())
            .collect::<Vec<_>>();
        pending.sort_by_key(|a| (a.fire_at, a.id));
        pending
    }

    fn register_receiver(&self, receiver: Arc<dyn IAlarmReceiver>) {
        self.receivers.register(receiver);
    }
}

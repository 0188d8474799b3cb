use nettu_reminders_domain::{AlarmRequest, Reminder, ReminderNotification, ID};
use nettu_reminders_infra::{IAlarmService, ReminderContext};
use std::sync::Arc;
use tracing::debug;

/// Translates `Reminder`s into alarm requests. Alarms are keyed by the
/// reminder id so scheduling a reminder again replaces its previous alarm.
pub struct ReminderScheduler {
    alarms: Arc<dyn IAlarmService>,
}

impl ReminderScheduler {
    pub fn new(ctx: &ReminderContext) -> Self {
        Self {
            alarms: ctx.alarms.clone(),
        }
    }

    pub async fn schedule(
        &self,
        reminder_id: ID,
        fire_time: i64,
        title: &str,
        description: &str,
    ) -> anyhow::Result<()> {
        let request = AlarmRequest {
            id: reminder_id,
            fire_at: fire_time,
            payload: ReminderNotification::new(reminder_id, title, description).into_payload(),
        };
        self.alarms.set(request).await?;
        debug!("Scheduled alarm for reminder {} at {}", reminder_id, fire_time);
        Ok(())
    }

    pub async fn schedule_reminder(&self, reminder: &Reminder) -> anyhow::Result<()> {
        self.schedule(
            reminder.id,
            reminder.fire_time,
            &reminder.title,
            &reminder.description,
        )
        .await
    }

    pub async fn cancel(&self, reminder_id: ID) -> anyhow::Result<()> {
        self.alarms.cancel(reminder_id).await?;
        debug!("Cancelled alarm for reminder {}", reminder_id);
        Ok(())
    }
}

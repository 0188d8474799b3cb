use super::scheduler::ReminderScheduler;
use crate::shared::usecase::UseCase;
use nettu_reminders_domain::{Reminder, ID};
use nettu_reminders_infra::ReminderContext;
use tracing::{error, info};

#[derive(Debug)]
pub enum ReminderOperation {
    Created,
    Updated,
}

/// Keeps the pending alarm of a `Reminder` in line with the stored `Reminder`
#[derive(Debug)]
pub struct SyncReminderAlarmsUseCase<'a> {
    pub request: SyncReminderAlarmsTrigger<'a>,
}

#[derive(Debug)]
pub enum SyncReminderAlarmsTrigger<'a> {
    /// A `Reminder` has been created or updated and needs an alarm at its `fire_time`
    ReminderModified(&'a Reminder, ReminderOperation),
    /// A `Reminder` has been removed, its alarm should never fire
    ReminderDeleted(ID),
    /// The process has started and alarms from a previous run are gone.
    /// Re-registers every stored `Reminder` that is still in the future.
    Startup,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
    SchedulingError(ID),
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for SyncReminderAlarmsUseCase<'a> {
    /// Number of alarms that were registered or cancelled
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncReminderAlarms";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let scheduler = ReminderScheduler::new(ctx);

        match &self.request {
            SyncReminderAlarmsTrigger::ReminderModified(reminder, op) => {
                scheduler.schedule_reminder(reminder).await.map_err(|e| {
                    error!(
                        "Unable to schedule alarm for {:?} reminder: {}. Err: {:?}",
                        op, reminder.id, e
                    );
                    UseCaseError::SchedulingError(reminder.id)
                })?;
                Ok(1)
            }
            SyncReminderAlarmsTrigger::ReminderDeleted(reminder_id) => {
                scheduler.cancel(*reminder_id).await.map_err(|e| {
                    error!(
                        "Unable to cancel alarm for reminder: {}. Err: {:?}",
                        reminder_id, e
                    );
                    UseCaseError::SchedulingError(*reminder_id)
                })?;
                Ok(1)
            }
            SyncReminderAlarmsTrigger::Startup => {
                let now = ctx.sys.get_timestamp_millis();
                let reminders = ctx.repos.reminders.find_all().await.map_err(|e| {
                    error!("Unable to read reminders on startup. Err: {:?}", e);
                    UseCaseError::StorageError
                })?;

                let mut scheduled = 0;
                for reminder in reminders.iter().filter(|r| !r.is_due(now)) {
                    // One failing reminder should not keep the others silent
                    match scheduler.schedule_reminder(reminder).await {
                        Ok(_) => scheduled += 1,
                        Err(e) => error!(
                            "Unable to reschedule alarm for reminder: {}. Err: {:?}",
                            reminder.id, e
                        ),
                    }
                }
                info!(
                    "Rescheduled {} of {} stored reminders",
                    scheduled,
                    reminders.len()
                );
                Ok(scheduled)
            }
        }
    }
}

use super::sync_reminder_alarms::{SyncReminderAlarmsTrigger, SyncReminderAlarmsUseCase};
use crate::{
    error::ReminderError,
    shared::usecase::{execute, UseCase},
};
use nettu_reminders_domain::{Reminder, ID};
use nettu_reminders_infra::ReminderContext;
use tracing::error;

/// Removes the `Reminder` and its pending alarm. Deleting a `Reminder` that
/// does not exist responds with `None` and still makes sure no alarm is left.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Option<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let deleted = ctx
            .repos
            .reminders
            .delete(self.reminder_id)
            .await
            .map_err(|e| {
                error!(
                    "Unable to delete reminder: {}. Err: {:?}",
                    self.reminder_id, e
                );
                UseCaseError::StorageError
            })?;

        let sync_reminder_alarms = SyncReminderAlarmsUseCase {
            request: SyncReminderAlarmsTrigger::ReminderDeleted(self.reminder_id),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_reminder_alarms, ctx).await;

        Ok(deleted)
    }
}

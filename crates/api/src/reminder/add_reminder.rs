use super::sync_reminder_alarms::{
    ReminderOperation, SyncReminderAlarmsTrigger, SyncReminderAlarmsUseCase,
};
use crate::{
    error::ReminderError,
    shared::usecase::{execute, Subscriber, UseCase},
};
use nettu_reminders_domain::{NewReminder, Reminder};
use nettu_reminders_infra::ReminderContext;
use tracing::error;

#[derive(Debug)]
pub struct AddReminderUseCase {
    pub title: String,
    pub description: String,
    pub fire_time: i64,
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
impl UseCase for AddReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "AddReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let new_reminder = NewReminder::new(
            self.title.clone(),
            self.description.clone(),
            self.fire_time,
        );

        let id = ctx
            .repos
            .reminders
            .insert(&new_reminder)
            .await
            .map_err(|e| {
                error!("Unable to store reminder: {:?}. Err: {:?}", new_reminder, e);
                UseCaseError::StorageError
            })?;

        Ok(new_reminder.into_reminder(id))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(ScheduleAlarmOnReminderAdded)]
    }
}

pub struct ScheduleAlarmOnReminderAdded;

#[async_trait::async_trait(?Send)]
impl Subscriber<AddReminderUseCase> for ScheduleAlarmOnReminderAdded {
    async fn notify(&self, reminder: &Reminder, ctx: &ReminderContext) {
        let sync_reminder_alarms = SyncReminderAlarmsUseCase {
            request: SyncReminderAlarmsTrigger::ReminderModified(
                reminder,
                ReminderOperation::Created,
            ),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_reminder_alarms, ctx).await;
    }
}

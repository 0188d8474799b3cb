use crate::{error::ReminderError, shared::usecase::UseCase};
use nettu_reminders_domain::{Reminder, ID};
use nettu_reminders_infra::{ReminderContext, ReminderSubscription};
use tracing::error;

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for ReminderError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Snapshot of every `Reminder` ordered by `fire_time`
#[derive(Debug)]
pub struct GetRemindersUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos.reminders.find_all().await.map_err(|e| {
            error!("Unable to read reminders. Err: {:?}", e);
            UseCaseError::StorageError
        })
    }
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub reminder_id: ID,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let reminder = ctx
            .repos
            .reminders
            .find(self.reminder_id)
            .await
            .map_err(|e| {
                error!("Unable to read reminder: {}. Err: {:?}", self.reminder_id, e);
                UseCaseError::StorageError
            })?;
        reminder.ok_or(UseCaseError::NotFound(self.reminder_id))
    }
}

/// Live view of every `Reminder` ordered by `fire_time`
#[derive(Debug)]
pub struct SubscribeRemindersUseCase;

#[async_trait::async_trait(?Send)]
impl UseCase for SubscribeRemindersUseCase {
    type Response = ReminderSubscription;

    type Error = UseCaseError;

    const NAME: &'static str = "SubscribeReminders";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        ctx.repos.reminders.subscribe().await.map_err(|e| {
            error!("Unable to subscribe to reminders. Err: {:?}", e);
            UseCaseError::StorageError
        })
    }
}

use super::sync_reminder_alarms::{
    ReminderOperation, SyncReminderAlarmsTrigger, SyncReminderAlarmsUseCase,
};
use crate::{
    error::ReminderError,
    shared::usecase::{execute, Subscriber, UseCase},
};
use nettu_reminders_domain::Reminder;
use nettu_reminders_infra::ReminderContext;
use tracing::{debug, error};

/// Replaces the stored `Reminder` with the same id. Updating a `Reminder`
/// that no longer exists is a no-op and responds with `None`.
#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder: Reminder,
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
impl UseCase for UpdateReminderUseCase {
    type Response = Option<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &ReminderContext) -> Result<Self::Response, Self::Error> {
        let reminder_id = self.reminder.id;
        let saved = ctx
            .repos
            .reminders
            .save(&self.reminder)
            .await
            .map_err(|e| {
                error!("Unable to update reminder: {}. Err: {:?}", reminder_id, e);
                UseCaseError::StorageError
            })?;
        if !saved {
            debug!("Ignoring update of unknown reminder: {}", reminder_id);
            return Ok(None);
        }

        Ok(Some(self.reminder.clone()))
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RescheduleAlarmOnReminderUpdated)]
    }
}

pub struct RescheduleAlarmOnReminderUpdated;

#[async_trait::async_trait(?Send)]
impl Subscriber<UpdateReminderUseCase> for RescheduleAlarmOnReminderUpdated {
    async fn notify(&self, reminder: &Option<Reminder>, ctx: &ReminderContext) {
        let reminder = match reminder {
            Some(reminder) => reminder,
            None => return,
        };
        let sync_reminder_alarms = SyncReminderAlarmsUseCase {
            request: SyncReminderAlarmsTrigger::ReminderModified(
                reminder,
                ReminderOperation::Updated,
            ),
        };

        // Sideeffect, ignore result
        let _ = execute(sync_reminder_alarms, ctx).await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nettu_reminders_domain::{AlarmRequest, NewReminder, ID};
    use nettu_reminders_infra::{
        Config, FixedSys, IAlarmService, InMemoryAlarmService, InMemoryNotificationSurface,
        Repos,
    };
    use std::sync::Arc;

    struct TestContext {
        ctx: ReminderContext,
        alarms: Arc<InMemoryAlarmService>,
    }

    fn setup() -> TestContext {
        let alarms = Arc::new(InMemoryAlarmService::new());
        let ctx = ReminderContext::new(
            Repos::create_inmemory(),
            Config::inmemory(),
            Arc::new(FixedSys::new(0)),
            alarms.clone(),
            Arc::new(InMemoryNotificationSurface::new()),
        );
        TestContext { ctx, alarms }
    }

    #[tokio::test]
    async fn update_reschedules_with_new_fire_time() {
        let TestContext { ctx, alarms } = setup();
        let new_reminder = NewReminder::new("X", "", 100);
        let id = ctx.repos.reminders.insert(&new_reminder).await.unwrap();
        let mut reminder = new_reminder.into_reminder(id);
        ctx.alarms
            .set(AlarmRequest {
                id,
                fire_at: 100,
                payload: Default::default(),
            })
            .await
            .unwrap();

        reminder.fire_time = 900;
        let res = execute(
            UpdateReminderUseCase {
                reminder: reminder.clone(),
            },
            &ctx,
        )
        .await
        .unwrap();
        assert_eq!(res, Some(reminder.clone()));

        let stored = ctx.repos.reminders.find(id).await.unwrap().unwrap();
        assert_eq!(stored.fire_time, 900);

        let pending = alarms.pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, id);
        assert_eq!(pending[0].fire_at, 900);
    }

    #[tokio::test]
    async fn update_of_unknown_reminder_is_noop() {
        let TestContext { ctx, alarms } = setup();
        let reminder = NewReminder::new("ghost", "", 100).into_reminder(ID::new(42));

        let res = execute(UpdateReminderUseCase { reminder }, &ctx).await;
        assert_eq!(res, Ok(None));
        assert!(ctx.repos.reminders.find_all().await.unwrap().is_empty());
        assert!(alarms.pending().await.is_empty());
    }

    #[tokio::test]
    async fn update_after_delete_leaves_no_alarm() {
        let TestContext { ctx, alarms } = setup();
        let new_reminder = NewReminder::new("X", "", 100);
        let id = ctx.repos.reminders.insert(&new_reminder).await.unwrap();
        let mut reminder = new_reminder.into_reminder(id);
        ctx.repos.reminders.delete(id).await.unwrap();

        reminder.fire_time = 900;
        let res = execute(UpdateReminderUseCase { reminder }, &ctx).await;
        assert_eq!(res, Ok(None));
        assert!(ctx.repos.reminders.find(id).await.unwrap().is_none());
        assert!(alarms.pending().await.is_empty());
    }
}

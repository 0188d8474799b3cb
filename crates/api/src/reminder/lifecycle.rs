use super::{
    add_reminder::AddReminderUseCase,
    delete_reminder::DeleteReminderUseCase,
    get_reminders::{GetReminderUseCase, GetRemindersUseCase, SubscribeRemindersUseCase},
    update_reminder::UpdateReminderUseCase,
};
use crate::{error::ReminderError, shared::usecase::execute};
use nettu_reminders_domain::{Reminder, ID};
use nettu_reminders_infra::{ReminderContext, ReminderSubscription};

fn validate_title(title: &str) -> Result<(), ReminderError> {
    if title.trim().is_empty() {
        return Err(ReminderError::BadClientData(
            "A reminder needs a title".into(),
        ));
    }
    Ok(())
}

/// Entry point for everything a user can do with their reminders.
///
/// Every mutation keeps the stored `Reminder`s and their pending alarms in
/// step. Updating or deleting a reminder that does not exist is not an error.
#[derive(Clone)]
pub struct Reminders {
    ctx: ReminderContext,
}

impl Reminders {
    pub fn new(ctx: ReminderContext) -> Self {
        Self { ctx }
    }

    pub async fn add(
        &self,
        title: &str,
        description: &str,
        fire_time: i64,
    ) -> Result<Reminder, ReminderError> {
        validate_title(title)?;

        let usecase = AddReminderUseCase {
            title: title.to_string(),
            description: description.to_string(),
            fire_time,
        };
        execute(usecase, &self.ctx).await.map_err(ReminderError::from)
    }

    /// Returns `None` if the reminder no longer exists
    pub async fn update(&self, reminder: &Reminder) -> Result<Option<Reminder>, ReminderError> {
        validate_title(&reminder.title)?;

        let usecase = UpdateReminderUseCase {
            reminder: reminder.clone(),
        };
        execute(usecase, &self.ctx).await.map_err(ReminderError::from)
    }

    pub async fn delete(&self, reminder: &Reminder) -> Result<Option<Reminder>, ReminderError> {
        self.delete_by_id(reminder.id).await
    }

    pub async fn delete_by_id(&self, reminder_id: ID) -> Result<Option<Reminder>, ReminderError> {
        let usecase = DeleteReminderUseCase { reminder_id };
        execute(usecase, &self.ctx).await.map_err(ReminderError::from)
    }

    pub async fn get(&self, reminder_id: ID) -> Result<Reminder, ReminderError> {
        let usecase = GetReminderUseCase { reminder_id };
        execute(usecase, &self.ctx).await.map_err(ReminderError::from)
    }

    pub async fn list(&self) -> Result<Vec<Reminder>, ReminderError> {
        execute(GetRemindersUseCase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }

    pub async fn subscribe(&self) -> Result<ReminderSubscription, ReminderError> {
        execute(SubscribeRemindersUseCase, &self.ctx)
            .await
            .map_err(ReminderError::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nettu_reminders_infra::{
        Config, FixedSys, IAlarmService, InMemoryAlarmService, InMemoryNotificationSurface,
        Repos,
    };
    use std::sync::Arc;

    fn setup() -> (Reminders, Arc<InMemoryAlarmService>) {
        let alarms = Arc::new(InMemoryAlarmService::new());
        let ctx = ReminderContext::new(
            Repos::create_inmemory(),
            Config::inmemory(),
            Arc::new(FixedSys::new(0)),
            alarms.clone(),
            Arc::new(InMemoryNotificationSurface::new()),
        );
        (Reminders::new(ctx), alarms)
    }

    #[tokio::test]
    async fn rejects_empty_title_before_storing() {
        let (reminders, alarms) = setup();
        let res = reminders.add("  ", "desc", 100).await;
        assert!(matches!(res, Err(ReminderError::BadClientData(_))));
        assert!(reminders.list().await.unwrap().is_empty());
        assert!(alarms.pending().await.is_empty());
    }

    #[tokio::test]
    async fn rejects_update_to_empty_title() {
        let (reminders, alarms) = setup();
        let reminder = reminders.add("Pay rent", "", 100).await.unwrap();

        let mut blank = reminder.clone();
        blank.title = "   ".into();
        blank.fire_time = 900;
        let res = reminders.update(&blank).await;
        assert!(matches!(res, Err(ReminderError::BadClientData(_))));

        assert_eq!(reminders.get(reminder.id).await.unwrap(), reminder);
        let pending = alarms.pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].fire_at, 100);
    }

    #[tokio::test]
    async fn list_is_ordered_by_fire_time() {
        let (reminders, _) = setup();
        let a = reminders.add("A", "", 100).await.unwrap();
        let b = reminders.add("B", "", 50).await.unwrap();
        assert_eq!(reminders.list().await.unwrap(), vec![b, a]);
    }

    #[tokio::test]
    async fn full_lifecycle() {
        let (reminders, alarms) = setup();
        let mut reminder = reminders.add("X", "", 100).await.unwrap();
        assert_eq!(reminders.get(reminder.id).await.unwrap(), reminder);

        reminder.fire_time = 500;
        reminders.update(&reminder).await.unwrap();
        let pending = alarms.pending().await;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, reminder.id);
        assert_eq!(pending[0].fire_at, 500);

        reminders.delete(&reminder).await.unwrap();
        assert!(reminders.delete(&reminder).await.is_ok());
        assert!(reminders.list().await.unwrap().is_empty());
        assert!(alarms.pending().await.is_empty());
        assert!(matches!(
            reminders.get(reminder.id).await,
            Err(ReminderError::NotFound(_))
        ));
    }
}

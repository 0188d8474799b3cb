use super::IReminderRepo;
use crate::repos::shared::feed::{ReminderFeed, ReminderSubscription};
use nettu_reminders_domain::{NewReminder, Reminder, ID};
use sqlx::{FromRow, SqlitePool};
use tokio::sync::Mutex;
use tracing::{error, warn};

pub struct SqliteReminderRepo {
    pool: SqlitePool,
    feed: ReminderFeed,
    /// Serializes mutations with the snapshot that is published after them
    write_lock: Mutex<()>,
}

impl SqliteReminderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            feed: ReminderFeed::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    async fn publish_snapshot(&self) {
        if !self.feed.has_subscribers() {
            return;
        }
        let snapshot = match self.find_all().await {
            Ok(reminders) => Ok(reminders),
            Err(e) => {
                warn!("Unable to read reminders snapshot, retrying. Err: {:?}", e);
                self.find_all().await
            }
        };
        match snapshot {
            Ok(reminders) => self.feed.publish(reminders),
            Err(e) => {
                error!(
                    "Unable to read reminders snapshot, closing subscriptions. Err: {:?}",
                    e
                );
                self.feed.close();
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: i64,
    title: String,
    description: String,
    fire_time: i64,
    is_completed: bool,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: ID::new(raw.id),
            title: raw.title,
            description: raw.description,
            fire_time: raw.fire_time,
            is_completed: raw.is_completed,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for SqliteReminderRepo {
    async fn insert(&self, reminder: &NewReminder) -> anyhow::Result<ID> {
        let _guard = self.write_lock.lock().await;
        let res = sqlx::query(
            r#"
            INSERT INTO reminders
            (title, description, fire_time, is_completed)
            VALUES(?, ?, ?, ?)
            "#,
        )
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.fire_time)
        .bind(false)
        .execute(&self.pool)
        .await?;

        self.publish_snapshot().await;
        Ok(ID::new(res.last_insert_rowid()))
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<bool> {
        let _guard = self.write_lock.lock().await;
        let res = sqlx::query(
            r#"
            UPDATE reminders
            SET title = ?, description = ?, fire_time = ?, is_completed = ?
            WHERE id = ?
            "#,
        )
        .bind(&reminder.title)
        .bind(&reminder.description)
        .bind(reminder.fire_time)
        .bind(reminder.is_completed)
        .bind(reminder.id.inner())
        .execute(&self.pool)
        .await?;

        let saved = res.rows_affected() > 0;
        if saved {
            self.publish_snapshot().await;
        }
        Ok(saved)
    }

    async fn find(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.id = ?
            "#,
        )
        .bind(reminder_id.inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(|r| r.into()))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        let raws: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            ORDER BY r.fire_time ASC, r.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(raws.into_iter().map(|r| r.into()).collect())
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let _guard = self.write_lock.lock().await;
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner())
        .fetch_optional(&self.pool)
        .await?;

        if raw.is_some() {
            self.publish_snapshot().await;
        }
        Ok(raw.map(|r| r.into()))
    }

    async fn subscribe(&self) -> anyhow::Result<ReminderSubscription> {
        let _guard = self.write_lock.lock().await;
        let snapshot = self.find_all().await?;
        Ok(self.feed.subscribe(snapshot))
    }
}

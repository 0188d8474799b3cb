mod helpers;

use helpers::setup::{restart_app, spawn_app, spawn_timer_app};
use nettu_reminders_domain::{
    AlarmPayload, AlarmRequest, Reminder, ReminderNotification, ID, REMINDER_ID_KEY,
};
use nettu_reminders_infra::{IAlarmService, Repos};
use std::time::Duration;

#[tokio::test]
async fn test_add_and_deliver_reminder() {
    let app = spawn_app().await;
    let reminders = app.app.reminders();

    let reminder = reminders
        .add("Pay rent", "due today", 1_000)
        .await
        .expect("To add reminder");
    assert_eq!(reminder.id, ID::new(1));
    assert_eq!(reminders.list().await.unwrap(), vec![reminder.clone()]);

    assert_eq!(app.alarms.fire_due(1_000).await, 1);

    let shown = app.notifications.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].slot, ID::new(1));
    assert_eq!(shown[0].title, "Pay rent");
    assert_eq!(shown[0].body, "due today");
}

#[tokio::test]
async fn test_list_is_ordered_by_fire_time() {
    let app = spawn_app().await;
    let reminders = app.app.reminders();

    let a = reminders.add("A", "", 100).await.unwrap();
    let b = reminders.add("B", "", 50).await.unwrap();

    assert_eq!(reminders.list().await.unwrap(), vec![b, a]);
}

#[tokio::test]
async fn test_subscription_follows_mutations() {
    let app = spawn_app().await;
    let reminders = app.app.reminders();
    let mut subscription = reminders.subscribe().await.unwrap();
    assert_eq!(subscription.next().await, Some(vec![]));

    let mut a = reminders.add("A", "", 100).await.unwrap();
    let b = reminders.add("B", "", 50).await.unwrap();
    a.fire_time = 10;
    reminders.update(&a).await.unwrap();
    reminders.delete(&b).await.unwrap();

    let titles = |snapshot: Vec<Reminder>| {
        snapshot.into_iter().map(|r| r.title).collect::<Vec<_>>()
    };
    assert_eq!(titles(subscription.next().await.unwrap()), vec!["A"]);
    assert_eq!(titles(subscription.next().await.unwrap()), vec!["B", "A"]);
    assert_eq!(titles(subscription.next().await.unwrap()), vec!["A", "B"]);
    assert_eq!(titles(subscription.next().await.unwrap()), vec!["A"]);
    assert!(subscription.try_next().is_none());
}

#[tokio::test]
async fn test_update_leaves_one_request_with_new_time() {
    let app = spawn_app().await;
    let reminders = app.app.reminders();

    let mut reminder = reminders.add("X", "", 100).await.unwrap();
    reminder.fire_time = 700;
    reminders.update(&reminder).await.unwrap();

    let pending = app.alarms.pending().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, reminder.id);
    assert_eq!(pending[0].fire_at, 700);
    assert_eq!(reminders.get(reminder.id).await.unwrap().fire_time, 700);
}

#[tokio::test]
async fn test_delete_twice() {
    let app = spawn_app().await;
    let reminders = app.app.reminders();

    let reminder = reminders.add("X", "", 100).await.unwrap();
    assert!(reminders.delete(&reminder).await.is_ok());
    assert!(reminders.delete(&reminder).await.is_ok());
    assert!(reminders.delete_by_id(reminder.id).await.is_ok());

    assert!(reminders.list().await.unwrap().is_empty());
    assert!(app.alarms.pending().await.is_empty());
    assert_eq!(app.alarms.fire_due(1_000).await, 0);
    assert!(app.notifications.shown().is_empty());
}

#[tokio::test]
async fn test_missing_title_shows_default() {
    let app = spawn_app().await;
    let mut payload = AlarmPayload::new();
    payload.put_int(REMINDER_ID_KEY, 4);
    app.app
        .context()
        .alarms
        .set(AlarmRequest {
            id: ID::new(4),
            fire_at: 0,
            payload,
        })
        .await
        .unwrap();

    app.alarms.fire_due(0).await;

    let notification = app.notifications.find_visible(ID::new(4)).unwrap();
    assert_eq!(notification.title, "Reminder");
    assert_eq!(notification.body, "");
}

#[tokio::test]
async fn test_restart_reschedules_future_reminders() {
    let repos = Repos::create_inmemory();
    let first = restart_app(repos.clone(), 0).await;
    let reminders = first.app.reminders();
    reminders.add("Past", "", 500).await.unwrap();
    let future = reminders.add("Future", "", 5_000).await.unwrap();

    let second = restart_app(repos, 1_000).await;
    let pending = second.alarms.pending().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, future.id);
    assert_eq!(
        ReminderNotification::from_payload(&pending[0].payload),
        ReminderNotification::from(&future)
    );
}

#[tokio::test]
async fn test_sqlite_store_survives_restart() {
    let repos = Repos::create_sqlite("sqlite::memory:", 1)
        .await
        .expect("To open sqlite");
    let first = restart_app(repos.clone(), 0).await;
    let added = first
        .app
        .reminders()
        .add("Water plants", "", 2_000)
        .await
        .unwrap();

    let second = restart_app(repos, 100).await;
    assert_eq!(
        second.app.reminders().list().await.unwrap(),
        vec![added.clone()]
    );
    assert_eq!(second.alarms.find(added.id).unwrap().fire_at, 2_000);
}

#[tokio::test(start_paused = true)]
async fn test_timer_fires_notification_at_fire_time() {
    let app = spawn_timer_app().await;
    let reminders = app.app.reminders();

    let reminder = reminders.add("Stand up", "", 60_000).await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(app.notifications.shown().is_empty());

    app.sys.advance(30_000);
    tokio::time::sleep(Duration::from_secs(31)).await;
    let shown = app.notifications.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].slot, reminder.id);
    assert!(app.app.context().alarms.pending().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_deleted_reminder_never_fires() {
    let app = spawn_timer_app().await;
    let reminders = app.app.reminders();

    let reminder = reminders.add("Cancelled", "", 10_000).await.unwrap();
    reminders.delete(&reminder).await.unwrap();

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert!(app.notifications.shown().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_extreme_past_fire_time_fires_immediately() {
    let app = spawn_timer_app().await;
    app.sys.set(1);
    let reminders = app.app.reminders();

    let reminder = reminders.add("Old", "", i64::MIN).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(reminders.list().await.unwrap(), vec![reminder.clone()]);
    let shown = app.notifications.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].slot, reminder.id);
}

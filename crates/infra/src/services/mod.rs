mod alarm;
mod notification;

pub use alarm::{IAlarmReceiver, IAlarmService, InMemoryAlarmService, TokioAlarmService};
pub use notification::{INotificationSurface, InMemoryNotificationSurface, LogNotificationSurface};

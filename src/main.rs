mod telemetry;

use nettu_reminders_api::Application;
use nettu_reminders_infra::{setup_context, IAlarmService};
use telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("nettu_reminders".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await?;
    let app = Application::new(context).await;
    let pending = app.context().alarms.pending().await;
    info!("Reminders running with {} pending alarms", pending.len());

    tokio::signal::ctrl_c().await?;
    info!("Shutting down, pending alarms are rescheduled on the next start");
    Ok(())
}

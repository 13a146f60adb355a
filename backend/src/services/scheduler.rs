//! Daily revision scheduler
//!
//! A single background task sleeps until the next configured local
//! wall-clock time, runs the revision to completion, then computes the next
//! trigger. Runs therefore never overlap.

use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use tokio::task::JoinHandle;

use crate::config::SchedulerConfig;
use crate::AppState;

/// First occurrence of `at` strictly after `now` in `now`'s time zone.
///
/// Local times that do not exist on a given day (DST gaps) move to the
/// following day; ambiguous times take the earlier instant.
pub fn next_run_after<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..=2u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter_map(|date| tz.from_local_datetime(&date.and_time(at)).earliest())
        .find(|candidate| candidate > now)
}

/// Spawn the daily revision loop, or nothing when scheduling is disabled
pub fn spawn_daily_revision(state: AppState, config: &SchedulerConfig) -> Option<JoinHandle<()>> {
    if !config.enabled {
        tracing::info!("Daily DCRI revision scheduler disabled");
        return None;
    }

    let Some(at) = NaiveTime::from_hms_opt(config.hour, config.minute, 0) else {
        tracing::error!(
            "Invalid scheduler time {:02}:{:02}, scheduler not started",
            config.hour,
            config.minute
        );
        return None;
    };

    Some(tokio::spawn(async move {
        loop {
            let now = Local::now();
            let Some(next) = next_run_after(&now, at) else {
                tracing::error!("No upcoming run time for {}, stopping scheduler", at);
                return;
            };

            let wait = (next.clone() - now).to_std().unwrap_or_default();
            tracing::info!("Next daily DCRI revision at {}", next);
            tokio::time::sleep(wait).await;

            match state.run_daily_revision().await {
                Ok(updates) => {
                    tracing::info!(crops = updates.len(), "Scheduled DCRI revision finished")
                }
                Err(e) => tracing::error!(error = %e, "Scheduled DCRI revision failed"),
            }
        }
    }))
}

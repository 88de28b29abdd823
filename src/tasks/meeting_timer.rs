//! Meeting timer background task

use std::sync::Arc;
use tokio::{
    task::JoinHandle,
    time::{interval, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::{error::ScrumError, state::AppState, timer::TickOutcome};

/// Handle to the driver task of one meeting
#[derive(Debug)]
pub struct TimerHandle {
    pub meeting_id: u64,
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Whether the driver has stopped ticking
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the driver to stop
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("Meeting {} driver failed: {}", self.meeting_id, e);
        }
    }
}

/// Start a meeting for `scrum_id` and spawn the task that drives it.
///
/// Dropping the returned handle detaches the driver; it still stops on its
/// own once the meeting completes or is cancelled.
pub fn start_meeting(state: Arc<AppState>, scrum_id: u64) -> Result<TimerHandle, ScrumError> {
    let meeting_id = state.begin_meeting(scrum_id)?;
    let task = tokio::spawn(meeting_timer_task(state, meeting_id));
    Ok(TimerHandle { meeting_id, task })
}

/// Background task that ticks one meeting until it is no longer running
pub async fn meeting_timer_task(state: Arc<AppState>, meeting_id: u64) {
    info!("Starting timer task for meeting {}", meeting_id);

    let start_time = Instant::now();
    let mut applied_seconds = 0u64;

    let mut interval = interval(state.tick_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // First tick completes immediately
    interval.tick().await;

    loop {
        interval.tick().await;

        // Apply whole seconds since the last tick so late ticks catch up.
        // A zero delta still checks the meeting is running.
        let elapsed = start_time.elapsed().as_secs();
        let delta = elapsed - applied_seconds;
        applied_seconds = elapsed;

        match state.tick_meeting(meeting_id, delta) {
            Ok(TickOutcome::Advanced) => {}
            Ok(TickOutcome::Completed) => {
                info!("Meeting {} finished, stopping timer task", meeting_id);
                break;
            }
            Ok(TickOutcome::Ignored) => {
                debug!("Meeting {} no longer running, stopping timer task", meeting_id);
                break;
            }
            Err(e) => {
                error!("Failed to tick meeting {}: {}", meeting_id, e);
                break;
            }
        }
    }
}

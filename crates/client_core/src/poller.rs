use std::time::Duration;

use tokio::{runtime::Handle, task::JoinHandle, time::MissedTickBehavior};
use tracing::debug;

use crate::{actions::Action, store::ActionSender};

/// Periodically requests the checkpoint round status while the
/// visualization page is mounted. Dropping the poller stops it.
pub struct RoundStatusPoller {
    port: u16,
    task: JoinHandle<()>,
}

impl RoundStatusPoller {
    /// The first request goes out one `period` after start.
    pub fn start(runtime: &Handle, port: u16, period: Duration, tx: ActionSender) -> Self {
        let task = runtime.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if tx.send(Action::GetCkptRoundStatus { port }).is_err() {
                    debug!(port, "store gone; round status poller exiting");
                    break;
                }
            }
        });
        Self { port, task }
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Drop for RoundStatusPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

use std::sync::Weak;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::store::NotificationsStore;

/// Cancellable repeating timer that re-fetches the unread count.
///
/// The owning view starts one on mount and calls [`stop`](Self::stop) once
/// on teardown. Dropping the poller aborts the task as a backstop, and the
/// task itself holds only a weak reference to the store, so it ends as soon
/// as the store is gone even if neither happens.
pub struct CountPoller {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl CountPoller {
    pub(crate) fn spawn(store: Weak<NotificationsStore>, period: Duration) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            // First fire lands one full period out, like a repeating timer
            let start = tokio::time::Instant::now() + period;
            let mut ticks = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let Some(store) = store.upgrade() else {
                            tracing::debug!("Notification store dropped, ending count poll");
                            break;
                        };
                        store.load_count().await;
                    }
                    _ = stop_rx.changed() => {
                        if *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });
        Self { stop_tx, task }
    }

    /// Stop polling. An in-flight count fetch, if any, still settles.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }
}

impl Drop for CountPoller {
    fn drop(&mut self) {
        self.task.abort();
    }
}

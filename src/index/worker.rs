//! Background worker that rebuilds the index on a fixed interval.
//!
//! The first build runs immediately; the ready signal fires once it finishes.
//! After each build the worker waits `interval - build time` and rebuilds, until
//! it receives a stop request, which it acknowledges before exiting.

use super::store::{AddressIndex, BuildStats};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

/// Lifecycle of the reindex worker, observable through [`ReindexHandle::state`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Building,
    Ready,
    Stopped,
}

/// Time to sleep before the next build. A build slower than the interval starts the next one at once.
pub fn next_wait(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Fires once with the result of the initial build.
pub struct ReadySignal(oneshot::Receiver<Result<BuildStats>>);

impl ReadySignal {
    /// Wait for the initial build.
    ///
    /// A failed initial build is returned as its error; the worker keeps running.
    pub async fn wait(self) -> Result<BuildStats> {
        self.0
            .await
            .map_err(|_| Error::Worker("worker exited before the initial build".to_string()))?
    }
}

/// Control side of a running worker.
pub struct ReindexHandle {
    stop_tx: mpsc::Sender<oneshot::Sender<()>>,
    state_rx: watch::Receiver<WorkerState>,
    task: JoinHandle<()>,
}

impl ReindexHandle {
    pub fn state(&self) -> WorkerState {
        *self.state_rx.borrow()
    }

    /// A receiver for state changes.
    pub fn subscribe(&self) -> watch::Receiver<WorkerState> {
        self.state_rx.clone()
    }

    /// Ask the worker to stop and wait for its acknowledgement.
    ///
    /// A build in progress completes first.
    pub async fn shutdown(self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.stop_tx.send(ack_tx).await.is_ok() {
            ack_rx
                .await
                .map_err(|_| Error::Worker("worker dropped the stop acknowledgement".to_string()))?;
        }
        self.task
            .await
            .map_err(|e| Error::Worker(format!("worker task failed: {e}")))
    }
}

/// Periodic rebuild of an [`AddressIndex`] from a documents directory.
pub struct ReindexWorker {
    index: Arc<AddressIndex>,
    source_dir: PathBuf,
    interval: Duration,
    /// Extra time spent before each rebuild, simulates a slow build.
    #[cfg(test)]
    build_delay: Duration,
}

impl ReindexWorker {
    pub fn new(index: Arc<AddressIndex>, source_dir: impl Into<PathBuf>, interval: Duration) -> Self {
        ReindexWorker {
            index,
            source_dir: source_dir.into(),
            interval,
            #[cfg(test)]
            build_delay: Duration::ZERO,
        }
    }

    /// Start the worker on the current tokio runtime.
    ///
    /// Only one worker may run per index.
    pub fn spawn(self) -> Result<(ReindexHandle, ReadySignal)> {
        self.index.attach_worker()?;
        let (stop_tx, stop_rx) = mpsc::channel(1);
        let (state_tx, state_rx) = watch::channel(WorkerState::Building);
        let (ready_tx, ready_rx) = oneshot::channel();
        let task = tokio::spawn(self.run(stop_rx, state_tx, ready_tx));
        Ok((
            ReindexHandle {
                stop_tx,
                state_rx,
                task,
            },
            ReadySignal(ready_rx),
        ))
    }

    async fn build(&self) -> (Result<BuildStats>, Duration) {
        let index = self.index.clone();
        let dir = self.source_dir.clone();
        let started = tokio::time::Instant::now();
        #[cfg(test)]
        tokio::time::sleep(self.build_delay).await;
        let result = tokio::task::spawn_blocking(move || index.rebuild(&dir))
            .await
            .unwrap_or_else(|e| Err(Error::Worker(format!("rebuild task failed: {e}"))));
        (result, started.elapsed())
    }

    async fn run(
        self,
        mut stop_rx: mpsc::Receiver<oneshot::Sender<()>>,
        state_tx: watch::Sender<WorkerState>,
        ready_tx: oneshot::Sender<Result<BuildStats>>,
    ) {
        log::info!(
            "Reindex worker started on {} every {:?}",
            self.source_dir.display(),
            self.interval
        );
        let (result, mut elapsed) = self.build().await;
        match &result {
            Ok(stats) => log::info!(
                "Initial index ready: {} documents in {:?}",
                stats.docs_indexed,
                stats.duration
            ),
            Err(e) => log::error!("Initial index build failed: {e}"),
        }
        state_tx.send_replace(WorkerState::Ready);
        let _ = ready_tx.send(result);

        loop {
            let period = next_wait(self.interval, elapsed);
            tokio::select! {
                biased;
                stop = stop_rx.recv() => {
                    state_tx.send_replace(WorkerState::Stopped);
                    self.index.detach_worker();
                    match stop {
                        Some(ack) => {
                            log::info!("Reindex worker stopping");
                            let _ = ack.send(());
                        }
                        None => log::info!("Reindex worker handle dropped, stopping"),
                    }
                    return;
                }
                _ = tokio::time::sleep(period) => {
                    state_tx.send_replace(WorkerState::Building);
                    let (result, took) = self.build().await;
                    elapsed = took;
                    match result {
                        Ok(stats) => log::debug!(
                            "Reindexed {} documents, generation {}",
                            stats.docs_indexed,
                            stats.generation
                        ),
                        Err(e) => log::error!("Reindex failed, previous index kept: {e}"),
                    }
                    state_tx.send_replace(WorkerState::Ready);
                }
            }
        }
    }
}

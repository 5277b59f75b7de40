//! Owner context: the serialized execution context that owns widget state.
//!
//! Every mutation of a slide tab happens on its owner context. Work that
//! originates elsewhere (a timer firing on a tokio worker, for example) is
//! posted through an [`OwnerHandle`] and executed later, strictly in posting
//! order, by the [`OwnerLoop`].

use log::{debug, trace};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::ScheduleError;

/// A unit of work executed on the owner context.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Sender half of the owner context.
///
/// Clone-able, can be moved into async tasks.
#[derive(Clone, Debug)]
pub struct OwnerHandle {
    tx: mpsc::UnboundedSender<Job>,
}

impl OwnerHandle {
    /// Queue a job for the owner context.
    ///
    /// Never runs the job synchronously, even when called from the owner
    /// context itself.
    pub fn post<F>(&self, job: F) -> Result<(), ScheduleError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.tx
            .send(Box::new(job))
            .map_err(|_| ScheduleError::OwnerClosed)
    }

    /// Whether the loop side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiver half of the owner context. Executes posted jobs one at a time.
pub struct OwnerLoop {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl OwnerLoop {
    /// Run jobs until every [`OwnerHandle`] has been dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            job();
        }
        debug!("Owner loop finished: all handles dropped");
    }

    /// Run jobs until `shutdown` is cancelled or every handle is dropped.
    ///
    /// Jobs still queued at shutdown are dropped without running.
    pub async fn run_until(mut self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    debug!("Owner loop shut down");
                    break;
                }
                job = self.rx.recv() => match job {
                    Some(job) => job(),
                    None => {
                        debug!("Owner loop finished: all handles dropped");
                        break;
                    }
                },
            }
        }
    }

    /// Wait for the next job and run it.
    ///
    /// Returns false once every handle has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run every job that is already queued, without waiting.
    ///
    /// Jobs posted by the jobs themselves are picked up in the same call.
    /// Returns the number of jobs executed.
    pub fn run_pending(&mut self) -> usize {
        let mut count = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            count += 1;
        }
        if count > 0 {
            trace!("Ran {} pending owner jobs", count);
        }
        count
    }
}

impl std::fmt::Debug for OwnerLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerLoop").finish_non_exhaustive()
    }
}

/// Create a new owner context pair.
pub fn channel() -> (OwnerHandle, OwnerLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (OwnerHandle { tx }, OwnerLoop { rx })
}

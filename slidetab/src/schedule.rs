//! Deferred expand/collapse/toggle commands.
//!
//! A slide tab keeps at most one pending command. Scheduling a new one
//! cancels the previous one first. A [`ScheduleStrategy`] decides *how* the
//! delay elapses; whatever it does, it must eventually call [`TabTask::run`]
//! on the owner context. The task itself re-checks cancellation, the widget's
//! liveness and its attachment before touching any state, so a strategy that
//! ignores cancellation still cannot run a superseded command. A task that is
//! dropped without running releases the widget's pending slot.

use std::sync::Weak;
use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::error::ScheduleError;
use crate::owner::OwnerHandle;
use crate::tab::{Shared, SlideTab};

/// What a deferred command does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabCommand {
    /// `set_expanded(expanded, animated)`.
    SetExpanded { expanded: bool, animated: bool },
    Expand,
    Collapse,
    /// Resolved against the state at the moment the command fires.
    Toggle,
}

/// A scheduled command bound to one slide tab.
pub struct TabTask {
    pub(crate) command: TabCommand,
    pub(crate) generation: u64,
    pub(crate) cancel: CancellationToken,
    pub(crate) target: Weak<Shared>,
}

impl TabTask {
    pub fn command(&self) -> TabCommand {
        self.command
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token cancelled when the task is superseded or its widget goes away.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Execute the command. Must be called on the owner context.
    ///
    /// Skips silently when the task was cancelled, its slide tab was dropped,
    /// or the slide tab is detached.
    pub fn run(self) {
        if self.cancel.is_cancelled() {
            debug!("Skipping cancelled {:?}", self.command);
            return;
        }
        let Some(shared) = self.target.upgrade() else {
            debug!("Skipping {:?}: slide tab dropped", self.command);
            return;
        };
        SlideTab::from_shared(shared).run_task(self.generation, self.command);
    }
}

/// A task dropped without running, e.g. because the owner context closed
/// before it fired, frees the pending slot it still owns.
impl Drop for TabTask {
    fn drop(&mut self) {
        let Some(shared) = self.target.upgrade() else {
            return;
        };
        if shared.release_pending(self.generation) {
            debug!("{:?} dropped before it could run", self.command);
        }
    }
}

impl std::fmt::Debug for TabTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabTask")
            .field("command", &self.command)
            .field("generation", &self.generation)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Decides how a task's delay elapses and hands it to the owner context.
pub trait ScheduleStrategy: Send + Sync {
    fn schedule(&self, task: TabTask, delay: Duration) -> Result<(), ScheduleError>;
}

/// Default strategy: a tokio timer that posts the task to the owner context.
///
/// The timer task ends early when the command is cancelled, so a superseded
/// command never reaches the owner context. A zero delay still goes through
/// the owner queue.
#[derive(Debug, Clone)]
pub struct TimerStrategy {
    owner: OwnerHandle,
    runtime: Option<Handle>,
}

impl TimerStrategy {
    /// Create a timer strategy, capturing the current tokio runtime if any.
    ///
    /// Without a runtime at construction, the runtime current at schedule
    /// time is used.
    pub fn new(owner: OwnerHandle) -> Self {
        Self {
            owner,
            runtime: Handle::try_current().ok(),
        }
    }

    /// Create a timer strategy that spawns its timers on `runtime`.
    pub fn with_runtime(owner: OwnerHandle, runtime: Handle) -> Self {
        Self {
            owner,
            runtime: Some(runtime),
        }
    }

    fn runtime(&self) -> Result<Handle, ScheduleError> {
        match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|_| ScheduleError::NoRuntime),
        }
    }
}

impl ScheduleStrategy for TimerStrategy {
    fn schedule(&self, task: TabTask, delay: Duration) -> Result<(), ScheduleError> {
        if self.owner.is_closed() {
            return Err(ScheduleError::OwnerClosed);
        }
        let runtime = self.runtime()?;
        let owner = self.owner.clone();
        let cancel = task.cancellation();

        runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {
                    trace!("Timer for {:?} cancelled before firing", task.command);
                }
                _ = tokio::time::sleep(delay) => {
                    if owner.post(move || task.run()).is_err() {
                        debug!("Owner context closed, dropping deferred command");
                    }
                }
            }
        });
        Ok(())
    }
}

// =============================================================================
// Pending slot
// =============================================================================

#[derive(Debug)]
struct Pending {
    generation: u64,
    cancel: CancellationToken,
}

/// The single pending-command slot of a slide tab.
#[derive(Debug, Default)]
pub(crate) struct PendingSlot {
    last_generation: u64,
    current: Option<Pending>,
}

impl PendingSlot {
    /// Cancel the current command (if any) and reserve the slot for a new one.
    pub(crate) fn replace(&mut self) -> (u64, CancellationToken) {
        if self.cancel() {
            debug!("Superseding pending command");
        }
        self.last_generation += 1;
        let cancel = CancellationToken::new();
        self.current = Some(Pending {
            generation: self.last_generation,
            cancel: cancel.clone(),
        });
        (self.last_generation, cancel)
    }

    /// Cancel the current command. Returns true if one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(pending) => {
                pending.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Clear the slot if `generation` still owns it.
    pub(crate) fn release(&mut self, generation: u64) -> bool {
        match &self.current {
            Some(pending) if pending.generation == generation => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_cancels_previous() {
        let mut slot = PendingSlot::default();
        let (first, first_token) = slot.replace();
        let (second, second_token) = slot.replace();

        assert!(first_token.is_cancelled());
        assert!(!second_token.is_cancelled());
        assert_ne!(first, second);
        assert!(!slot.release(first));
        assert!(slot.is_pending());
        assert!(slot.release(second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_cancel_empty_slot() {
        let mut slot = PendingSlot::default();
        assert!(!slot.cancel());
        let (_, token) = slot.replace();
        assert!(slot.cancel());
        assert!(token.is_cancelled());
        assert!(!slot.is_pending());
    }
}

//! Error types for slide tab configuration, scheduling and listener dispatch.

use std::any::Any;

use crate::event::ListenerId;
use crate::state::SlideTabId;

/// Errors raised while assembling or loading a slide tab configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The content reference was empty.
    #[error("slide tab requires a content reference")]
    MissingContent,

    /// A style class name was empty or contained whitespace.
    #[error("invalid style class name: {name:?}")]
    InvalidStyleName { name: String },

    /// The configuration document could not be parsed.
    #[error("configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised when a deferred command cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The owner context has shut down and no longer accepts work.
    #[error("owner context is closed")]
    OwnerClosed,

    /// The timer strategy was used outside of a tokio runtime.
    #[error("no tokio runtime available for the timer")]
    NoRuntime,
}

/// A toggle listener panicked while an event was being dispatched.
///
/// The transition that produced the event stays applied; the remaining
/// listeners still receive it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("toggle listener {listener} of slide tab {widget} panicked: {message}")]
pub struct ListenerError {
    /// Widget whose event was being dispatched.
    pub widget: SlideTabId,
    /// Registration id of the failing listener.
    pub listener: ListenerId,
    /// Panic message extracted from the panic payload.
    pub message: String,
}

/// Extract a human-readable message from a panic payload.
///
/// Panics can carry either `&str` or `String` payloads. Anything else falls
/// back to a generic message.
pub fn extract_panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

//! Slide tab: a clickable tab that expands and collapses an attached content
//! panel, with deferred (timed) toggling.
//!
//! The crate holds the toggle state machine and its scheduling; rendering is
//! delegated to the host through the capabilities in [`view`].

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod owner;
pub mod schedule;
pub mod state;
pub mod tab;
pub mod view;

pub use builder::SlideTabBuilder;
pub use tab::{ClientSignals, SlideTab};

pub mod prelude {
    pub use crate::builder::SlideTabBuilder;
    pub use crate::config::{ContentRef, Orientation, SlideMode, SlideTabConfig, TabPosition};
    pub use crate::error::{ConfigError, ListenerError, ScheduleError};
    pub use crate::event::{EventHub, ListenerId, Registration, ToggleEvent};
    pub use crate::owner::{OwnerHandle, OwnerLoop};
    pub use crate::schedule::{ScheduleStrategy, TabCommand, TabTask, TimerStrategy};
    pub use crate::state::{SlideTabId, ToggleState};
    pub use crate::tab::{ClientSignals, SlideTab};
    pub use crate::view::{
        Dimension, Part, RecordingView, RenderGateway, RenderInstruction, RenderKind, Sizeable,
        Styleable, View,
    };
}

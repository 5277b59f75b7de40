//! Builder for [`SlideTab`].

use std::sync::Arc;

use crate::config::{ContentRef, SlideMode, SlideTabConfig, TabPosition};
use crate::error::{ConfigError, ListenerError};
use crate::event::{ToggleEvent, ToggleListener};
use crate::owner::OwnerHandle;
use crate::schedule::{ScheduleStrategy, TimerStrategy};
use crate::tab::{ListenerErrorHook, SlideTab};
use crate::view::View;

/// Assembles the configuration of a slide tab.
///
/// # Example
///
/// ```ignore
/// let (owner, owner_loop) = slidetab::owner::channel();
/// let tab = SlideTabBuilder::new("details", "Click to expand")
///     .mode(SlideMode::Right)
///     .tab_position(TabPosition::End)
///     .auto_collapse_on_outside_click(true)
///     .listener(|event| log::info!("expanded: {}", event.expanded))
///     .build(RecordingView::new(), owner)?;
/// ```
pub struct SlideTabBuilder {
    content: ContentRef,
    config: SlideTabConfig,
    listeners: Vec<ToggleListener>,
    strategy: Option<Arc<dyn ScheduleStrategy>>,
    on_listener_error: Option<ListenerErrorHook>,
}

impl SlideTabBuilder {
    /// Start a builder for the given content and caption.
    pub fn new(content: impl Into<ContentRef>, caption: impl Into<String>) -> Self {
        Self::from_config(content, SlideTabConfig::new(caption))
    }

    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(content: impl Into<ContentRef>, config: SlideTabConfig) -> Self {
        Self {
            content: content.into(),
            config,
            listeners: Vec::new(),
            strategy: None,
            on_listener_error: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.config.caption = caption.into();
        self
    }

    pub fn mode(mut self, mode: SlideMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn tab_position(mut self, position: TabPosition) -> Self {
        self.config.tab_position = position;
        self
    }

    pub fn tab_size(mut self, pixels: u32) -> Self {
        self.config.tab_size = pixels;
        self
    }

    pub fn fixed_content_size(mut self, pixels: u32) -> Self {
        self.config.fixed_content_size = pixels;
        self
    }

    pub fn animation_duration(mut self, millis: u32) -> Self {
        self.config.animation_duration_millis = millis;
        self
    }

    pub fn z_index(mut self, z_index: i32) -> Self {
        self.config.z_index = z_index;
        self
    }

    pub fn auto_collapse_on_outside_click(mut self, enabled: bool) -> Self {
        self.config.auto_collapse_on_outside_click = enabled;
        self
    }

    pub fn tab_visible(mut self, visible: bool) -> Self {
        self.config.tab_visible = visible;
        self
    }

    pub fn toggle_enabled(mut self, enabled: bool) -> Self {
        self.config.toggle_enabled = enabled;
        self
    }

    /// Start expanded. The expand is rendered when the tab is attached.
    pub fn expanded(mut self, expanded: bool) -> Self {
        self.config.expanded = expanded;
        self
    }

    pub fn style_name(mut self, name: impl Into<String>) -> Self {
        self.config.style_names.push(name.into());
        self
    }

    pub fn style_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .style_names
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Register a toggle listener on the built tab.
    pub fn listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&ToggleEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Replace the default [`TimerStrategy`].
    pub fn schedule_strategy<S>(mut self, strategy: S) -> Self
    where
        S: ScheduleStrategy + 'static,
    {
        self.strategy = Some(Arc::new(strategy));
        self
    }

    /// Replace the default [`TimerStrategy`] with a shared strategy.
    pub fn shared_schedule_strategy(mut self, strategy: Arc<dyn ScheduleStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Receive listener panics after they have been contained and logged.
    pub fn on_listener_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ListenerError) + Send + Sync + 'static,
    {
        self.on_listener_error = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &SlideTabConfig {
        &self.config
    }

    /// Validate the configuration and create the slide tab.
    ///
    /// The tab starts detached; the host calls
    /// [`SlideTab::attach`] once it is part of the live view.
    pub fn build(self, view: impl Into<View>, owner: OwnerHandle) -> Result<SlideTab, ConfigError> {
        if self.content.is_empty() {
            return Err(ConfigError::MissingContent);
        }
        self.config.validate()?;

        let strategy: Arc<dyn ScheduleStrategy> = match self.strategy {
            Some(strategy) => strategy,
            None => Arc::new(TimerStrategy::new(owner)),
        };

        Ok(SlideTab::create(
            self.content,
            self.config,
            view.into(),
            strategy,
            self.listeners,
            self.on_listener_error,
        ))
    }
}

impl std::fmt::Debug for SlideTabBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideTabBuilder")
            .field("content", &self.content)
            .field("config", &self.config)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

//! The slide tab controller.
//!
//! `SlideTab` is a cheap-to-clone handle around shared state. All mutations
//! are expected to run on the widget's owner context; deferred commands get
//! there through the configured [`ScheduleStrategy`].
//!
//! Every transition follows the same rule:
//!
//! 1. toggling disabled: nothing happens
//! 2. already in the target state: nothing happens
//! 3. otherwise the state flips, the view receives the render instruction and
//!    a [`ToggleEvent`] is dispatched to the listeners
//!
//! The state lock is released before the view or any listener is called, so
//! listeners may call back into the tab.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, trace};

use crate::config::{
    ContentRef, SlideMode, SlideTabConfig, TabPosition, transition_style, validate_style_name,
};
use crate::error::{ConfigError, ListenerError, ScheduleError};
use crate::event::{EventHub, Registration, ToggleEvent, ToggleListener};
use crate::schedule::{PendingSlot, ScheduleStrategy, TabCommand, TabTask};
use crate::state::{SlideTabId, ToggleState};
use crate::view::{Dimension, Part, RenderInstruction, RenderKind, View};

/// Class name set on the host while the tab itself is hidden.
pub const TAB_HIDDEN_CLASS: &str = "tab-hidden";

/// Callback receiving contained listener failures.
pub type ListenerErrorHook = Arc<dyn Fn(&ListenerError) + Send + Sync>;

/// Inbound signals from the client side of a rendered slide tab.
///
/// The framework adapter translates client events into these calls.
pub trait ClientSignals {
    /// The user clicked the tab.
    fn tab_clicked(&self);

    /// The user clicked somewhere outside the expanded panel.
    fn outside_clicked(&self);
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Expand,
    Collapse,
    Flip,
}

#[derive(Debug)]
struct TabState {
    toggle: ToggleState,
    attached: bool,
    caption: String,
    tab_position: TabPosition,
    tab_size: u32,
    fixed_content_size: u32,
    z_index: i32,
    tab_visible: bool,
    style_names: BTreeSet<String>,
    pending: PendingSlot,
}

impl TabState {
    fn instruction(&self, kind: RenderKind, mode: SlideMode) -> RenderInstruction {
        RenderInstruction {
            kind,
            size_hint: self.fixed_content_size,
            orientation: mode.orientation(),
            animation_millis: self.toggle.animation_duration_millis,
        }
    }
}

pub(crate) struct Shared {
    id: SlideTabId,
    content: ContentRef,
    mode: SlideMode,
    state: Mutex<TabState>,
    hub: EventHub<ToggleEvent>,
    view: View,
    strategy: Arc<dyn ScheduleStrategy>,
    on_listener_error: Option<ListenerErrorHook>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TabState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Clear the pending slot if `generation` still owns it.
    pub(crate) fn release_pending(&self, generation: u64) -> bool {
        self.lock().pending.release(generation)
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let state = self
            .state
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if state.pending.cancel() {
            debug!("Slide tab {} dropped, cancelled pending command", self.id);
        }
    }
}

/// A clickable tab that expands and collapses an attached content panel.
///
/// Build one with [`SlideTabBuilder`](crate::SlideTabBuilder).
#[derive(Clone)]
pub struct SlideTab {
    shared: Arc<Shared>,
}

impl SlideTab {
    pub(crate) fn create(
        content: ContentRef,
        config: SlideTabConfig,
        view: View,
        strategy: Arc<dyn ScheduleStrategy>,
        listeners: Vec<ToggleListener>,
        on_listener_error: Option<ListenerErrorHook>,
    ) -> Self {
        let state = TabState {
            toggle: ToggleState::new(
                config.expanded,
                config.toggle_enabled,
                config.auto_collapse_on_outside_click,
                config.animation_duration_millis,
            ),
            attached: false,
            caption: config.caption.clone(),
            tab_position: config.tab_position,
            tab_size: config.tab_size,
            fixed_content_size: config.fixed_content_size,
            z_index: config.z_index,
            tab_visible: config.tab_visible,
            style_names: config.style_names.iter().cloned().collect(),
            pending: PendingSlot::default(),
        };

        let tab = Self {
            shared: Arc::new(Shared {
                id: SlideTabId::new(),
                content,
                mode: config.mode,
                state: Mutex::new(state),
                hub: EventHub::new(),
                view,
                strategy,
                on_listener_error,
            }),
        };

        for listener in listeners {
            tab.shared.hub.add_shared(listener);
        }
        tab.apply_config(&config);
        debug!("Created slide tab {} ({:?})", tab.id(), config.mode);
        tab
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// Push the initial configuration to the view.
    fn apply_config(&self, config: &SlideTabConfig) {
        let view = &self.shared.view;
        view.style.set_class_name(config.mode.class_name(), true);
        view.size
            .set_size(Part::Tab, Dimension::Height, Some(config.tab_size));
        view.style
            .set_style("transition", Some(&config.transition_style()));
        view.style
            .set_style("z-index", Some(&config.z_index.to_string()));
        view.render.set_caption(&config.caption);
        self.apply_tab_position(config.tab_position);
        if !config.tab_visible {
            view.style.set_class_name(TAB_HIDDEN_CLASS, true);
        }
        for name in &config.style_names {
            view.style.set_class_name(name, true);
        }
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Unique id of this slide tab.
    pub fn id(&self) -> SlideTabId {
        self.shared.id
    }

    /// Reference to the component shown in the content panel.
    pub fn content(&self) -> &ContentRef {
        &self.shared.content
    }

    /// Edge the content slides out from.
    pub fn slide_mode(&self) -> SlideMode {
        self.shared.mode
    }

    /// Current logical state. A pending deferred command is not taken into
    /// account.
    pub fn is_expanded(&self) -> bool {
        self.shared.lock().toggle.expanded
    }

    /// Snapshot of the toggle state.
    pub fn toggle_state(&self) -> ToggleState {
        self.shared.lock().toggle.clone()
    }

    /// Current caption text.
    pub fn caption(&self) -> String {
        self.shared.lock().caption.clone()
    }

    /// Alignment of the tab along its edge.
    pub fn tab_position(&self) -> TabPosition {
        self.shared.lock().tab_position
    }

    /// Height of the tab in pixels.
    pub fn tab_size(&self) -> u32 {
        self.shared.lock().tab_size
    }

    /// Duration in milliseconds.
    pub fn animation_duration(&self) -> u32 {
        self.shared.lock().toggle.animation_duration_millis
    }

    /// Fixed cross-axis content size in pixels, 0 for natural size.
    pub fn fixed_content_size(&self) -> u32 {
        self.shared.lock().fixed_content_size
    }

    /// Stacking order of tab, content and wrapper.
    pub fn z_index(&self) -> i32 {
        self.shared.lock().z_index
    }

    /// Whether expand and collapse requests are honored.
    pub fn is_toggle_enabled(&self) -> bool {
        self.shared.lock().toggle.toggle_enabled
    }

    /// Whether an outside click collapses an expanded tab.
    pub fn is_auto_collapse_on_outside_click(&self) -> bool {
        self.shared.lock().toggle.auto_collapse_on_outside_click
    }

    /// Whether the clickable tab is shown.
    pub fn is_tab_visible(&self) -> bool {
        self.shared.lock().tab_visible
    }

    /// Extra style class names, sorted.
    pub fn style_names(&self) -> Vec<String> {
        self.shared.lock().style_names.iter().cloned().collect()
    }

    /// Whether the tab is part of the live view.
    pub fn is_attached(&self) -> bool {
        self.shared.lock().attached
    }

    /// Whether a deferred command is waiting to fire.
    pub fn has_pending_command(&self) -> bool {
        self.shared.lock().pending.is_pending()
    }

    /// Number of registered toggle listeners.
    pub fn listener_count(&self) -> usize {
        self.shared.hub.len()
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Caption of the tab. The view is responsible for escaping it.
    pub fn set_caption(&self, caption: impl Into<String>) {
        let caption = caption.into();
        self.shared.view.render.set_caption(&caption);
        self.shared.lock().caption = caption;
    }

    /// Exactly one tab position class is set at any time.
    pub fn set_tab_position(&self, position: TabPosition) {
        self.shared.lock().tab_position = position;
        self.apply_tab_position(position);
    }

    fn apply_tab_position(&self, position: TabPosition) {
        for value in TabPosition::ALL {
            self.shared
                .view
                .style
                .set_class_name(value.class_name(), value == position);
        }
    }

    /// Set the height of the tab in pixels.
    pub fn set_tab_size(&self, pixels: u32) {
        self.shared.lock().tab_size = pixels;
        self.shared
            .view
            .size
            .set_size(Part::Tab, Dimension::Height, Some(pixels));
    }

    /// Set the animation duration in milliseconds (default 500).
    pub fn set_animation_duration(&self, millis: u32) {
        self.shared.lock().toggle.animation_duration_millis = millis;
        self.shared
            .view
            .style
            .set_style("transition", Some(&transition_style(millis)));
    }

    /// Fixed cross-axis size of the expanded content. 0 means natural size.
    pub fn set_fixed_content_size(&self, pixels: u32) {
        self.shared.lock().fixed_content_size = pixels;
    }

    /// Stacking order of tab, content and wrapper (default 9990).
    pub fn set_z_index(&self, z_index: i32) {
        self.shared.lock().z_index = z_index;
        self.shared
            .view
            .style
            .set_style("z-index", Some(&z_index.to_string()));
    }

    /// By default an expanded tab stays open when the user clicks elsewhere.
    /// With auto collapse enabled, such a click collapses it.
    pub fn set_auto_collapse_on_outside_click(&self, enabled: bool) {
        self.shared.lock().toggle.auto_collapse_on_outside_click = enabled;
    }

    /// Allow or forbid expanding and collapsing. The content stays enabled.
    pub fn set_toggle_enabled(&self, enabled: bool) {
        self.shared.lock().toggle.toggle_enabled = enabled;
    }

    /// Show or hide the clickable tab.
    pub fn set_tab_visible(&self, visible: bool) {
        self.shared.lock().tab_visible = visible;
        self.shared
            .view
            .style
            .set_class_name(TAB_HIDDEN_CLASS, !visible);
    }

    /// Add an extra style class name to the host.
    pub fn add_class_name(&self, name: &str) -> Result<(), ConfigError> {
        validate_style_name(name)?;
        if self.shared.lock().style_names.insert(name.to_string()) {
            self.shared.view.style.set_class_name(name, true);
        }
        Ok(())
    }

    /// Returns false if the class name was not set.
    pub fn remove_class_name(&self, name: &str) -> bool {
        let removed = self.shared.lock().style_names.remove(name);
        if removed {
            self.shared.view.style.set_class_name(name, false);
        }
        removed
    }

    /// Width of the host in pixels. `None` clears it.
    pub fn set_width(&self, pixels: Option<u32>) {
        self.shared
            .view
            .size
            .set_size(Part::Host, Dimension::Width, pixels);
    }

    /// Height of the host in pixels. `None` clears it.
    pub fn set_height(&self, pixels: Option<u32>) {
        self.shared
            .view
            .size
            .set_size(Part::Host, Dimension::Height, pixels);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Expand the content. Returns true if the transition was accepted.
    pub fn expand(&self) -> bool {
        self.transition(Target::Expand, false, None)
    }

    /// Collapse the content. Returns true if the transition was accepted.
    pub fn collapse(&self) -> bool {
        self.transition(Target::Collapse, false, None)
    }

    /// Collapse when expanded, expand otherwise.
    pub fn toggle(&self) -> bool {
        self.transition(Target::Flip, false, None)
    }

    /// Change to `expanded` unless already there.
    ///
    /// With `animated` false this one transition renders with a zero
    /// duration. The configured duration is left untouched; the view's
    /// `transition` style is re-asserted from it afterwards.
    pub fn set_expanded(&self, expanded: bool, animated: bool) -> bool {
        if let Err(rejection) = self.shared.lock().toggle.check(expanded) {
            trace!("{}: set_expanded({}) rejected: {:?}", self.id(), expanded, rejection);
            return false;
        }
        if animated {
            return self.transition(Self::target(expanded), false, None);
        }

        let style = &self.shared.view.style;
        style.set_style("transition", Some(&transition_style(0)));
        let accepted = self.transition(Self::target(expanded), false, Some(0));
        // A listener may have changed the duration during the transition.
        style.set_style("transition", Some(&transition_style(self.animation_duration())));
        accepted
    }

    /// Collapse in response to a click outside the panel.
    ///
    /// Only honored when auto collapse is enabled and the tab is expanded;
    /// never expands.
    pub fn on_outside_clicked(&self) -> bool {
        if !self.shared.lock().toggle.collapses_on_outside_click() {
            trace!("{}: outside click ignored", self.id());
            return false;
        }
        self.transition(Target::Collapse, true, None)
    }

    fn target(expanded: bool) -> Target {
        if expanded {
            Target::Expand
        } else {
            Target::Collapse
        }
    }

    fn transition(
        &self,
        target: Target,
        from_client: bool,
        animation_millis: Option<u32>,
    ) -> bool {
        let (expanded, instruction) = {
            let mut state = self.shared.lock();
            let expanded = match target {
                Target::Expand => true,
                Target::Collapse => false,
                Target::Flip => !state.toggle.expanded,
            };
            if let Err(rejection) = state.toggle.apply(expanded) {
                trace!("{}: {:?} rejected: {:?}", self.id(), target, rejection);
                return false;
            }
            let kind = if expanded {
                RenderKind::Expand
            } else {
                RenderKind::Collapse
            };
            let mut instruction = state.instruction(kind, self.shared.mode);
            if let Some(millis) = animation_millis {
                instruction.animation_millis = millis;
            }
            (expanded, instruction)
        };

        debug!(
            "{}: {} (from_client={})",
            self.id(),
            if expanded { "expanded" } else { "collapsed" },
            from_client
        );
        self.shared.view.render.render(&instruction);
        self.notify(ToggleEvent::new(self.id(), from_client, expanded));
        true
    }

    fn notify(&self, event: ToggleEvent) {
        let report = self.shared.hub.dispatch(&event);
        for failure in report.failures {
            let error = ListenerError {
                widget: self.id(),
                listener: failure.listener,
                message: failure.message,
            };
            if let Some(hook) = &self.shared.on_listener_error {
                hook(&error);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Attachment
    // -------------------------------------------------------------------------

    /// Called by the host when the widget joins the live view.
    ///
    /// The rendered view may have lost its state while detached, so an
    /// expanded tab is told to expand again. No event is fired for this.
    pub fn attach(&self) {
        let instruction = {
            let mut state = self.shared.lock();
            if state.attached {
                return;
            }
            state.attached = true;
            if !state.toggle.expanded {
                return;
            }
            state.instruction(RenderKind::ResyncExpand, self.shared.mode)
        };
        debug!("{}: attached, re-asserting expanded state", self.id());
        self.shared.view.render.render(&instruction);
    }

    /// Called by the host when the widget leaves the live view.
    ///
    /// A deferred command firing while detached is skipped.
    pub fn detach(&self) {
        self.shared.lock().attached = false;
        debug!("{}: detached", self.id());
    }

    // -------------------------------------------------------------------------
    // Deferred commands
    // -------------------------------------------------------------------------

    /// Schedule `command` after `delay`, replacing any pending command.
    pub fn schedule(&self, command: TabCommand, delay: Duration) -> Result<(), ScheduleError> {
        let (generation, cancel) = self.shared.lock().pending.replace();
        let task = TabTask {
            command,
            generation,
            cancel: cancel.clone(),
            target: Arc::downgrade(&self.shared),
        };

        debug!("{}: scheduled {:?} in {:?}", self.id(), command, delay);
        if let Err(err) = self.shared.strategy.schedule(task, delay) {
            self.shared.release_pending(generation);
            cancel.cancel();
            return Err(err);
        }
        Ok(())
    }

    /// Schedule `set_expanded(value, animated)` in `delay_millis` milliseconds.
    pub fn schedule_set_expanded(
        &self,
        value: bool,
        animated: bool,
        delay_millis: u64,
    ) -> Result<(), ScheduleError> {
        self.schedule(
            TabCommand::SetExpanded {
                expanded: value,
                animated,
            },
            Duration::from_millis(delay_millis),
        )
    }

    /// Schedule a toggle. The direction is decided when it fires.
    pub fn schedule_toggle(&self, delay_millis: u64) -> Result<(), ScheduleError> {
        self.schedule(TabCommand::Toggle, Duration::from_millis(delay_millis))
    }

    /// Schedule a collapse in `delay_millis` milliseconds.
    pub fn schedule_collapse(&self, delay_millis: u64) -> Result<(), ScheduleError> {
        self.schedule(TabCommand::Collapse, Duration::from_millis(delay_millis))
    }

    /// Schedule an expand in `delay_millis` milliseconds.
    pub fn schedule_expand(&self, delay_millis: u64) -> Result<(), ScheduleError> {
        self.schedule(TabCommand::Expand, Duration::from_millis(delay_millis))
    }

    /// Entry point of a fired [`TabTask`], on the owner context.
    pub(crate) fn run_task(&self, generation: u64, command: TabCommand) {
        {
            let mut state = self.shared.lock();
            if !state.pending.release(generation) {
                debug!("{}: {:?} was superseded, skipping", self.id(), command);
                return;
            }
            if !state.attached {
                debug!("{}: detached, skipping {:?}", self.id(), command);
                return;
            }
        }

        debug!("{}: running deferred {:?}", self.id(), command);
        match command {
            TabCommand::SetExpanded { expanded, animated } => {
                self.set_expanded(expanded, animated);
            }
            TabCommand::Expand => {
                self.expand();
            }
            TabCommand::Collapse => {
                self.collapse();
            }
            TabCommand::Toggle => {
                self.toggle();
            }
        }
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener for accepted transitions.
    pub fn add_toggle_listener<F>(&self, listener: F) -> Registration
    where
        F: Fn(&ToggleEvent) + Send + Sync + 'static,
    {
        self.shared.hub.add_listener(listener)
    }
}

impl ClientSignals for SlideTab {
    fn tab_clicked(&self) {
        self.transition(Target::Flip, true, None);
    }

    fn outside_clicked(&self) {
        self.on_outside_clicked();
    }
}

impl std::fmt::Debug for SlideTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideTab")
            .field("id", &self.shared.id)
            .field("content", &self.shared.content)
            .field("mode", &self.shared.mode)
            .field("state", &*self.shared.lock())
            .finish_non_exhaustive()
    }
}

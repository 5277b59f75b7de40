//! Toggle state owned by a slide tab.

use uuid::Uuid;

/// Unique identifier for a slide tab instance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SlideTabId(Uuid);

impl SlideTabId {
    /// Create a new unique slide tab ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SlideTabId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SlideTabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__slide_tab_{}", self.0)
    }
}

/// Why a transition request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Toggling is disabled.
    Disabled,
    /// The tab is already in the requested state.
    Unchanged,
}

/// Logical expanded/collapsed state plus the flags that guard transitions.
///
/// `expanded` is the single source of truth. It is never derived from what
/// the view currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleState {
    /// Current logical state.
    pub(crate) expanded: bool,
    /// When false every transition is a no-op.
    pub(crate) toggle_enabled: bool,
    /// Whether an outside click collapses an expanded tab.
    pub(crate) auto_collapse_on_outside_click: bool,
    /// Render hint, passed through to the view untouched.
    pub(crate) animation_duration_millis: u32,
}

impl ToggleState {
    /// Create a toggle state from its flags and animation duration.
    pub fn new(
        expanded: bool,
        toggle_enabled: bool,
        auto_collapse_on_outside_click: bool,
        animation_duration_millis: u32,
    ) -> Self {
        Self {
            expanded,
            toggle_enabled,
            auto_collapse_on_outside_click,
            animation_duration_millis,
        }
    }

    /// Current logical state.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether transitions are allowed.
    pub fn is_toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    /// Whether an outside click collapses an expanded tab.
    pub fn is_auto_collapse_on_outside_click(&self) -> bool {
        self.auto_collapse_on_outside_click
    }

    /// Animation duration in milliseconds.
    pub fn animation_duration_millis(&self) -> u32 {
        self.animation_duration_millis
    }

    /// Check whether a transition to `target` would be accepted.
    pub fn check(&self, target: bool) -> Result<(), Rejection> {
        if !self.toggle_enabled {
            return Err(Rejection::Disabled);
        }
        if self.expanded == target {
            return Err(Rejection::Unchanged);
        }
        Ok(())
    }

    /// Apply a transition to `target` if the guards allow it.
    pub(crate) fn apply(&mut self, target: bool) -> Result<(), Rejection> {
        self.check(target)?;
        self.expanded = target;
        Ok(())
    }

    /// Whether an outside click should collapse the tab right now.
    pub fn collapses_on_outside_click(&self) -> bool {
        self.auto_collapse_on_outside_click && self.expanded
    }
}

impl Default for ToggleState {
    fn default() -> Self {
        Self::new(false, true, false, crate::config::DEFAULT_ANIMATION_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_flips_once() {
        let mut state = ToggleState::default();
        assert_eq!(state.apply(true), Ok(()));
        assert!(state.is_expanded());
        assert_eq!(state.apply(true), Err(Rejection::Unchanged));
        assert!(state.is_expanded());
    }

    #[test]
    fn test_disabled_rejects_before_unchanged() {
        let mut state = ToggleState::new(false, false, true, 500);
        assert_eq!(state.apply(false), Err(Rejection::Disabled));
        assert_eq!(state.apply(true), Err(Rejection::Disabled));
        assert!(!state.is_expanded());
    }
}

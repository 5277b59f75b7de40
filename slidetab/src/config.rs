//! Slide tab configuration types.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default animation duration in milliseconds.
pub const DEFAULT_ANIMATION_DURATION_MS: u32 = 500;

/// Default z-index of the tab, its content and wrapper.
pub const DEFAULT_Z_INDEX: i32 = 9990;

/// Default height of the clickable tab in pixels.
pub const DEFAULT_TAB_SIZE: u32 = 40;

/// Axis along which the content panel grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// The edge the content panel slides out from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideMode {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl SlideMode {
    pub const ALL: [SlideMode; 4] = [
        SlideMode::Top,
        SlideMode::Bottom,
        SlideMode::Left,
        SlideMode::Right,
    ];

    /// Top and bottom slides grow vertically, left and right horizontally.
    pub fn is_vertical(self) -> bool {
        matches!(self, SlideMode::Top | SlideMode::Bottom)
    }

    pub fn orientation(self) -> Orientation {
        if self.is_vertical() {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Style class the host uses to position the tab on its edge.
    pub fn class_name(self) -> &'static str {
        match self {
            SlideMode::Top => "top",
            SlideMode::Bottom => "bottom",
            SlideMode::Left => "left",
            SlideMode::Right => "right",
        }
    }
}

/// Alignment of the clickable tab along its edge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TabPosition {
    Beginning,
    #[default]
    Middle,
    End,
}

impl TabPosition {
    pub const ALL: [TabPosition; 3] = [TabPosition::Beginning, TabPosition::Middle, TabPosition::End];

    pub fn class_name(self) -> &'static str {
        match self {
            TabPosition::Beginning => "beginning",
            TabPosition::Middle => "middle",
            TabPosition::End => "end",
        }
    }
}

/// Opaque reference to the component shown inside the content panel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for ContentRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ContentRef {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ContentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-instance slide tab configuration.
///
/// Plain data: it can be loaded from JSON and handed to
/// [`SlideTabBuilder::from_config`](crate::SlideTabBuilder::from_config).
/// Every field has a default, so partial documents are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideTabConfig {
    /// Caption text of the tab.
    pub caption: String,

    /// Edge the content slides out from.
    pub mode: SlideMode,

    /// Alignment of the tab along its edge.
    pub tab_position: TabPosition,

    /// Height of the tab in pixels.
    pub tab_size: u32,

    /// Fixed cross-axis size of the expanded content. 0 means natural sizing.
    pub fixed_content_size: u32,

    /// Expand/collapse animation duration in milliseconds.
    pub animation_duration_millis: u32,

    /// Stacking order, so several tabs can lie above one another.
    pub z_index: i32,

    /// Collapse an expanded tab when the user clicks somewhere else.
    pub auto_collapse_on_outside_click: bool,

    /// Whether the clickable tab is shown at all.
    pub tab_visible: bool,

    /// When false the tab ignores every expand/collapse request.
    /// The content itself stays enabled.
    pub toggle_enabled: bool,

    /// State the tab starts in.
    pub expanded: bool,

    /// Extra style class names added to the host element.
    pub style_names: Vec<String>,
}

impl Default for SlideTabConfig {
    fn default() -> Self {
        Self {
            caption: String::new(),
            mode: SlideMode::default(),
            tab_position: TabPosition::default(),
            tab_size: DEFAULT_TAB_SIZE,
            fixed_content_size: 0,
            animation_duration_millis: DEFAULT_ANIMATION_DURATION_MS,
            z_index: DEFAULT_Z_INDEX,
            auto_collapse_on_outside_click: false,
            tab_visible: true,
            toggle_enabled: true,
            expanded: false,
            style_names: Vec::new(),
        }
    }
}

impl SlideTabConfig {
    /// Create a config with the given caption and defaults elsewhere.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            ..Default::default()
        }
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the view cannot apply.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for name in &self.style_names {
            validate_style_name(name)?;
        }
        Ok(())
    }

    /// Value of the `transition` style that drives the animation.
    pub fn transition_style(&self) -> String {
        transition_style(self.animation_duration_millis)
    }
}

pub(crate) fn transition_style(duration_millis: u32) -> String {
    format!("height {0}ms, width {0}ms", duration_millis)
}

/// A style class name must be non-empty and free of whitespace.
pub(crate) fn validate_style_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidStyleName {
            name: name.to_string(),
        });
    }
    Ok(())
}

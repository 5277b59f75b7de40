//! Tests for configuration defaults, JSON loading and validation.

use slidetab::config::{DEFAULT_ANIMATION_DURATION_MS, DEFAULT_TAB_SIZE, DEFAULT_Z_INDEX};
use slidetab::owner;
use slidetab::prelude::*;

#[test]
fn test_defaults() {
    let config = SlideTabConfig::default();

    assert_eq!(config.mode, SlideMode::Top);
    assert_eq!(config.tab_position, TabPosition::Middle);
    assert_eq!(config.tab_size, DEFAULT_TAB_SIZE);
    assert_eq!(config.fixed_content_size, 0);
    assert_eq!(config.animation_duration_millis, DEFAULT_ANIMATION_DURATION_MS);
    assert_eq!(config.z_index, DEFAULT_Z_INDEX);
    assert!(!config.auto_collapse_on_outside_click);
    assert!(config.tab_visible);
    assert!(config.toggle_enabled);
    assert!(!config.expanded);
    assert!(config.style_names.is_empty());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let config = SlideTabConfig::from_json(
        r#"{ "caption": "Filters", "mode": "right", "tab_position": "end" }"#,
    )
    .unwrap();

    assert_eq!(config.caption, "Filters");
    assert_eq!(config.mode, SlideMode::Right);
    assert_eq!(config.tab_position, TabPosition::End);
    assert_eq!(config.animation_duration_millis, 500);
    assert_eq!(config.z_index, 9990);
    assert!(config.toggle_enabled);
}

#[test]
fn test_json_round_trip_uses_lowercase_names() {
    let mut config = SlideTabConfig::new("Caption");
    config.mode = SlideMode::Bottom;
    config.tab_position = TabPosition::Beginning;

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""mode":"bottom""#));
    assert!(json.contains(r#""tab_position":"beginning""#));
    assert_eq!(SlideTabConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let result = SlideTabConfig::from_json(r#"{ "mode": "diagonal" }"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));

    let result = SlideTabConfig::from_json("not json");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_style_name_rejected() {
    let result = SlideTabConfig::from_json(r#"{ "style_names": ["ok", "two words"] }"#);
    match result {
        Err(ConfigError::InvalidStyleName { name }) => assert_eq!(name, "two words"),
        other => panic!("unexpected result: {other:?}"),
    }

    let (handle, _owner_loop) = owner::channel();
    let result = SlideTabBuilder::new("content", "Caption")
        .style_name("")
        .build(RecordingView::new(), handle);
    assert!(matches!(result, Err(ConfigError::InvalidStyleName { .. })));
}

#[test]
fn test_missing_content_rejected() {
    let (handle, _owner_loop) = owner::channel();
    let result = SlideTabBuilder::new("  ", "Caption").build(RecordingView::new(), handle);

    assert!(matches!(result, Err(ConfigError::MissingContent)));
}

#[test]
fn test_builder_from_loaded_config() {
    let config = SlideTabConfig::from_json(
        r#"{ "caption": "Log", "mode": "left", "expanded": true, "z_index": 100 }"#,
    )
    .unwrap();
    let (handle, _owner_loop) = owner::channel();
    let tab = SlideTabBuilder::from_config("log-panel", config)
        .build(RecordingView::new(), handle)
        .unwrap();

    assert_eq!(tab.content().as_str(), "log-panel");
    assert_eq!(tab.caption(), "Log");
    assert_eq!(tab.slide_mode(), SlideMode::Left);
    assert_eq!(tab.z_index(), 100);
    assert!(tab.is_expanded());
}

#[test]
fn test_slide_mode_orientation() {
    assert_eq!(SlideMode::Top.orientation(), Orientation::Vertical);
    assert_eq!(SlideMode::Bottom.orientation(), Orientation::Vertical);
    assert_eq!(SlideMode::Left.orientation(), Orientation::Horizontal);
    assert_eq!(SlideMode::Right.orientation(), Orientation::Horizontal);
}

#[test]
fn test_transition_style() {
    let mut config = SlideTabConfig::default();
    config.animation_duration_millis = 250;

    assert_eq!(config.transition_style(), "height 250ms, width 250ms");
}

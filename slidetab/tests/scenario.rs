//! End-to-end scenarios: a host driving a slide tab through clicks and
//! deferred commands.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use slidetab::owner::{self, OwnerLoop};
use slidetab::prelude::*;
use tokio::time::sleep;

struct Host {
    tab: SlideTab,
    view: RecordingView,
    owner_loop: OwnerLoop,
    events: Arc<Mutex<Vec<ToggleEvent>>>,
}

impl Host {
    fn new(builder: SlideTabBuilder) -> Self {
        let (handle, owner_loop) = owner::channel();
        let view = RecordingView::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let tab = builder
            .listener(move |event| sink.lock().unwrap().push(*event))
            .build(view.clone(), handle)
            .expect("valid config");
        tab.attach();
        Self {
            tab,
            view,
            owner_loop,
            events,
        }
    }

    fn events(&self) -> Vec<(bool, bool)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| (e.expanded, e.from_client))
            .collect()
    }

    async fn advance(&mut self, millis: u64) {
        sleep(Duration::from_millis(millis)).await;
        self.owner_loop.run_pending();
    }
}

#[tokio::test(start_paused = true)]
async fn test_user_session() {
    let mut host = Host::new(
        SlideTabBuilder::new("details", "Click to expand")
            .mode(SlideMode::Right)
            .tab_position(TabPosition::End)
            .auto_collapse_on_outside_click(true),
    );

    // Outside click with the tab collapsed does nothing.
    host.tab.outside_clicked();
    assert!(host.events().is_empty());

    host.tab.tab_clicked();
    assert!(host.tab.is_expanded());

    host.tab.outside_clicked();
    assert!(!host.tab.is_expanded());

    host.tab.toggle();
    host.tab.schedule_collapse(200).unwrap();
    host.advance(100).await;
    assert!(host.tab.is_expanded());
    host.advance(200).await;
    assert!(!host.tab.is_expanded());

    assert_eq!(
        host.events(),
        vec![(true, true), (false, true), (true, false), (false, false)]
    );

    let instructions = host.view.instructions();
    assert_eq!(instructions.len(), 4);
    assert!(
        instructions
            .iter()
            .all(|i| i.orientation == Orientation::Horizontal)
    );
    assert!(host.view.has_class("right"));
    assert!(host.view.has_class("end"));
}

#[tokio::test(start_paused = true)]
async fn test_toggle_outside_click_then_deferred_commands() {
    let mut host = Host::new(
        SlideTabBuilder::new("details", "Click to expand")
            .mode(SlideMode::Right)
            .tab_position(TabPosition::End)
            .auto_collapse_on_outside_click(true),
    );
    host.view.clear();

    assert!(host.tab.toggle());
    assert_eq!(host.events(), vec![(true, false)]);
    let instructions = host.view.instructions();
    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].kind, RenderKind::Expand);

    assert!(host.tab.on_outside_clicked());
    assert_eq!(host.events(), vec![(true, false), (false, true)]);
    assert!(!host.tab.is_expanded());

    host.tab.schedule_expand(500).unwrap();
    host.tab.schedule_toggle(100).unwrap();

    host.advance(150).await;
    assert!(host.tab.is_expanded());

    host.advance(1000).await;
    assert!(host.tab.is_expanded());
    assert!(!host.tab.has_pending_command());
    assert_eq!(
        host.events(),
        vec![(true, false), (false, true), (true, false)]
    );
    let kinds: Vec<RenderKind> = host.view.instructions().iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![RenderKind::Expand, RenderKind::Collapse, RenderKind::Expand]
    );
}

#[tokio::test(start_paused = true)]
async fn test_later_schedule_wins() {
    let mut host = Host::new(SlideTabBuilder::new("details", "Caption"));

    host.tab.schedule_expand(500).unwrap();
    host.tab.schedule_toggle(100).unwrap();

    host.advance(150).await;
    assert!(host.tab.is_expanded());

    host.advance(1000).await;
    assert!(host.tab.is_expanded());
    assert_eq!(host.events(), vec![(true, false)]);
}

#[tokio::test(start_paused = true)]
async fn test_disabled_tab_ignores_everything() {
    let mut host = Host::new(
        SlideTabBuilder::new("details", "Caption")
            .toggle_enabled(false)
            .auto_collapse_on_outside_click(true),
    );

    host.tab.tab_clicked();
    host.tab.expand();
    host.tab.schedule_expand(10).unwrap();
    host.advance(50).await;

    assert!(!host.tab.is_expanded());
    assert!(host.events().is_empty());
    assert!(host.view.instructions().is_empty());

    host.tab.set_toggle_enabled(true);
    host.tab.tab_clicked();
    assert_eq!(host.events(), vec![(true, true)]);
}

#[tokio::test(start_paused = true)]
async fn test_reattach_after_remount() {
    let mut host = Host::new(SlideTabBuilder::new("details", "Caption").fixed_content_size(320));

    host.tab.expand();
    host.tab.detach();
    host.tab.schedule_collapse(10).unwrap();
    host.advance(50).await;
    assert!(host.tab.is_expanded());

    host.view.clear();
    host.tab.attach();

    let instructions = host.view.instructions();
    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].kind, RenderKind::ResyncExpand);
    assert_eq!(instructions[0].size_hint, 320);
    assert_eq!(host.events(), vec![(true, false)]);
}

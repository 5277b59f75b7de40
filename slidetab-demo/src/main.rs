mod log_view;

use std::time::Duration;

use log::{LevelFilter, error, info, warn};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use slidetab::owner::{self, OwnerHandle};
use slidetab::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::log_view::LogView;

/// Delay between scripted steps when none is given on the command line.
const DEFAULT_STEP_MILLIS: u64 = 800;

fn log_level() -> LevelFilter {
    std::env::var("SLIDETAB_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn build_tab(
    owner: &OwnerHandle,
    name: &'static str,
    mode: SlideMode,
) -> Result<SlideTab, ConfigError> {
    let tab = SlideTabBuilder::new(format!("{name}-content"), format!("{name} panel"))
        .mode(mode)
        .tab_position(TabPosition::End)
        .fixed_content_size(if mode.is_vertical() { 240 } else { 0 })
        .auto_collapse_on_outside_click(true)
        .style_name("demo-tab")
        .listener(move |event| {
            if event.expanded {
                info!("{name}: Panel expanded! (from client: {})", event.from_client);
            } else {
                info!("{name}: Panel collapsed! (from client: {})", event.from_client);
            }
        })
        .on_listener_error(|err| error!("{}", err))
        .build(View::from_host(LogView::new(name)), owner.clone())?;
    tab.attach();
    Ok(tab)
}

/// Run `f` on the owner context, as a client event would.
fn on_owner<F>(owner: &OwnerHandle, f: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(err) = owner.post(f) {
        warn!("Dropping client event: {}", err);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    TermLogger::init(
        log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let step_millis: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_STEP_MILLIS);
    let step = Duration::from_millis(step_millis);

    let (owner, owner_loop) = owner::channel();
    let shutdown = CancellationToken::new();
    let owner_task = tokio::spawn(owner_loop.run_until(shutdown.clone()));

    let top = build_tab(&owner, "top", SlideMode::Top)?;
    let right = build_tab(&owner, "right", SlideMode::Right)?;
    let bottom = build_tab(&owner, "bottom", SlideMode::Bottom)?;
    let left = build_tab(&owner, "left", SlideMode::Left)?;

    info!("Clicking the top and right tabs");
    for tab in [&top, &right] {
        let tab = tab.clone();
        on_owner(&owner, move || tab.tab_clicked());
    }
    tokio::time::sleep(step).await;

    info!("Clicking outside: auto collapse closes the expanded tabs");
    for tab in [&top, &right, &bottom, &left] {
        let tab = tab.clone();
        on_owner(&owner, move || tab.outside_clicked());
    }
    tokio::time::sleep(step).await;

    let expand_after = step_millis.saturating_mul(2);
    info!("Scheduling the bottom tab open in {}ms, toggling it sooner", expand_after);
    bottom.schedule_expand(expand_after)?;
    bottom.schedule_toggle(step_millis / 2)?;
    left.schedule_set_expanded(true, false, step_millis)?;
    tokio::time::sleep(step.saturating_mul(3)).await;

    info!(
        "bottom expanded: {}, left expanded: {}",
        bottom.is_expanded(),
        left.is_expanded()
    );

    shutdown.cancel();
    owner_task.await?;
    Ok(())
}

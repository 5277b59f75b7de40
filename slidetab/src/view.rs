//! View capabilities a slide tab drives.
//!
//! The controller never touches the rendered view directly. It talks to three
//! narrow capabilities the host implements:
//!
//! - [`RenderGateway`] receives expand/collapse instructions and the caption
//! - [`Styleable`] toggles style class names and style properties
//! - [`Sizeable`] sets pixel sizes of the host, the tab and the content
//!
//! [`View`] bundles them. A host that implements all three can be passed as a
//! single value with [`View::from_host`].

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Orientation;

/// Which render function the host should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Expand after an accepted transition.
    Expand,
    /// Collapse after an accepted transition.
    Collapse,
    /// Re-assert the expanded state after the view was (re-)attached.
    ResyncExpand,
}

impl RenderKind {
    /// Name of the client-side function.
    pub fn function_name(self) -> &'static str {
        match self {
            RenderKind::Expand | RenderKind::ResyncExpand => "expand",
            RenderKind::Collapse => "collapse",
        }
    }

    pub fn expands(self) -> bool {
        !matches!(self, RenderKind::Collapse)
    }
}

/// A single render instruction sent to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderInstruction {
    pub kind: RenderKind,
    /// Fixed content size in pixels; 0 lets the view measure the content.
    pub size_hint: u32,
    pub orientation: Orientation,
    /// Animation duration in effect for this instruction.
    pub animation_millis: u32,
}

/// Part of the widget a size applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Part {
    Host,
    Tab,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

/// Receives render instructions for the client side.
pub trait RenderGateway: Send + Sync {
    fn render(&self, instruction: &RenderInstruction);

    fn set_caption(&self, caption: &str);
}

/// Style class names and style properties of the host element.
pub trait Styleable: Send + Sync {
    fn set_class_name(&self, name: &str, set: bool);

    /// Set a style property. `None` removes it.
    fn set_style(&self, property: &str, value: Option<&str>);
}

/// Pixel sizes of the parts of the widget. `None` clears a size.
pub trait Sizeable: Send + Sync {
    fn set_size(&self, part: Part, dimension: Dimension, pixels: Option<u32>);
}

/// The capabilities of one rendered slide tab.
#[derive(Clone)]
pub struct View {
    pub(crate) render: Arc<dyn RenderGateway>,
    pub(crate) style: Arc<dyn Styleable>,
    pub(crate) size: Arc<dyn Sizeable>,
}

impl View {
    /// Build a view from three separate capabilities.
    pub fn new(
        render: Arc<dyn RenderGateway>,
        style: Arc<dyn Styleable>,
        size: Arc<dyn Sizeable>,
    ) -> Self {
        Self {
            render,
            style,
            size,
        }
    }

    /// Build a view from one host value that implements every capability.
    pub fn from_host<H>(host: H) -> Self
    where
        H: RenderGateway + Styleable + Sizeable + 'static,
    {
        let host = Arc::new(host);
        Self {
            render: host.clone(),
            style: host.clone(),
            size: host,
        }
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View").finish_non_exhaustive()
    }
}

// =============================================================================
// RecordingView
// =============================================================================

/// One call a [`RecordingView`] received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Render(RenderInstruction),
    Caption(String),
    ClassName { name: String, set: bool },
    Style { property: String, value: Option<String> },
    Size { part: Part, dimension: Dimension, pixels: Option<u32> },
}

/// Headless view that records every call it receives.
///
/// Clones share the same record, so one clone can be handed to the slide tab
/// while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    calls: Arc<Mutex<Vec<ViewCall>>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ViewCall>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, call: ViewCall) {
        self.lock().push(call);
    }

    /// Every call in the order received.
    pub fn calls(&self) -> Vec<ViewCall> {
        self.lock().clone()
    }

    /// Only the render instructions, in order.
    pub fn instructions(&self) -> Vec<RenderInstruction> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                ViewCall::Render(instruction) => Some(*instruction),
                _ => None,
            })
            .collect()
    }

    /// Whether the class name is currently set, replaying the record.
    pub fn has_class(&self, name: &str) -> bool {
        self.lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                ViewCall::ClassName { name: n, set } if n == name => Some(*set),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Current value of a style property, replaying the record.
    pub fn style(&self, property: &str) -> Option<String> {
        self.lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                ViewCall::Style { property: p, value } if p == property => Some(value.clone()),
                _ => None,
            })
            .flatten()
    }

    /// Last caption pushed to the view.
    pub fn caption(&self) -> Option<String> {
        self.lock().iter().rev().find_map(|call| match call {
            ViewCall::Caption(caption) => Some(caption.clone()),
            _ => None,
        })
    }

    /// Current size of a part, replaying the record.
    pub fn size(&self, part: Part, dimension: Dimension) -> Option<u32> {
        self.lock()
            .iter()
            .rev()
            .find_map(|call| match call {
                ViewCall::Size {
                    part: p,
                    dimension: d,
                    pixels,
                } if *p == part && *d == dimension => Some(*pixels),
                _ => None,
            })
            .flatten()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl RenderGateway for RecordingView {
    fn render(&self, instruction: &RenderInstruction) {
        self.push(ViewCall::Render(*instruction));
    }

    fn set_caption(&self, caption: &str) {
        self.push(ViewCall::Caption(caption.to_string()));
    }
}

impl Styleable for RecordingView {
    fn set_class_name(&self, name: &str, set: bool) {
        self.push(ViewCall::ClassName {
            name: name.to_string(),
            set,
        });
    }

    fn set_style(&self, property: &str, value: Option<&str>) {
        self.push(ViewCall::Style {
            property: property.to_string(),
            value: value.map(str::to_string),
        });
    }
}

impl Sizeable for RecordingView {
    fn set_size(&self, part: Part, dimension: Dimension, pixels: Option<u32>) {
        self.push(ViewCall::Size {
            part,
            dimension,
            pixels,
        });
    }
}

impl From<RecordingView> for View {
    fn from(view: RecordingView) -> Self {
        View::from_host(view)
    }
}

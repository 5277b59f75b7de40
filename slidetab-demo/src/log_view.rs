use log::info;
use slidetab::prelude::*;

/// A view that renders by logging what a client would do.
pub struct LogView {
    name: &'static str,
}

impl LogView {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl RenderGateway for LogView {
    fn render(&self, instruction: &RenderInstruction) {
        let size = match instruction.size_hint {
            0 => "natural size".to_string(),
            pixels => format!("{pixels}px"),
        };
        info!(
            "[{}] {}({:?}, {}) over {}ms",
            self.name,
            instruction.kind.function_name(),
            instruction.orientation,
            size,
            instruction.animation_millis
        );
    }

    fn set_caption(&self, caption: &str) {
        info!("[{}] caption: {:?}", self.name, caption);
    }
}

impl Styleable for LogView {
    fn set_class_name(&self, name: &str, set: bool) {
        if set {
            info!("[{}] +class {}", self.name, name);
        }
    }

    fn set_style(&self, property: &str, value: Option<&str>) {
        info!("[{}] style {}: {}", self.name, property, value.unwrap_or("<unset>"));
    }
}

impl Sizeable for LogView {
    fn set_size(&self, part: Part, dimension: Dimension, pixels: Option<u32>) {
        match pixels {
            Some(pixels) => info!("[{}] {:?} {:?} = {}px", self.name, part, dimension, pixels),
            None => info!("[{}] {:?} {:?} cleared", self.name, part, dimension),
        }
    }
}

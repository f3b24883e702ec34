//! Host element abstraction
//!
//! A widget is mounted inside a host element that owns a canvas. The host
//! reports its layout box and pixel density, sizes the canvas backing store
//! and carries presentation classes (`hidden`, `disabled`).

use cadence_core::{Point, Rect, Size};

use crate::error::{PlatformError, Result};

/// Host element trait
///
/// Implemented by platform-specific element types.
pub trait HostElement {
    /// Check if the element is attached to a document
    fn is_connected(&self) -> bool;

    /// Layout box in page coordinates
    fn bounding_rect(&self) -> Result<Rect>;

    /// Physical pixels per logical pixel
    fn device_pixel_ratio(&self) -> f32;

    /// Resize the canvas backing store, in physical pixels
    fn set_canvas_size(&mut self, width: u32, height: u32);

    /// Add or remove a presentation class
    fn set_class(&mut self, name: &str, enabled: bool);

    /// Check if a presentation class is set
    fn has_class(&self, name: &str) -> bool;

    /// Convert a page position to element-local coordinates
    fn to_local(&self, page: Point) -> Result<Point> {
        let rect = self.bounding_rect()?;
        Ok(Point::new(page.x - rect.x(), page.y - rect.y()))
    }
}

/// In-memory host for tests and headless rendering
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    connected: bool,
    rect: Rect,
    device_pixel_ratio: f32,
    canvas_size: (u32, u32),
    classes: Vec<String>,
    measure_error: Option<String>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self {
            connected: false,
            rect: Rect::ZERO,
            device_pixel_ratio: 1.0,
            canvas_size: (0, 0),
            classes: Vec::new(),
            measure_error: None,
        }
    }
}

impl HeadlessHost {
    /// Detached host with the given layout box
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Default::default()
        }
    }

    /// Set the device pixel ratio
    pub fn with_device_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Mark the element as inserted into a document
    pub fn attach(&mut self) {
        self.connected = true;
    }

    /// Mark the element as removed from its document
    pub fn detach(&mut self) {
        self.connected = false;
    }

    /// Move or resize the layout box
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Resize the layout box in place
    pub fn set_size(&mut self, size: Size) {
        self.rect.size = size;
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f32) {
        self.device_pixel_ratio = ratio;
    }

    /// Make subsequent measurements fail with `message`
    pub fn fail_measurement(&mut self, message: Option<String>) {
        self.measure_error = message;
    }

    /// Current canvas backing-store size
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas_size
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl HostElement for HeadlessHost {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn bounding_rect(&self) -> Result<Rect> {
        if !self.connected {
            return Err(PlatformError::Detached);
        }
        match &self.measure_error {
            Some(message) => Err(PlatformError::Measure(message.clone())),
            None => Ok(self.rect),
        }
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.canvas_size = (width, height);
    }

    fn set_class(&mut self, name: &str, enabled: bool) {
        let present = self.classes.iter().position(|c| c == name);
        match (present, enabled) {
            (None, true) => self.classes.push(name.to_string()),
            (Some(index), false) => {
                self.classes.remove(index);
            }
            _ => {}
        }
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }
}

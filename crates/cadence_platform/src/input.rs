//! Pointer input events
//!
//! Positions are in page coordinates. Consumers convert to element-local
//! coordinates with the host's bounding box.

use cadence_core::Point;

/// Pointer events delivered by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to position
    Moved {
        /// X position in page coordinates
        x: f32,
        /// Y position in page coordinates
        y: f32,
    },
    /// Pointer button pressed
    Pressed {
        /// Which button was pressed
        button: MouseButton,
        /// X position when pressed
        x: f32,
        /// Y position when pressed
        y: f32,
    },
    /// Pointer button released
    Released {
        /// Which button was released
        button: MouseButton,
        /// X position when released
        x: f32,
        /// Y position when released
        y: f32,
    },
    /// Press and release on the same element
    Clicked {
        /// Which button clicked
        button: MouseButton,
        /// X position of the click
        x: f32,
        /// Y position of the click
        y: f32,
    },
}

impl PointerEvent {
    /// Page position carried by the event
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Moved { x, y }
            | PointerEvent::Pressed { x, y, .. }
            | PointerEvent::Released { x, y, .. }
            | PointerEvent::Clicked { x, y, .. } => Point::new(x, y),
        }
    }

    /// Button involved, if any
    pub fn button(&self) -> Option<MouseButton> {
        match *self {
            PointerEvent::Moved { .. } => None,
            PointerEvent::Pressed { button, .. }
            | PointerEvent::Released { button, .. }
            | PointerEvent::Clicked { button, .. } => Some(button),
        }
    }

    /// Button release (ends a drag)
    pub fn is_release(&self) -> bool {
        matches!(self, PointerEvent::Released { .. })
    }
}

/// Mouse buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_position_and_button() {
        let press = PointerEvent::Pressed {
            button: MouseButton::Left,
            x: 10.0,
            y: 4.0,
        };
        assert_eq!(press.position(), Point::new(10.0, 4.0));
        assert_eq!(press.button(), Some(MouseButton::Left));
        assert!(!press.is_release());

        let moved = PointerEvent::Moved { x: 1.0, y: 2.0 };
        assert_eq!(moved.button(), None);
    }
}

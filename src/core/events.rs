//! Window event handling
//!
//! Hosts receive window events through the [`EventHandler`] capability
//! trait. Every hook has a no-op default, so an implementor only overrides
//! the hooks it cares about.
//!
//! Raw `winit` events are first narrowed into an [`EngineEvent`] and then
//! dispatched to the matching hook.
//!
//! # Example
//!
//! ```ignore
//! struct Overlay { visible: bool }
//!
//! impl EventHandler for Overlay {
//!     fn on_key(&mut self, key: KeyCode, pressed: bool) {
//!         if pressed && key == KeyCode::F3 {
//!             self.visible = !self.visible;
//!         }
//!     }
//! }
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

// ============================================================================
// Event Types
// ============================================================================

/// Window events the engine forwards to handlers
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum EngineEvent {
    /// The user asked to close the window
    CloseRequested,
    /// The window was resized
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// The window gained or lost focus
    Focused(bool),
    /// A key changed state
    Key {
        /// Physical key
        key: KeyCode,
        /// Pressed or released
        pressed: bool,
        /// Generated by key repeat
        repeat: bool,
    },
    /// A mouse button changed state
    MouseButton {
        /// The button
        button: MouseButton,
        /// Pressed or released
        pressed: bool,
    },
    /// The cursor moved, in window pixels
    MouseMoved(Vec2),
    /// Scroll wheel movement
    Scroll(Vec2),
}

impl EngineEvent {
    /// Narrow a `winit` window event. Returns `None` for events the engine
    /// does not forward.
    #[must_use]
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        let converted = match event {
            WindowEvent::CloseRequested => Self::CloseRequested,
            WindowEvent::Resized(size) => Self::Resized {
                width: size.width,
                height: size.height,
            },
            WindowEvent::Focused(focused) => Self::Focused(*focused),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return None;
                };
                Self::Key {
                    key,
                    pressed: event.state == ElementState::Pressed,
                    repeat: event.repeat,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => Self::MouseButton {
                button: *button,
                pressed: *state == ElementState::Pressed,
            },
            WindowEvent::CursorMoved { position, .. } => {
                Self::MouseMoved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseWheel { delta, .. } => Self::Scroll(match delta {
                MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                MouseScrollDelta::PixelDelta(pos) => Vec2::new(pos.x as f32, pos.y as f32),
            }),
            _ => return None,
        };
        Some(converted)
    }
}

// ============================================================================
// Handler Trait
// ============================================================================

/// Set of optional window event hooks
pub trait EventHandler {
    /// The window is about to close
    fn on_close(&mut self) {}

    /// The window was resized
    fn on_resize(&mut self, _width: u32, _height: u32) {}

    /// The window gained or lost focus
    fn on_focus(&mut self, _focused: bool) {}

    /// A key was pressed or released. Key repeats are not reported.
    fn on_key(&mut self, _key: KeyCode, _pressed: bool) {}

    /// A mouse button was pressed or released
    fn on_mouse_button(&mut self, _button: MouseButton, _pressed: bool) {}

    /// The cursor moved
    fn on_mouse_move(&mut self, _position: Vec2) {}

    /// The scroll wheel moved
    fn on_scroll(&mut self, _delta: Vec2) {}
}

/// Route an event to the matching hook
pub fn dispatch<H: EventHandler + ?Sized>(handler: &mut H, event: &EngineEvent) {
    match *event {
        EngineEvent::CloseRequested => handler.on_close(),
        EngineEvent::Resized { width, height } => handler.on_resize(width, height),
        EngineEvent::Focused(focused) => handler.on_focus(focused),
        EngineEvent::Key { repeat: true, .. } => {}
        EngineEvent::Key { key, pressed, .. } => handler.on_key(key, pressed),
        EngineEvent::MouseButton { button, pressed } => handler.on_mouse_button(button, pressed),
        EngineEvent::MouseMoved(position) => handler.on_mouse_move(position),
        EngineEvent::Scroll(delta) => handler.on_scroll(delta),
    }
}

/// Route a `winit` window event to the matching hook.
///
/// Returns the forwarded event, or `None` if the event was not forwarded.
pub fn dispatch_window_event<H: EventHandler + ?Sized>(
    handler: &mut H,
    event: &WindowEvent,
) -> Option<EngineEvent> {
    let event = EngineEvent::from_window_event(event)?;
    dispatch(handler, &event);
    Some(event)
}

// ============================================================================
// Tests
// ============================================================================

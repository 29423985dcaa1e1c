//! Input, application, time and script logging wrappers
//!
//! Thin views over the host's frame state. Each method is one host call.

use nebula_sdk::{KeyCode, LogLevel, MouseCode, Vector2};

use crate::bridge::Bridge;
use crate::entities::Entity;

/// Keyboard and mouse state for the current frame
#[derive(Clone, Copy)]
pub struct Input<'a> {
    bridge: &'a Bridge,
}

impl<'a> Input<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.bridge.host().is_key_down(key)
    }

    pub fn is_mouse_button_down(&self, button: MouseCode) -> bool {
        self.bridge.host().is_mouse_button_down(button)
    }

    /// Cursor position in window pixels
    pub fn mouse_position(&self) -> Vector2 {
        self.bridge.host().mouse_position()
    }
}

/// Window and viewport state
#[derive(Clone, Copy)]
pub struct Application<'a> {
    bridge: &'a Bridge,
}

impl<'a> Application<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn window_size(&self) -> Vector2 {
        self.bridge.host().window_size()
    }

    /// Entity under the cursor in the viewport
    pub fn hovered_entity(&self) -> Option<Entity> {
        Entity::from_handle(self.bridge, self.bridge.host().hovered_entity())
    }
}

#[derive(Clone, Copy)]
pub struct Time<'a> {
    bridge: &'a Bridge,
}

impl<'a> Time<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    /// Seconds elapsed during the current frame
    pub fn delta_time(&self) -> f32 {
        self.bridge.host().delta_time()
    }
}

/// Script log output, routed to the host's log
#[derive(Clone, Copy)]
pub struct Debug<'a> {
    bridge: &'a Bridge,
}

impl<'a> Debug<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub fn log(&self, message: &str) {
        self.bridge.host().log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.bridge.host().log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.bridge.host().log(LogLevel::Error, message);
    }
}

impl Bridge {
    pub fn input(&self) -> Input<'_> {
        Input::new(self)
    }

    pub fn application(&self) -> Application<'_> {
        Application::new(self)
    }

    pub fn time(&self) -> Time<'_> {
        Time::new(self)
    }

    pub fn debug(&self) -> Debug<'_> {
        Debug::new(self)
    }
}

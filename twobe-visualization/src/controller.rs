//! Pointer, wheel and key handling for the viewer

use crate::camera::CameraState;
use twobe_core::{Point2f, ScreenRect};

/// Side of the screenshot icon in pixels
pub const ICON_SIZE: f32 = 50.0;
/// Gap between the icon and the bottom-right window corner
pub const ICON_MARGIN: f32 = 10.0;

/// Window-independent input events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Point2f),
    PointerMove(Point2f),
    PointerUp,
    ScrollUp,
    ScrollDown,
    KeyOpen,
}

/// Requests the controller hands back to the viewer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    ScreenshotRequested,
    LoadModelRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { anchor: Point2f },
}

/// Screenshot icon rectangle for a viewport, top-left origin
pub fn icon_rect(width: u32, height: u32) -> ScreenRect {
    let inset = ICON_SIZE + ICON_MARGIN;
    ScreenRect::new(width as f32 - inset, height as f32 - inset, ICON_SIZE, ICON_SIZE)
}

/// Turns input events into camera changes and viewer commands
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: DragState,
    viewport: (u32, u32),
}

impl InteractionController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: DragState::Idle,
            viewport: (width, height),
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn icon_rect(&self) -> ScreenRect {
        icon_rect(self.viewport.0, self.viewport.1)
    }

    /// Apply one event; returns a command when the viewer has work to do
    pub fn handle(&mut self, event: InputEvent, camera: &mut CameraState) -> Option<ViewerCommand> {
        match event {
            InputEvent::PointerDown(position) => {
                if self.icon_rect().contains(position) {
                    self.state = DragState::Idle;
                    return Some(ViewerCommand::ScreenshotRequested);
                }
                self.state = DragState::Dragging { anchor: position };
            }
            InputEvent::PointerMove(position) => {
                if let DragState::Dragging { anchor } = self.state {
                    let delta = position - anchor;
                    camera.rotate(delta.x, delta.y);
                    self.state = DragState::Dragging { anchor: position };
                }
            }
            InputEvent::PointerUp => self.state = DragState::Idle,
            InputEvent::ScrollUp => camera.zoom_in(),
            InputEvent::ScrollDown => camera.zoom_out(),
            InputEvent::KeyOpen => return Some(ViewerCommand::LoadModelRequested),
        }
        None
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

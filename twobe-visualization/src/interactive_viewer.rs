//! Interactive model viewer window
//!
//! Owns the winit event loop, the renderer and the [`ViewerState`]. Window
//! events are translated into [`InputEvent`]s, and the commands the
//! controller returns (load a model, take a screenshot) run synchronously
//! inside the loop.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use winit::{
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::WindowBuilder,
};

use crate::camera::FrameView;
use crate::config::ViewerConfig;
use crate::controller::{InputEvent, ViewerCommand};
use crate::dialog::pick_model_file;
use crate::screenshot::{default_screenshot_dir, save_screenshot_now};
use crate::state::ViewerState;
use twobe_core::{Error, Point2f, Result};
use twobe_gpu::ModelRenderer;

/// Map a mouse button transition to an input event
pub fn button_event(button: MouseButton, state: ElementState, cursor: Point2f) -> Option<InputEvent> {
    match (button, state) {
        (MouseButton::Left, ElementState::Pressed) => Some(InputEvent::PointerDown(cursor)),
        (MouseButton::Left, ElementState::Released) => Some(InputEvent::PointerUp),
        _ => None,
    }
}

/// Map a wheel delta to a zoom event; positive y scrolls up
pub fn scroll_event(delta: MouseScrollDelta) -> Option<InputEvent> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(InputEvent::ScrollUp)
    } else if y < 0.0 {
        Some(InputEvent::ScrollDown)
    } else {
        None
    }
}

/// Map a pressed key to an input event
pub fn key_event(key: &Key) -> Option<InputEvent> {
    match key {
        Key::Character(c) if c.eq_ignore_ascii_case("o") => Some(InputEvent::KeyOpen),
        _ => None,
    }
}

/// Interactive single-model viewer
pub struct InteractiveViewer {
    config: ViewerConfig,
    state: ViewerState,
    cursor: Point2f,
}

impl InteractiveViewer {
    /// Create a new interactive viewer
    pub fn new(config: ViewerConfig) -> Self {
        let state = ViewerState::new(config.width, config.height);
        Self {
            config,
            state,
            cursor: Point2f::origin(),
        }
    }

    /// Ask for a model file and load it, falling back to the default cube
    fn load_model(&mut self, renderer: &mut ModelRenderer) {
        self.state.load_with(pick_model_file, |path| twobe_io::read_mesh(path));
        renderer.set_mesh(&self.state.mesh);
    }

    fn screenshot_dir(&self) -> Option<PathBuf> {
        self.config.screenshot_dir.clone().or_else(default_screenshot_dir)
    }

    fn take_screenshot(&self, renderer: &mut ModelRenderer) {
        let Some(dir) = self.screenshot_dir() else {
            error!("Cannot save screenshot: no home directory");
            return;
        };

        let frame = FrameView::new(&self.state.camera, self.state.aspect());
        renderer.update_view(frame.view_projection());

        match renderer.capture(None).and_then(|frame| save_screenshot_now(&frame, &dir)) {
            Ok(path) => info!("Screenshot saved to {}", path.display()),
            Err(e) => error!("Failed to save screenshot: {}", e),
        }
    }

    fn draw(&self, renderer: &mut ModelRenderer) {
        let (width, height) = renderer.size();
        if width == 0 || height == 0 {
            return;
        }

        let frame = FrameView::new(&self.state.camera, self.state.aspect());
        renderer.update_view(frame.view_projection());
        if let Err(e) = renderer.render(Some(self.state.controller.icon_rect())) {
            warn!("Render error: {}", e);
        }
    }

    /// Feed one input event through the controller and run any command it returns
    fn dispatch(&mut self, event: InputEvent, renderer: &mut ModelRenderer) {
        match self.state.handle_input(event) {
            Some(ViewerCommand::ScreenshotRequested) => self.take_screenshot(renderer),
            Some(ViewerCommand::LoadModelRequested) => self.load_model(renderer),
            None => {}
        }
    }

    /// Run the interactive viewer until the window is closed
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new().map_err(|e| Error::Visualization(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(self.config.title.clone())
                .with_inner_size(winit::dpi::PhysicalSize::new(self.config.width, self.config.height))
                .with_resizable(true)
                .build(&event_loop)
                .map_err(|e| Error::Visualization(format!("Failed to create window: {}", e)))?,
        );

        let mut renderer = pollster::block_on(ModelRenderer::new(window.clone(), self.config.render.clone()))?;
        let size = window.inner_size();
        self.state.resize(size.width, size.height);
        debug!(width = size.width, height = size.height, "Viewer initialized");

        self.load_model(&mut renderer);

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Wait);

                match event {
                    Event::WindowEvent { event, .. } => match event {
                        WindowEvent::CloseRequested => {
                            target.exit();
                        }
                        WindowEvent::Resized(new_size) => {
                            renderer.resize(new_size);
                            self.state.resize(new_size.width, new_size.height);
                            window.request_redraw();
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            self.cursor = Point2f::new(position.x as f32, position.y as f32);
                            self.dispatch(InputEvent::PointerMove(self.cursor), &mut renderer);
                            window.request_redraw();
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            if let Some(input) = button_event(button, state, self.cursor) {
                                self.dispatch(input, &mut renderer);
                                window.request_redraw();
                            }
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            if let Some(input) = scroll_event(delta) {
                                self.dispatch(input, &mut renderer);
                                window.request_redraw();
                            }
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed && !event.repeat {
                                if let Some(input) = key_event(&event.logical_key) {
                                    self.dispatch(input, &mut renderer);
                                    window.request_redraw();
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            self.draw(&mut renderer);
                        }
                        _ => {}
                    },
                    Event::Resumed => {
                        window.request_redraw();
                    }
                    _ => {}
                }
            })
            .map_err(|e| Error::Visualization(format!("Event loop error: {}", e)))?;

        info!("Viewer closed");
        Ok(())
    }
}

impl Default for InteractiveViewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_left_button_maps_to_pointer() {
        let cursor = Point2f::new(12.0, 34.0);
        assert_eq!(
            button_event(MouseButton::Left, ElementState::Pressed, cursor),
            Some(InputEvent::PointerDown(cursor))
        );
        assert_eq!(
            button_event(MouseButton::Left, ElementState::Released, cursor),
            Some(InputEvent::PointerUp)
        );
        assert_eq!(button_event(MouseButton::Right, ElementState::Pressed, cursor), None);
    }

    #[test]
    fn test_scroll_direction() {
        assert_eq!(scroll_event(MouseScrollDelta::LineDelta(0.0, 1.0)), Some(InputEvent::ScrollUp));
        assert_eq!(scroll_event(MouseScrollDelta::LineDelta(0.0, -2.0)), Some(InputEvent::ScrollDown));
        assert_eq!(
            scroll_event(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -15.0))),
            Some(InputEvent::ScrollDown)
        );
        assert_eq!(scroll_event(MouseScrollDelta::LineDelta(3.0, 0.0)), None);
    }

    #[test]
    fn test_open_key() {
        assert_eq!(key_event(&Key::Character("o".into())), Some(InputEvent::KeyOpen));
        assert_eq!(key_event(&Key::Character("O".into())), Some(InputEvent::KeyOpen));
        assert_eq!(key_event(&Key::Character("p".into())), None);
    }
}

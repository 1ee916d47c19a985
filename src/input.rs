//! Translation of `winit` window events into engine interactions.
//!
//! The engine never sees raw window events; hosts forward them to an
//! [`InputTranslator`] and pass the resulting [`InteractionEvent`]s to
//! [`crate::app::Viewer::handle_interaction`].

use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
};

/// Pixels the cursor may travel between press and release and still count as a click
const CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    ResetCamera,
    ToggleTour,
    Undo,
    Redo,
    ClearSelection,
}

/// A user interaction the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    /// Left click at a pixel position; `multi` when the multi-select modifier is held
    Click { x: f32, y: f32, multi: bool },
    /// Pointer moved with the left button held; `pan` when shift is held
    Drag { dx: f32, dy: f32, pan: bool },
    /// Scroll in lines, positive towards the user
    Wheel { delta: f32 },
    Key(KeyCommand),
}

#[derive(Debug, Default)]
pub struct InputTranslator {
    modifiers: ModifiersState,
    cursor: Option<(f32, f32)>,
    pressed_at: Option<(f32, f32)>,
    dragged: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_window_event(&mut self, event: &WindowEvent) -> Option<InteractionEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                None
            }
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(*position),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.left_button(*state),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 40.0,
                };
                Some(InteractionEvent::Wheel { delta: -lines })
            }
            WindowEvent::KeyboardInput { event, .. } => self.key(event),
            _ => None,
        }
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<InteractionEvent> {
        let now = (position.x as f32, position.y as f32);
        let previous = self.cursor.replace(now);
        let pressed_at = self.pressed_at?;
        let previous = previous?;

        if !self.dragged {
            let (dx, dy) = (now.0 - pressed_at.0, now.1 - pressed_at.1);
            if dx.hypot(dy) <= CLICK_SLOP {
                return None;
            }
            self.dragged = true;
        }
        Some(InteractionEvent::Drag {
            dx: now.0 - previous.0,
            dy: now.1 - previous.1,
            pan: self.modifiers.shift_key(),
        })
    }

    fn left_button(&mut self, state: ElementState) -> Option<InteractionEvent> {
        match state {
            ElementState::Pressed => {
                self.pressed_at = self.cursor;
                self.dragged = false;
                None
            }
            ElementState::Released => {
                let pressed_at = self.pressed_at.take();
                let dragged = std::mem::take(&mut self.dragged);
                match (pressed_at, self.cursor) {
                    (Some(_), Some((x, y))) if !dragged => Some(InteractionEvent::Click {
                        x,
                        y,
                        multi: self.modifiers.control_key() || self.modifiers.super_key(),
                    }),
                    _ => None,
                }
            }
        }
    }

    fn key(&mut self, event: &KeyEvent) -> Option<InteractionEvent> {
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        let command_held = self.modifiers.control_key() || self.modifiers.super_key();
        let command = match code {
            KeyCode::KeyC if self.modifiers.shift_key() => KeyCommand::ResetCamera,
            KeyCode::KeyT => KeyCommand::ToggleTour,
            KeyCode::KeyZ if command_held && self.modifiers.shift_key() => KeyCommand::Redo,
            KeyCode::KeyZ if command_held => KeyCommand::Undo,
            KeyCode::KeyY if command_held => KeyCommand::Redo,
            KeyCode::Escape => KeyCommand::ClearSelection,
            _ => return None,
        };
        Some(InteractionEvent::Key(command))
    }
}

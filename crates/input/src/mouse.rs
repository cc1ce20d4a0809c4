use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    X1,
    X2,
}

impl MouseButton {
    const fn bit(self) -> u8 {
        match self {
            Self::Left => 0b0000_0001,
            Self::Right => 0b0000_0010,
            Self::Middle => 0b0000_0100,
            Self::X1 => 0b0000_1000,
            Self::X2 => 0b0001_0000,
        }
    }
}

/// Bitmask of currently held buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MouseButtons(u8);

impl MouseButtons {
    pub const NONE: Self = Self(0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub const fn with(self, button: MouseButton) -> Self {
        Self(self.0 | button.bit())
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<MouseButton> for MouseButtons {
    fn from_iter<I: IntoIterator<Item = MouseButton>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// One input event.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Nothing happened this frame.
    #[default]
    Idle,
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    /// Pointer motion relative to the previous position, in pixels.
    PointerMove { dx: f32, dy: f32 },
    /// Wheel notches; positive away from the user.
    Wheel(f32),
}

/// Everything the camera needs for one update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    pub event: InputEvent,
    /// Buttons held after `event` was applied.
    pub buttons: MouseButtons,
    /// Seconds since the previous frame.
    pub elapsed: f32,
}

impl FrameInput {
    pub fn new(event: InputEvent, buttons: MouseButtons, elapsed: f32) -> Self {
        Self {
            event,
            buttons,
            elapsed,
        }
    }

    pub fn held(&self, button: MouseButton) -> bool {
        self.buttons.contains(button)
    }
}

/// Tracks button state and the last pointer position, turning raw
/// window-system callbacks into [`FrameInput`] values.
#[derive(Debug, Clone, Default)]
pub struct Mouse {
    buttons: MouseButtons,
    position: Option<IVec2>,
    last_event: InputEvent,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Last absolute pointer position seen, if any.
    pub fn position(&self) -> Option<IVec2> {
        self.position
    }

    /// Most recent event, kept until [`Mouse::end_frame`].
    pub fn last_event(&self) -> InputEvent {
        self.last_event
    }

    pub fn press(&mut self, button: MouseButton) -> InputEvent {
        self.buttons.insert(button);
        self.record(InputEvent::ButtonDown(button))
    }

    pub fn release(&mut self, button: MouseButton) -> InputEvent {
        self.buttons.remove(button);
        self.record(InputEvent::ButtonUp(button))
    }

    /// Feed an absolute pointer position. The first position only seeds the
    /// tracker and reports a zero delta.
    pub fn move_to(&mut self, x: i32, y: i32) -> InputEvent {
        let next = IVec2::new(x, y);
        let delta = self.position.map_or(IVec2::ZERO, |prev| next - prev);
        self.position = Some(next);
        self.record(InputEvent::PointerMove {
            dx: delta.x as f32,
            dy: delta.y as f32,
        })
    }

    pub fn scroll(&mut self, delta: f32) -> InputEvent {
        self.record(InputEvent::Wheel(delta))
    }

    /// Snapshot for the camera: last event, held buttons and frame time.
    pub fn frame_input(&self, elapsed: f32) -> FrameInput {
        FrameInput::new(self.last_event, self.buttons, elapsed)
    }

    /// Drop the one-shot event so the next frame starts idle.
    pub fn end_frame(&mut self) {
        self.last_event = InputEvent::Idle;
    }

    fn record(&mut self, event: InputEvent) -> InputEvent {
        tracing::trace!(?event, buttons = self.buttons.bits(), "mouse event");
        self.last_event = event;
        event
    }
}

/// Modal button actions fed back from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    NextLevel,
    Retry,
    PlayAgain,
}

impl UiAction {
    /// Numeric code used across the wasm boundary.
    pub fn code(self) -> u32 {
        match self {
            UiAction::NextLevel => 1,
            UiAction::Retry => 2,
            UiAction::PlayAgain => 3,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(UiAction::NextLevel),
            2 => Some(UiAction::Retry),
            3 => Some(UiAction::PlayAgain),
            _ => None,
        }
    }
}

/// Input event types the engine understands. Coordinates are world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    /// The pointer left the surface or the browser cancelled the gesture.
    PointerCancel,
    Action(UiAction),
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them in arrival order.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

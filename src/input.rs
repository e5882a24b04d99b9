//! Pointer, click and viewport state fed by host input events.

/// Canvas size in CSS pixels, mirrored from the window on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Maps a top-down pixel position into the shader's bottom-up unit square.
pub fn normalize(x: f64, y: f64, viewport: Viewport) -> (f32, f32) {
    (
        (x / viewport.width) as f32,
        (1.0 - y / viewport.height) as f32,
    )
}

/// Smoothed pointer chasing the last reported position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

impl PointerState {
    /// Parks the pointer half a viewport to the left of the canvas, vertically
    /// centred, so nothing lights up until the user moves.
    pub fn offscreen(viewport: Viewport) -> Self {
        let x = -0.5 * viewport.width;
        let y = 0.5 * viewport.height;
        Self {
            x,
            y,
            target_x: x,
            target_y: y,
        }
    }

    pub fn set_target(&mut self, x: f64, y: f64) {
        self.target_x = x;
        self.target_y = y;
    }

    /// One step of exponential smoothing: `p += (target - p) * factor`.
    pub fn ease(&mut self, factor: f64) {
        self.x += (self.target_x - self.x) * factor;
        self.y += (self.target_y - self.y) * factor;
    }
}

/// Whether and when the page was last clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClickState {
    pub clicked: bool,
    pub timestamp: f64,
}

impl ClickState {
    pub fn record(&mut self, now: f64) {
        self.clicked = true;
        self.timestamp = now;
    }

    /// Milliseconds since the last click, `None` until the first one.
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        self.clicked.then(|| now - self.timestamp)
    }
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOrigin {
    /// Anywhere on the page that is not the mode toggle.
    Page,
    /// The mode toggle or an element sharing its container (e.g. its label).
    Toggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Resize { width: f64, height: f64 },
    PointerMove { x: f64, y: f64 },
    /// Page coordinates of every active touch on the target.
    TouchMove { touches: Vec<(f64, f64)> },
    Click { x: f64, y: f64, origin: ClickOrigin },
    ToggleChange { checked: bool },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::PointerMove { .. } => EventKind::PointerMove,
            InputEvent::TouchMove { .. } => EventKind::TouchMove,
            InputEvent::Click { .. } => EventKind::Click,
            InputEvent::ToggleChange { .. } => EventKind::ToggleChange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    PointerMove,
    TouchMove,
    Click,
    ToggleChange,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Resize,
        EventKind::PointerMove,
        EventKind::TouchMove,
        EventKind::Click,
        EventKind::ToggleChange,
    ];
}

pub type Handler = Box<dyn FnMut(InputEvent)>;

/// Something that delivers [`InputEvent`]s: the DOM in the browser, a
/// scripted source in tests.
pub trait InputSource {
    type Error;

    fn subscribe(&mut self, kind: EventKind, handler: Handler) -> Result<(), Self::Error>;
}

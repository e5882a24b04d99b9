use std::cell::Cell;

/// Monotonic high-resolution time in milliseconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// A clock that can also wait for the next display frame.
#[allow(async_fn_in_trait)]
pub trait FrameClock: Clock {
    /// Resolves once the next frame is due. `false` means the host went away
    /// and no further frames will come.
    async fn next_frame(&mut self) -> bool;
}

/// Deterministic frame clock: every frame advances time by a fixed step, and
/// the host "tears down" after a fixed number of frames.
#[derive(Debug)]
pub struct VirtualClock {
    now: Cell<f64>,
    step: f64,
    frames_left: usize,
}

impl VirtualClock {
    pub fn new(start: f64, step: f64, frames: usize) -> Self {
        Self {
            now: Cell::new(start),
            step,
            frames_left: frames,
        }
    }

    /// Moves time forward without producing a frame, as input arriving
    /// between frames would see it.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn frames_left(&self) -> usize {
        self.frames_left
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

impl FrameClock for VirtualClock {
    async fn next_frame(&mut self) -> bool {
        if self.frames_left == 0 {
            return false;
        }
        self.frames_left -= 1;
        self.advance(self.step);
        true
    }
}

use std::cell::RefCell;

use crate::clock::{Clock, FrameClock};
use crate::effect::Effect;
use crate::error::EffectError;
use crate::surface::{PageStyle, Surface};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopState {
    /// Pipeline not set up yet, nothing drawn.
    #[default]
    Idle,
    /// Ticking once per display frame until the host tears down.
    Running,
}

/// Per-frame driver for an [`Effect`].
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ticks `effect` now and then once per frame of `clock`.
    ///
    /// The first tick happens immediately, before waiting on the clock. Input
    /// handlers may mutate `effect` while the loop is parked between frames;
    /// the borrow is only held for the duration of a tick.
    pub async fn run<S, P, C>(
        &mut self,
        effect: &RefCell<Effect<S, P>>,
        clock: &mut C,
    ) -> Result<u64, EffectError>
    where
        S: Surface,
        P: PageStyle,
        C: FrameClock,
    {
        if self.state == LoopState::Running {
            return Err(EffectError::LoopAlreadyRunning);
        }
        self.state = LoopState::Running;
        log::debug!("render loop running");

        loop {
            effect.borrow_mut().tick(clock.now());
            self.frames += 1;
            if !clock.next_frame().await {
                break;
            }
        }

        log::debug!("render loop stopped after {} frames", self.frames);
        Ok(self.frames)
    }
}

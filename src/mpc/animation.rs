//! Startup pad animation
//!
//! Pads light up one after another, each ramping from black to its resting
//! color. The animation only yields frames; the caller paces and writes them,
//! so it shares the single device writer with the input path.

use super::lights::PadColor;
use super::pads::{PadIndex, PAD_COUNT};

/// Ramp frames per pad before the resting color is applied
pub const RAMP_STEPS: u8 = 16;

/// One LED write of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub pad: PadIndex,
    pub color: PadColor,
}

#[derive(Debug, Clone)]
pub struct StartupAnimation {
    resting: [PadColor; PAD_COUNT],
    pad: usize,
    step: u8,
}

impl StartupAnimation {
    pub fn new(resting: [PadColor; PAD_COUNT]) -> Self {
        Self {
            resting,
            pad: 0,
            step: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.pad >= PAD_COUNT
    }

    /// Total number of frames the animation produces
    pub fn frame_count() -> usize {
        PAD_COUNT * (RAMP_STEPS as usize + 1)
    }
}

impl Iterator for StartupAnimation {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.is_finished() {
            return None;
        }

        let pad = PadIndex::new(self.pad as u8)?;
        let target = self.resting[self.pad];

        let color = if self.step < RAMP_STEPS {
            target.scaled(self.step, RAMP_STEPS)
        } else {
            target
        };

        if self.step < RAMP_STEPS {
            self.step += 1;
        } else {
            self.step = 0;
            self.pad += 1;
        }

        Some(Frame { pad, color })
    }
}

//! Device LED updates outside the message path (startup, shutdown, animation)

use anyhow::Result;
use tracing::{debug, trace};

use crate::midi::DeviceSink;
use crate::mpc::{encode_pad_color, pad_to_note, Frame, PadColor, PadIndex};

impl super::Router {
    /// Set one pad's LED
    pub fn apply_pad_color(&mut self, pad: PadIndex, color: PadColor) -> Result<()> {
        trace!("{} (note {}) -> {}", pad, pad_to_note(pad), color);
        self.device.send(&encode_pad_color(pad, color.r, color.g, color.b))
    }

    /// Write one startup animation frame
    pub fn apply_frame(&mut self, frame: Frame) -> Result<()> {
        self.apply_pad_color(frame.pad, frame.color)
    }

    /// Pads to their resting colors, full level LED to its current state
    pub fn restore_lights(&mut self) -> Result<()> {
        for pad in PadIndex::all() {
            self.apply_pad_color(pad, self.palette.resting[pad.get() as usize])?;
        }
        self.device.send(&self.toggle.led_frame())?;
        debug!("LEDs restored");
        Ok(())
    }

    /// Pads off (used before the startup animation)
    pub fn clear_pads(&mut self) -> Result<()> {
        for pad in PadIndex::all() {
            self.apply_pad_color(pad, PadColor::OFF)?;
        }
        Ok(())
    }

    /// All pads and the full level LED off
    pub fn reset_lights(&mut self) -> Result<()> {
        self.clear_pads()?;
        self.device.send(&self.toggle.off_frame())?;
        debug!("LEDs reset");
        Ok(())
    }

    /// Full level LED to its current state
    pub fn show_full_level(&mut self) -> Result<()> {
        self.device.send(&self.toggle.led_frame())
    }
}

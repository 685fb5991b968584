//! Device message handling and host forwarding

use anyhow::Result;
use tracing::{debug, trace};

use super::MAX_VELOCITY;
use crate::midi::{format_hex, DeviceSink, HostSink};
use crate::mpc::events::is_aftertouch;
use crate::mpc::{classify, Event};

/// What happened to a device message on the host side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Sent to the host, possibly rewritten
    Forwarded(Vec<u8>),
    /// Consumed by the bridge
    Suppressed,
}

impl super::Router {
    /// Process one message from the device
    ///
    /// LED side effects are written before the message is forwarded. Errors
    /// from either output are returned as-is.
    pub fn on_message(&mut self, timestamp: u64, message: &[u8]) -> Result<Disposition> {
        trace!("m: {} d: {}", format_hex(message), timestamp);

        let disposition = match classify(message) {
            Event::PadPressed { pad, velocity, .. } => {
                self.apply_pad_color(pad, self.palette.active)?;

                if self.toggle.is_enabled() && velocity != MAX_VELOCITY {
                    let mut rewritten = message.to_vec();
                    rewritten[2] = MAX_VELOCITY;
                    debug!("Full level: {} velocity {} -> {}", pad, velocity, MAX_VELOCITY);
                    Disposition::Forwarded(rewritten)
                } else {
                    Disposition::Forwarded(message.to_vec())
                }
            }
            Event::PadReleased { pad, .. } => {
                self.apply_pad_color(pad, self.palette.resting[pad.get() as usize])?;
                Disposition::Forwarded(message.to_vec())
            }
            Event::ButtonPressed { controller } if self.toggle.owns(controller) => {
                Disposition::Suppressed
            }
            Event::ButtonReleased { controller } => match self.toggle.on_release(controller) {
                Some(frame) => {
                    self.device.send(&frame)?;
                    debug!("Full level {:?}", self.toggle.state());
                    Disposition::Suppressed
                }
                None => Disposition::Forwarded(message.to_vec()),
            },
            Event::Other(raw) if self.toggle.is_enabled() && is_aftertouch(raw) => {
                Disposition::Suppressed
            }
            Event::ButtonPressed { .. } | Event::Other(_) => Disposition::Forwarded(message.to_vec()),
        };

        match &disposition {
            Disposition::Forwarded(bytes) => self.host.forward(bytes)?,
            Disposition::Suppressed => trace!("Suppressed {}", format_hex(message)),
        }

        Ok(disposition)
    }
}

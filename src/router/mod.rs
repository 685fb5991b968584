//! Router module - Core orchestration of device messages
//!
//! The Router owns the session state and both outputs:
//! - Classifies every device message
//! - Drives pad and button LED feedback on the device
//! - Runs the full level toggle
//! - Forwards, rewrites, or suppresses messages bound for the host

mod device_input;
mod leds;
mod toggle;

pub use device_input::Disposition;
pub use toggle::{FullLevel, FullLevelToggle};


use anyhow::Result;

use crate::config::{AppConfig, FullLevelConfig, PadPalette};
use crate::midi::{DeviceSink, HostSink};

/// Velocity forced onto pad hits while full level is enabled
pub const MAX_VELOCITY: u8 = 127;

/// Main router translating device traffic for the host
pub struct Router {
    /// Decoded pad colors
    pub(crate) palette: PadPalette,
    /// Full level state machine
    pub(crate) toggle: FullLevelToggle,
    /// Device output (LED commands)
    pub(crate) device: Box<dyn DeviceSink>,
    /// Host output (forwarded messages)
    pub(crate) host: Box<dyn HostSink>,
}

impl Router {
    /// Create a router from a validated configuration
    pub fn new(
        config: &AppConfig,
        device: Box<dyn DeviceSink>,
        host: Box<dyn HostSink>,
    ) -> Result<Self> {
        let palette = config.palette()?;
        Ok(Self::with_palette(palette, &config.full_level, device, host))
    }

    /// Create a router from already decoded colors
    pub fn with_palette(
        palette: PadPalette,
        full_level: &FullLevelConfig,
        device: Box<dyn DeviceSink>,
        host: Box<dyn HostSink>,
    ) -> Self {
        Self {
            palette,
            toggle: FullLevelToggle::new(full_level.button, full_level.led),
            device,
            host,
        }
    }

    pub fn full_level(&self) -> FullLevel {
        self.toggle.state()
    }

    pub fn full_level_enabled(&self) -> bool {
        self.toggle.is_enabled()
    }

    pub fn palette(&self) -> &PadPalette {
        &self.palette
    }
}

//! Full level toggle
//!
//! One button flips full level on release. The button's LED mirrors the state:
//! dim while off, lit while on.

use crate::config::ButtonLedKind;
use crate::mpc::encode_button_color;

/// Full level mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullLevel {
    #[default]
    Disabled,
    Enabled,
}

impl FullLevel {
    fn flipped(self) -> Self {
        match self {
            FullLevel::Disabled => FullLevel::Enabled,
            FullLevel::Enabled => FullLevel::Disabled,
        }
    }
}

/// State machine owning the full level flag
#[derive(Debug, Clone)]
pub struct FullLevelToggle {
    button: u8,
    led: ButtonLedKind,
    state: FullLevel,
}

impl FullLevelToggle {
    pub fn new(button: u8, led: ButtonLedKind) -> Self {
        Self {
            button,
            led,
            state: FullLevel::Disabled,
        }
    }

    pub fn state(&self) -> FullLevel {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state == FullLevel::Enabled
    }

    /// Whether a controller is the full level button
    pub fn owns(&self, controller: u8) -> bool {
        controller == self.button
    }

    /// Handle a button release
    ///
    /// Returns the LED frame for the new state, or `None` when the release
    /// belongs to another button.
    pub fn on_release(&mut self, controller: u8) -> Option<[u8; 3]> {
        if !self.owns(controller) {
            return None;
        }
        self.state = self.state.flipped();
        Some(self.led_frame())
    }

    /// LED frame reflecting the current state
    pub fn led_frame(&self) -> [u8; 3] {
        let code = match self.state {
            FullLevel::Disabled => self.led.disabled_code(),
            FullLevel::Enabled => self.led.enabled_code(),
        };
        encode_button_color(self.button, code)
    }

    pub fn off_frame(&self) -> [u8; 3] {
        encode_button_color(self.button, self.led.off_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_disabled() {
        let toggle = FullLevelToggle::new(39, ButtonLedKind::Mono);
        assert_eq!(toggle.state(), FullLevel::Disabled);
        assert_eq!(toggle.led_frame(), [0xB0, 39, 1]);
    }

    #[test]
    fn test_release_flips_and_lights() {
        let mut toggle = FullLevelToggle::new(39, ButtonLedKind::Mono);

        assert_eq!(toggle.on_release(39), Some([0xB0, 39, 2]));
        assert!(toggle.is_enabled());

        assert_eq!(toggle.on_release(39), Some([0xB0, 39, 1]));
        assert!(!toggle.is_enabled());
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut toggle = FullLevelToggle::new(39, ButtonLedKind::Mono);
        assert_eq!(toggle.on_release(40), None);
        assert_eq!(toggle.state(), FullLevel::Disabled);
    }

    #[test]
    fn test_bicolor_codes() {
        let mut toggle = FullLevelToggle::new(12, ButtonLedKind::Bicolor);
        assert_eq!(toggle.on_release(12), Some([0xB0, 12, 3]));
        assert_eq!(toggle.off_frame(), [0xB0, 12, 0]);
    }

    proptest! {
        #[test]
        fn state_follows_release_parity(releases in prop::collection::vec(prop::bool::ANY, 0..64)) {
            // true = full level button, false = some other button
            let mut toggle = FullLevelToggle::new(39, ButtonLedKind::Mono);
            let mut qualifying = 0usize;

            for own in &releases {
                if *own {
                    qualifying += 1;
                    toggle.on_release(39);
                } else {
                    toggle.on_release(41);
                }
            }

            prop_assert_eq!(toggle.is_enabled(), qualifying % 2 == 1);
        }
    }
}

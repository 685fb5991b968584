//! LED command encoding for the MPC Studio
//!
//! Pads take a 12-byte SysEx RGB frame, buttons take a plain control change
//! whose value selects one of a few fixed brightness levels.

use std::fmt;

use super::pads::PadIndex;

/// Vendor/model/command prefix for the pad RGB SysEx (after `F0`)
pub const PAD_SYSEX_PREFIX: [u8; 6] = [0x47, 0x47, 0x4A, 0x65, 0x00, 0x04];

/// Length of a pad color frame, `F0` and `F7` included
pub const PAD_FRAME_LEN: usize = 12;

const SYSEX_START: u8 = 0xF0;
const SYSEX_END: u8 = 0xF7;
const CONTROL_CHANGE: u8 = 0xB0;

/// RGB color of a pad LED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PadColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PadColor {
    pub const OFF: PadColor = PadColor::new(0, 0, 0);
    pub const WHITE: PadColor = PadColor::new(127, 127, 127);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `num / den` (integer, rounds down)
    pub fn scaled(self, num: u8, den: u8) -> Self {
        if den == 0 {
            return PadColor::OFF;
        }
        let scale = |c: u8| ((c as u16 * num as u16) / den as u16).min(255) as u8;
        PadColor::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for PadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// LED levels of single-color buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonoLed {
    Off = 0,
    Dim = 1,
    On = 2,
}

/// LED levels of two-color buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BicolorLed {
    Off = 0,
    Dim1 = 1,
    Dim2 = 2,
    On1 = 3,
    On2 = 4,
}

impl From<MonoLed> for u8 {
    fn from(led: MonoLed) -> u8 {
        led as u8
    }
}

impl From<BicolorLed> for u8 {
    fn from(led: BicolorLed) -> u8 {
        led as u8
    }
}

/// Build the SysEx frame that sets one pad's RGB LED
pub fn encode_pad_color(pad: PadIndex, r: u8, g: u8, b: u8) -> [u8; PAD_FRAME_LEN] {
    let [p0, p1, p2, p3, p4, p5] = PAD_SYSEX_PREFIX;
    [
        SYSEX_START,
        p0,
        p1,
        p2,
        p3,
        p4,
        p5,
        pad.get(),
        r,
        g,
        b,
        SYSEX_END,
    ]
}

/// Build the control change that sets a button LED level
pub fn encode_button_color(button: u8, color_code: impl Into<u8>) -> [u8; 3] {
    [CONTROL_CHANGE, button, color_code.into()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pad_frame_bytes() {
        let pad = PadIndex::new(0).unwrap();
        assert_eq!(
            encode_pad_color(pad, 0x1F, 0x00, 0x3F),
            [0xF0, 0x47, 0x47, 0x4A, 0x65, 0x00, 0x04, 0x00, 0x1F, 0x00, 0x3F, 0xF7]
        );
    }

    #[test]
    fn test_button_frames() {
        assert_eq!(encode_button_color(39, MonoLed::On), [0xB0, 39, 2]);
        assert_eq!(encode_button_color(39, MonoLed::Dim), [0xB0, 39, 1]);
        assert_eq!(encode_button_color(12, BicolorLed::On2), [0xB0, 12, 4]);
        assert_eq!(encode_button_color(12, BicolorLed::Off), [0xB0, 12, 0]);
    }

    #[test]
    fn test_scaled_color() {
        let color = PadColor::new(31, 0, 63);
        assert_eq!(color.scaled(0, 16), PadColor::OFF);
        assert_eq!(color.scaled(16, 16), color);
        assert_eq!(color.scaled(8, 16), PadColor::new(15, 0, 31));
        assert_eq!(color.scaled(1, 0), PadColor::OFF);
    }

    proptest! {
        #[test]
        fn pad_frame_is_always_well_formed(
            idx in 0u8..16,
            r in any::<u8>(),
            g in any::<u8>(),
            b in any::<u8>(),
        ) {
            let pad = PadIndex::new(idx).unwrap();
            let frame = encode_pad_color(pad, r, g, b);

            prop_assert_eq!(frame.len(), PAD_FRAME_LEN);
            prop_assert_eq!(frame[0], 0xF0);
            prop_assert_eq!(frame[11], 0xF7);
            prop_assert_eq!(&frame[1..7], &PAD_SYSEX_PREFIX[..]);
            prop_assert_eq!(&frame[7..11], &[idx, r, g, b][..]);
        }
    }
}

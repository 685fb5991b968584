//! Device event classifier
//!
//! Every status byte the surface uses is compared here and nowhere else.

use super::pads::{note_to_pad, PadIndex};

/// Pad note-on (channel 10)
pub const PAD_NOTE_ON: u8 = 0x99;
/// Pad note-off (channel 10)
pub const PAD_NOTE_OFF: u8 = 0x89;
/// Note-on used by the buttons (channel 1)
pub const BUTTON_NOTE_ON: u8 = 0x90;
/// Note-off used by the buttons (channel 1)
pub const BUTTON_NOTE_OFF: u8 = 0x80;
/// Polyphonic pressure family, the pads send `0xA9`
pub const POLY_PRESSURE: u8 = 0xA0;

/// Classified inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<'a> {
    PadPressed { pad: PadIndex, note: u8, velocity: u8 },
    PadReleased { pad: PadIndex, note: u8 },
    ButtonPressed { controller: u8 },
    ButtonReleased { controller: u8 },
    Other(&'a [u8]),
}

/// Classify a raw device message
///
/// Pad statuses carrying a note outside the pad map fall through to `Other`.
pub fn classify(message: &[u8]) -> Event<'_> {
    let &[status, data1, data2, ..] = message else {
        return Event::Other(message);
    };

    match status {
        PAD_NOTE_ON | PAD_NOTE_OFF => match note_to_pad(data1) {
            Some(pad) if status == PAD_NOTE_ON && data2 > 0 => Event::PadPressed {
                pad,
                note: data1,
                velocity: data2,
            },
            Some(pad) => Event::PadReleased { pad, note: data1 },
            None => Event::Other(message),
        },
        BUTTON_NOTE_ON if data2 > 0 => Event::ButtonPressed { controller: data1 },
        // Note-on with velocity 0 is a note-off
        BUTTON_NOTE_ON | BUTTON_NOTE_OFF => Event::ButtonReleased { controller: data1 },
        _ => Event::Other(message),
    }
}

/// Aftertouch-class message (any channel)
pub fn is_aftertouch(message: &[u8]) -> bool {
    message.first().map_or(false, |&status| status & 0xF0 == POLY_PRESSURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpc::pads::PAD_NOTES;
    use proptest::prelude::*;

    fn pad(idx: u8) -> PadIndex {
        PadIndex::new(idx).unwrap()
    }

    #[test]
    fn test_pad_press() {
        assert_eq!(
            classify(&[0x99, 37, 100]),
            Event::PadPressed { pad: pad(0), note: 37, velocity: 100 }
        );
    }

    #[test]
    fn test_pad_release_forms() {
        assert_eq!(classify(&[0x99, 36, 0]), Event::PadReleased { pad: pad(1), note: 36 });
        assert_eq!(classify(&[0x89, 36, 0]), Event::PadReleased { pad: pad(1), note: 36 });
        // Note-off with a release velocity is still a release
        assert_eq!(classify(&[0x89, 53, 64]), Event::PadReleased { pad: pad(15), note: 53 });
    }

    #[test]
    fn test_buttons() {
        assert_eq!(classify(&[0x90, 39, 127]), Event::ButtonPressed { controller: 39 });
        assert_eq!(classify(&[0x80, 39, 0]), Event::ButtonReleased { controller: 39 });
        assert_eq!(classify(&[0x90, 39, 0]), Event::ButtonReleased { controller: 39 });
    }

    #[test]
    fn test_other_messages() {
        let aftertouch = [0xA9, 37, 40];
        assert_eq!(classify(&aftertouch), Event::Other(&aftertouch));

        let cc = [0xB0, 16, 1];
        assert_eq!(classify(&cc), Event::Other(&cc));

        let sysex = [0xF0, 0x47, 0x00, 0xF7];
        assert_eq!(classify(&sysex), Event::Other(&sysex));

        let short = [0x99, 37];
        assert_eq!(classify(&short), Event::Other(&short));

        assert_eq!(classify(&[]), Event::Other(&[]));
    }

    #[test]
    fn test_pad_note_on_other_channel_is_not_pad() {
        // Pad notes on the button channel are buttons, not pads
        assert_eq!(classify(&[0x90, 37, 100]), Event::ButtonPressed { controller: 37 });
    }

    #[test]
    fn test_aftertouch_detection() {
        assert!(is_aftertouch(&[0xA9, 37, 40]));
        assert!(is_aftertouch(&[0xA0, 1, 2]));
        assert!(!is_aftertouch(&[0x99, 37, 40]));
        assert!(!is_aftertouch(&[]));
    }

    proptest! {
        #[test]
        fn unmapped_notes_never_classify_as_pads(
            status in prop::sample::select(vec![0x99u8, 0x89]),
            note in 0u8..128,
            velocity in 0u8..128,
        ) {
            prop_assume!(!PAD_NOTES.contains(&note));
            let message = [status, note, velocity];
            prop_assert_eq!(classify(&message), Event::Other(&message));
        }
    }
}

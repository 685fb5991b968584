//! Pad index map
//!
//! The MPC Studio reports pad hits as notes in a fixed, non-contiguous layout.
//! Position in [`PAD_NOTES`] is the logical pad index used by the LED protocol.

use std::fmt;

/// Number of velocity-sensitive pads on the surface
pub const PAD_COUNT: usize = 16;

/// Device note numbers, ordered by pad index (pad 0 first)
pub const PAD_NOTES: [u8; PAD_COUNT] = [
    37, 36, 42, 82, 40, 38, 46, 44, 48, 47, 45, 43, 49, 55, 51, 53,
];

/// Logical pad index in `0..16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadIndex(u8);

impl PadIndex {
    /// Build a pad index, rejecting values outside `0..16`
    pub fn new(index: u8) -> Option<Self> {
        if (index as usize) < PAD_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Iterate over all pads in index order
    pub fn all() -> impl Iterator<Item = PadIndex> {
        (0..PAD_COUNT as u8).map(PadIndex)
    }
}

impl fmt::Display for PadIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pad{}", self.0)
    }
}

/// Resolve a device note to its pad, `None` if the note is not a pad
pub fn note_to_pad(note: u8) -> Option<PadIndex> {
    PAD_NOTES
        .iter()
        .position(|&n| n == note)
        .map(|idx| PadIndex(idx as u8))
}

/// Device note emitted by a pad
pub fn pad_to_note(pad: PadIndex) -> u8 {
    PAD_NOTES[pad.0 as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_first_and_last_pad() {
        assert_eq!(note_to_pad(37), PadIndex::new(0));
        assert_eq!(note_to_pad(53), PadIndex::new(15));
        assert_eq!(note_to_pad(82), PadIndex::new(3));
    }

    #[test]
    fn test_unmapped_notes() {
        assert_eq!(note_to_pad(0), None);
        assert_eq!(note_to_pad(39), None);
        assert_eq!(note_to_pad(127), None);
    }

    #[test]
    fn test_notes_are_unique_and_round_trip() {
        let unique: HashSet<u8> = PAD_NOTES.iter().copied().collect();
        assert_eq!(unique.len(), PAD_COUNT);

        for pad in PadIndex::all() {
            assert_eq!(note_to_pad(pad_to_note(pad)), Some(pad));
        }
    }

    #[test]
    fn test_pad_index_bounds() {
        assert!(PadIndex::new(15).is_some());
        assert!(PadIndex::new(16).is_none());
        assert_eq!(PadIndex::all().count(), PAD_COUNT);
    }
}

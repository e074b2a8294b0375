//! Pad layout of the picotouch_synth keyboard.
//!
//! Bottom pads are the "white" keys and double as trigger inputs, top pads
//! are the "black" keys, and the five pads on the right are mode keys.

pub const TOP_PADS: [usize; 7] = [1, 3, 6, 8, 10, 13, 15];
pub const BOTTOM_PADS: [usize; 10] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16];
pub const MODE_PADS: [usize; 5] = [17, 18, 19, 20, 21];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModePad {
    A,
    B,
    C,
    X,
    Y,
}

impl ModePad {
    const ALL: [ModePad; 5] = [ModePad::A, ModePad::B, ModePad::C, ModePad::X, ModePad::Y];

    pub fn from_pad(pad: usize) -> Option<Self> {
        let i = MODE_PADS.iter().position(|&p| p == pad)?;
        Some(Self::ALL[i])
    }

    pub fn pad(self) -> usize {
        MODE_PADS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadKind {
    Top,
    /// Bottom pad with its trigger number
    Bottom(usize),
    Mode(ModePad),
}

impl PadKind {
    pub fn of(pad: usize) -> Option<Self> {
        if let Some(trig) = bottom_pad_to_trig_num(pad) {
            Some(PadKind::Bottom(trig))
        } else if is_top_pad(pad) {
            Some(PadKind::Top)
        } else {
            ModePad::from_pad(pad).map(PadKind::Mode)
        }
    }
}

pub fn is_bottom_pad(pad: usize) -> bool {
    BOTTOM_PADS.contains(&pad)
}

pub fn is_top_pad(pad: usize) -> bool {
    TOP_PADS.contains(&pad)
}

pub fn is_mode_pad(pad: usize) -> bool {
    MODE_PADS.contains(&pad)
}

/// Trigger number of a bottom pad, `None` for any other pad.
pub fn bottom_pad_to_trig_num(pad: usize) -> Option<usize> {
    BOTTOM_PADS.iter().position(|&p| p == pad)
}

pub fn trig_num_to_pad_num(trig_num: usize) -> Option<usize> {
    BOTTOM_PADS.get(trig_num).copied()
}

/// Keyboard pads (top and bottom) in chromatic order map directly to
/// semitones above the base note; mode pads have no note.
pub fn pad_to_note(pad: usize, base_note: u8) -> Option<u8> {
    if pad >= MODE_PADS[0] {
        return None;
    }
    base_note.checked_add(pad as u8).filter(|&n| n < 128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NUM_TOUCH_PADS;

    #[test]
    fn every_pad_has_exactly_one_kind() {
        for pad in 0..NUM_TOUCH_PADS {
            let kinds = [is_top_pad(pad), is_bottom_pad(pad), is_mode_pad(pad)];
            assert_eq!(kinds.iter().filter(|&&k| k).count(), 1, "pad {}", pad);
            assert!(PadKind::of(pad).is_some());
        }
        assert_eq!(PadKind::of(NUM_TOUCH_PADS), None);
    }

    #[test]
    fn trigger_numbers() {
        assert_eq!(bottom_pad_to_trig_num(0), Some(0));
        assert_eq!(bottom_pad_to_trig_num(5), Some(3));
        assert_eq!(bottom_pad_to_trig_num(16), Some(9));
        assert_eq!(bottom_pad_to_trig_num(1), None);
        assert_eq!(bottom_pad_to_trig_num(17), None);
        assert_eq!(bottom_pad_to_trig_num(100), None);

        assert_eq!(trig_num_to_pad_num(3), Some(5));
        assert_eq!(trig_num_to_pad_num(10), None);
        for trig in 0..BOTTOM_PADS.len() {
            let pad = trig_num_to_pad_num(trig).unwrap();
            assert_eq!(bottom_pad_to_trig_num(pad), Some(trig));
        }
    }

    #[test]
    fn classification() {
        assert_eq!(PadKind::of(12), Some(PadKind::Bottom(7)));
        assert_eq!(PadKind::of(13), Some(PadKind::Top));
        assert_eq!(PadKind::of(19), Some(PadKind::Mode(ModePad::C)));
        assert_eq!(ModePad::Y.pad(), 21);
        assert_eq!(ModePad::from_pad(16), None);
    }

    #[test]
    fn notes() {
        assert_eq!(pad_to_note(0, 48), Some(48));
        assert_eq!(pad_to_note(16, 48), Some(64));
        assert_eq!(pad_to_note(17, 48), None);
        assert_eq!(pad_to_note(10, 120), None);
    }
}

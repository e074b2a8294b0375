//! Press/release event generation for the touch pads.
//!
//! The hardware layer samples all pads at once into a [`TouchSnapshot`];
//! [`TouchEventSource`] remembers the previous touched state of every pad and
//! reports what changed since the last poll. Poll at least every
//! [`TOUCH_POLL_INTERVAL`](crate::config::TOUCH_POLL_INTERVAL) or short taps
//! are lost.

use heapless::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchEvent {
    pub key_number: usize,
    pub pressed: bool,
}

impl TouchEvent {
    pub fn pressed(key_number: usize) -> Self {
        Self {
            key_number,
            pressed: true,
        }
    }
    pub fn released(key_number: usize) -> Self {
        Self {
            key_number,
            pressed: false,
        }
    }
}

/// At most one event per pad is produced by a single poll.
pub type TouchEvents<const N: usize> = Vec<TouchEvent, N>;

/// One sampling pass over all pads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchSnapshot<const N: usize> {
    pub touched: [bool; N],
    pub raw_values: [u32; N],
    pub thresholds: [u32; N],
}

impl<const N: usize> TouchSnapshot<N> {
    /// Snapshot with nothing touched and all raw readings at zero.
    pub fn new() -> Self {
        Self {
            touched: [false; N],
            raw_values: [0; N],
            thresholds: [0; N],
        }
    }

    /// Reading above the calibrated threshold, negative below it.
    /// Saturates at the `i32` range.
    pub fn strength(&self, pad: usize) -> i32 {
        let diff = self.raw_values[pad] as i64 - self.thresholds[pad] as i64;
        diff.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// Call `hold_func(pad, strength)` for every pad touched in this snapshot.
    pub fn check_hold(&self, mut hold_func: impl FnMut(usize, i32)) {
        for (i, &touched) in self.touched.iter().enumerate() {
            if touched {
                hold_func(i, self.strength(i));
            }
        }
    }
}

impl<const N: usize> Default for TouchSnapshot<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TouchEventSource<const N: usize> {
    last_touched: [bool; N],
}

impl<const N: usize> TouchEventSource<N> {
    pub fn new(initial: &[bool; N]) -> Self {
        Self {
            last_touched: *initial,
        }
    }

    pub fn num_pads(&self) -> usize {
        N
    }

    /// Compare `touched` with the state seen by the previous poll and return
    /// one event per changed pad, in pad order.
    pub fn poll(&mut self, touched: &[bool; N]) -> TouchEvents<N> {
        let mut events = TouchEvents::new();
        for (i, (&now, last)) in touched.iter().zip(self.last_touched.iter_mut()).enumerate() {
            if now != *last {
                trace!("pad {}: pressed {}", i, now);
                // cannot overflow, capacity is one slot per pad
                let _ = events.push(TouchEvent {
                    key_number: i,
                    pressed: now,
                });
            }
            *last = now;
        }
        events
    }

    /// Touched state as of the last poll.
    pub fn is_touched(&self, pad: usize) -> Option<bool> {
        self.last_touched.get(pad).copied()
    }
}

/// Discharge timing shared by the pad samplers.
///
/// Polls `is_low(pad)` in rounds until every pad not in `skip` has read low
/// or `max_count` rounds have passed, adding the round a pad first read low
/// to `counts[pad]`. Skipped pads and pads that never read low add
/// `max_count`. Returns the number of rounds run.
pub fn count_discharge<const N: usize>(
    skip: &[bool; N],
    max_count: u32,
    mut is_low: impl FnMut(usize) -> bool,
    counts: &mut [u32; N],
) -> u32 {
    let mut done = *skip;
    let mut num_done = done.iter().filter(|&&d| d).count();
    let mut count = 0;
    while num_done < N && count < max_count {
        for i in 0..N {
            if !done[i] && is_low(i) {
                done[i] = true;
                num_done += 1;
                counts[i] += count;
            }
        }
        count += 1;
    }

    for i in 0..N {
        if skip[i] || !done[i] {
            counts[i] += max_count;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(list: &[(usize, bool)]) -> std::vec::Vec<TouchEvent> {
        list.iter()
            .map(|&(key_number, pressed)| TouchEvent { key_number, pressed })
            .collect()
    }

    #[test]
    fn unchanged_inputs_give_no_events() {
        let initial = [false, true, false, true];
        let mut source = TouchEventSource::new(&initial);
        assert!(source.poll(&initial).is_empty());

        let mut single = TouchEventSource::new(&[true]);
        assert!(single.poll(&[true]).is_empty());
    }

    #[test]
    fn rising_edge_on_each_pad() {
        for pad in 0..22 {
            let mut source = TouchEventSource::new(&[false; 22]);
            let mut now = [false; 22];
            now[pad] = true;
            assert_eq!(&source.poll(&now)[..], &[TouchEvent::pressed(pad)][..]);
        }
    }

    #[test]
    fn falling_edge_on_each_pad() {
        for pad in 0..22 {
            let mut initial = [false; 22];
            initial[pad] = true;
            let mut source = TouchEventSource::new(&initial);
            assert_eq!(&source.poll(&[false; 22])[..], &[TouchEvent::released(pad)][..]);
        }
    }

    #[test]
    fn simultaneous_changes_in_pad_order() {
        let mut source = TouchEventSource::new(&[true, false, false, true, false]);
        let got = source.poll(&[false, false, true, false, true]);
        assert_eq!(&got[..], &events(&[(0, false), (2, true), (3, false), (4, true)])[..]);
    }

    #[test]
    fn second_poll_without_change_is_empty() {
        let mut source = TouchEventSource::new(&[false; 5]);
        let now = [false, true, true, false, false];
        assert_eq!(source.poll(&now).len(), 2);
        assert!(source.poll(&now).is_empty());
        assert_eq!(source.is_touched(1), Some(true));
        assert_eq!(source.is_touched(5), None);
    }

    #[test]
    fn press_then_partial_release() {
        let mut source = TouchEventSource::new(&[false, false, false]);
        assert_eq!(
            &source.poll(&[true, false, true])[..],
            &events(&[(0, true), (2, true)])[..]
        );
        assert_eq!(&source.poll(&[true, false, false])[..], &events(&[(2, false)])[..]);
    }

    #[test]
    fn every_pad_changing_fits() {
        let mut source = TouchEventSource::new(&[false; 22]);
        let got = source.poll(&[true; 22]);
        assert_eq!(got.len(), 22);
        assert!(got.iter().enumerate().all(|(i, e)| e.key_number == i && e.pressed));
    }

    #[test]
    fn hold_reports_touched_pads_with_unclamped_strength() {
        let snapshot = TouchSnapshot {
            touched: [true, false, true, true],
            raw_values: [1500, 900, 1000, 1250],
            thresholds: [1200, 1200, 1200, 1200],
        };
        let mut held = std::vec::Vec::new();
        snapshot.check_hold(|pad, strength| held.push((pad, strength)));
        assert_eq!(held, [(0, 300), (2, -200), (3, 50)]);
    }

    #[test]
    fn hold_with_nothing_touched() {
        let mut calls = 0;
        TouchSnapshot::<3>::new().check_hold(|_, _| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn strength_at_extreme_readings() {
        let snapshot = TouchSnapshot {
            touched: [true, true, true, true],
            raw_values: [0, i32::MAX as u32, u32::MAX, 0],
            thresholds: [u32::MAX, 1 << 31, 0, 1 << 31],
        };
        assert_eq!(snapshot.strength(0), i32::MIN);
        assert_eq!(snapshot.strength(1), -1);
        assert_eq!(snapshot.strength(2), i32::MAX);
        assert_eq!(snapshot.strength(3), i32::MIN);

        let mut held = std::vec::Vec::new();
        snapshot.check_hold(|pad, strength| held.push((pad, strength)));
        assert_eq!(held, [(0, i32::MIN), (1, -1), (2, i32::MAX), (3, i32::MIN)]);
    }

    // pad `i` reads low on its `low_after[i]`-th poll, never if `None`
    fn discharge(
        skip: &[bool; 3],
        low_after: [Option<u32>; 3],
        counts: &mut [u32; 3],
    ) -> (u32, [u32; 3]) {
        let mut calls = [0u32; 3];
        let rounds = count_discharge(
            skip,
            1000,
            |i| {
                calls[i] += 1;
                low_after[i].map_or(false, |n| calls[i] >= n)
            },
            counts,
        );
        (rounds, calls)
    }

    #[test]
    fn discharge_counts_rounds_until_low() {
        let mut counts = [0; 3];
        let (rounds, _) = discharge(&[false; 3], [Some(1), Some(4), Some(2)], &mut counts);
        assert_eq!(rounds, 4);
        assert_eq!(counts, [0, 3, 1]);
    }

    #[test]
    fn pad_that_never_discharges_runs_to_the_limit() {
        let mut counts = [0; 3];
        let (rounds, _) = discharge(&[false; 3], [Some(4), None, Some(4)], &mut counts);
        assert_eq!(rounds, 1000);
        assert_eq!(counts, [3, 1000, 3]);
    }

    #[test]
    fn skipped_pad_does_not_hold_up_the_others() {
        let mut counts = [0; 3];
        let (rounds, calls) = discharge(&[false, true, false], [Some(4), None, Some(4)], &mut counts);
        assert_eq!(rounds, 4);
        assert_eq!(calls[1], 0);
        assert_eq!(counts, [3, 1000, 3]);

        // all skipped: nothing is polled at all
        let mut counts = [5; 3];
        let (rounds, calls) = discharge(&[true; 3], [None; 3], &mut counts);
        assert_eq!(rounds, 0);
        assert_eq!(calls, [0; 3]);
        assert_eq!(counts, [1005; 3]);
    }
}

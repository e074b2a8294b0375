// Capacitive sensing on plain GPIOs with external 1M pull-downs:
// charge the pad high, release it and count how long it takes to read low.
// A finger adds capacitance, so touched pads take longer.

use defmt::Format;

use embassy_futures::yield_now;
use embassy_rp::gpio::{Flex, Pull};
use embassy_time::Timer;

use crate::config::*;
use crate::touch::{count_discharge, TouchSnapshot};

#[derive(Default, Clone, Copy, Format, PartialEq)]
pub enum CalibrationStatus {
    #[default]
    NA,
    Ok,
    /// Never discharged: pull-down missing or pad shorted high
    Bad,
}

pub struct TouchPads<'a> {
    pins: [Flex<'a>; NUM_TOUCH_PADS],
    thresholds: [u32; NUM_TOUCH_PADS],
    status: [CalibrationStatus; NUM_TOUCH_PADS],
}

impl<'a> TouchPads<'a> {
    pub fn new(mut pins: [Flex<'a>; NUM_TOUCH_PADS]) -> Self {
        for pin in &mut pins {
            pin.set_pull(Pull::None);
        }

        Self {
            pins,
            thresholds: [u32::MAX; NUM_TOUCH_PADS],
            status: Default::default(),
        }
    }

    async fn measure_once(&mut self, counts: &mut [u32; NUM_TOUCH_PADS]) {
        for pin in &mut self.pins {
            pin.set_as_output();
            pin.set_high();
        }

        Timer::after(TOUCH_CHARGE_TIME).await;

        for pin in &mut self.pins {
            pin.set_as_input();
        }

        // busy loop, the loop count is the measurement;
        // pads found bad at calibration would keep it running to the limit
        let skip = core::array::from_fn(|i| self.status[i] == CalibrationStatus::Bad);
        let pins = &self.pins;
        count_discharge(&skip, TOUCH_MAX_COUNT, |i| pins[i].is_low(), counts);
    }

    /// Raw readings of all pads, each summed over `TOUCH_SAMPLES` passes.
    pub async fn read_raw(&mut self) -> [u32; NUM_TOUCH_PADS] {
        let mut counts = [0; NUM_TOUCH_PADS];
        for _ in 0..TOUCH_SAMPLES {
            self.measure_once(&mut counts).await;
            yield_now().await;
        }
        counts
    }

    /// Measure the untouched baseline and derive per-pad thresholds.
    /// Nothing may touch the pads while this runs.
    pub async fn calibrate(&mut self, threshold_adjust: u32) -> [CalibrationStatus; NUM_TOUCH_PADS] {
        info!("Calibration start");
        let mut sums = [0u32; NUM_TOUCH_PADS];
        for _ in 0..CALIBRATION_PASSES {
            let raw = self.read_raw().await;
            for (sum, value) in sums.iter_mut().zip(raw) {
                *sum += value;
            }
        }

        for i in 0..NUM_TOUCH_PADS {
            let baseline = sums[i] / CALIBRATION_PASSES;
            if baseline >= TOUCH_MAX_COUNT * TOUCH_SAMPLES {
                warn!("pad {}: never discharges", i);
                self.status[i] = CalibrationStatus::Bad;
                self.thresholds[i] = u32::MAX;
            } else {
                self.status[i] = CalibrationStatus::Ok;
                self.thresholds[i] = baseline + baseline / 20 + 100 + threshold_adjust;
            }
            info!(
                "pad {}: baseline {} threshold {} {}",
                i, baseline, self.thresholds[i], self.status[i]
            );
        }
        info!("Calibration end");
        self.status
    }

    pub fn thresholds(&self) -> &[u32; NUM_TOUCH_PADS] {
        &self.thresholds
    }

    pub async fn sample(&mut self) -> TouchSnapshot<NUM_TOUCH_PADS> {
        let raw_values = self.read_raw().await;
        let touched = core::array::from_fn(|i| {
            self.status[i] == CalibrationStatus::Ok && raw_values[i] > self.thresholds[i]
        });
        TouchSnapshot {
            touched,
            raw_values,
            thresholds: self.thresholds,
        }
    }
}

use crate::color::{self, Chsv};
use crate::config::NUM_LEDS;

const SLIDER_SATURATION: f32 = 0.98;
const SLIDER_VALUE: f32 = 0.25;

const LEFT_SLIDER: [usize; 2] = [1, 3];
const MID_SLIDER: [usize; 3] = [6, 8, 10];
const RIGHT_SLIDER: [usize; 2] = [13, 15];

pub const LEFT_HUE: f32 = 0.05;
pub const MID_HUE: f32 = 0.30;
pub const RIGHT_HUE: f32 = 0.6;

/// Frame buffer for the LED strip, written out by the driver on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct LedStrip {
    colors: [u32; NUM_LEDS],
}

impl LedStrip {
    pub fn new() -> Self {
        Self {
            colors: [0; NUM_LEDS],
        }
    }

    pub fn colors(&self) -> &[u32; NUM_LEDS] {
        &self.colors
    }

    pub fn get(&self, led: usize) -> Option<u32> {
        self.colors.get(led).copied()
    }

    pub fn set(&mut self, led: usize, rgb: u32) -> Result<(), &'static str> {
        let c = self.colors.get_mut(led).ok_or("Wrong LED number")?;
        *c = rgb;
        Ok(())
    }

    pub fn fill(&mut self, rgb: u32) {
        self.colors.fill(rgb);
    }

    /// Dim every LED by `fade_by` per channel.
    pub fn fade(&mut self, fade_by: u8) {
        for c in &mut self.colors {
            *c = color::fade(*c, fade_by);
        }
    }

    fn slider(&mut self, leds: &[usize], hue: f32, values: &[f32]) {
        for (&led, &value) in leds.iter().zip(values) {
            self.colors[led] = Chsv::new(hue, SLIDER_SATURATION, value).pack();
        }
    }

    /// Show `v` (0.0..1.0) on the left slider LEDs
    pub fn control_left(&mut self, v: f32, hue: f32) {
        self.slider(&LEFT_SLIDER, hue, &[SLIDER_VALUE - v, SLIDER_VALUE * v]);
    }

    pub fn control_mid(&mut self, v: f32, hue: f32) {
        self.slider(
            &MID_SLIDER,
            hue,
            &[SLIDER_VALUE - v, SLIDER_VALUE * 0.5, SLIDER_VALUE * v],
        );
    }

    pub fn control_right(&mut self, v: f32, hue: f32) {
        self.slider(&RIGHT_SLIDER, hue, &[SLIDER_VALUE - v, SLIDER_VALUE * v]);
    }
}

impl Default for LedStrip {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_out_of_range() {
        let mut leds = LedStrip::new();
        assert!(leds.set(NUM_LEDS - 1, 0x010203).is_ok());
        assert_eq!(leds.get(NUM_LEDS - 1), Some(0x010203));
        assert_eq!(leds.set(NUM_LEDS, 0x010203), Err("Wrong LED number"));
        assert_eq!(leds.get(NUM_LEDS), None);
    }

    #[test]
    fn fade_all() {
        let mut leds = LedStrip::new();
        leds.fill(0x060402);
        leds.fade(5);
        assert!(leds.colors().iter().all(|&c| c == 0x010000));
        leds.fade(5);
        assert!(leds.colors().iter().all(|&c| c == 0));
    }

    #[test]
    fn left_slider_touches_only_its_leds() {
        let mut leds = LedStrip::new();
        leds.control_left(1.0, LEFT_HUE);
        for (i, &c) in leds.colors().iter().enumerate() {
            match i {
                1 => assert_eq!(c, 0),
                3 => assert_ne!(c, 0),
                _ => assert_eq!(c, 0, "led {}", i),
            }
        }
    }

    #[test]
    fn slider_at_zero_lights_first_led() {
        let mut leds = LedStrip::new();
        leds.control_right(0.0, RIGHT_HUE);
        assert_eq!(leds.get(13), Some(Chsv::new(RIGHT_HUE, 0.98, 0.25).pack()));
        assert_eq!(leds.get(15), Some(0));
    }

    #[test]
    fn mid_slider_center_is_constant() {
        let mut a = LedStrip::new();
        let mut b = LedStrip::new();
        a.control_mid(0.1, MID_HUE);
        b.control_mid(0.9, MID_HUE);
        assert_eq!(a.get(8), b.get(8));
        assert_ne!(a.get(8), Some(0));
        assert_ne!(a.get(10), b.get(10));
    }
}

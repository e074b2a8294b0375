//! HSV colors packed for the LED strip.
//!
//! Colors travel through the code as packed `0xRRGGBB` words, the format the
//! WS2812B driver consumes.

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Chsv {
    /// 0.0..1.0 around the color wheel, wraps outside that range
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

fn clamp_norm(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn denormalize(v: f32) -> u32 {
    let v = (v * 256.0) as i32;
    v.clamp(0, 255) as u32
}

/// `v - floor(v)` without libm
fn fract(v: f32) -> f32 {
    let f = v - (v as i32) as f32;
    if f < 0.0 {
        f + 1.0
    } else {
        f
    }
}

impl Chsv {
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation: clamp_norm(saturation),
            value: clamp_norm(value),
        }
    }

    /// Normalized (r, g, b)
    pub fn to_rgb(&self) -> (f32, f32, f32) {
        let hue = fract(self.hue) * 6.0;
        let sextant = hue as u32;
        let frac = hue - sextant as f32;

        let (r, g, b) = match sextant % 6 {
            0 => (1.0, frac, 0.0),
            1 => (1.0 - frac, 1.0, 0.0),
            2 => (0.0, 1.0, frac),
            3 => (0.0, 1.0 - frac, 1.0),
            4 => (frac, 0.0, 1.0),
            _ => (1.0, 0.0, 1.0 - frac),
        };

        let invsat = 1.0 - self.saturation;
        let apply = |c: f32| (c * self.saturation + invsat) * self.value;
        (apply(r), apply(g), apply(b))
    }

    pub fn pack(&self) -> u32 {
        let (r, g, b) = self.to_rgb();
        (denormalize(r) << 16) | (denormalize(g) << 8) | denormalize(b)
    }
}

pub fn unpack(rgb: u32) -> (u8, u8, u8) {
    ((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Scale every channel by `brightness` (0.0..1.0).
pub fn scale(rgb: u32, brightness: f32) -> u32 {
    let brightness = clamp_norm(brightness);
    let (r, g, b) = unpack(rgb);
    let s = |c: u8| (c as f32 * brightness) as u8;
    pack(s(r), s(g), s(b))
}

/// Subtract `amount` from every channel, stopping at zero.
pub fn fade(rgb: u32, amount: u8) -> u32 {
    let (r, g, b) = unpack(rgb);
    pack(
        r.saturating_sub(amount),
        g.saturating_sub(amount),
        b.saturating_sub(amount),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Chsv::new(0.0, 1.0, 1.0).pack(), 0xff0000);
        assert_eq!(Chsv::new(1.0 / 3.0, 1.0, 1.0).pack(), 0x00ff00);
        assert_eq!(Chsv::new(2.0 / 3.0, 1.0, 1.0).pack(), 0x0000ff);
        assert_eq!(Chsv::new(0.5, 1.0, 1.0).pack(), 0x00ffff);
    }

    #[test]
    fn hue_wraps() {
        assert_eq!(Chsv::new(1.0, 1.0, 1.0).pack(), 0xff0000);
        assert_eq!(Chsv::new(-0.5, 1.0, 1.0).pack(), 0x00ffff);
    }

    #[test]
    fn value_and_saturation_are_clamped() {
        assert_eq!(Chsv::new(0.3, 0.98, -0.5).pack(), 0);
        assert_eq!(Chsv::new(0.0, 2.0, 1.0), Chsv::new(0.0, 1.0, 1.0));
        assert_eq!(Chsv::new(0.7, 0.0, 0.5).pack(), 0x808080);
    }

    #[test]
    fn fade_stops_at_zero() {
        assert_eq!(fade(0x0a0305, 5), 0x050000);
        assert_eq!(fade(0x000000, 5), 0);
        assert_eq!(fade(0xffffff, 0), 0xffffff);
    }

    #[test]
    fn brightness_scaling() {
        assert_eq!(scale(0xff8000, 0.5), 0x7f4000);
        assert_eq!(scale(0xffffff, 0.0), 0);
        assert_eq!(scale(0x123456, 1.0), 0x123456);
    }
}

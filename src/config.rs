use embassy_time::Duration;

// constants used throughout the code

// touch pads
pub const NUM_TOUCH_PADS: usize = 22;
/// Charge/discharge passes summed into one raw reading
pub const TOUCH_SAMPLES: u32 = 10;
/// Give up on a pad that has not discharged after this many loop iterations
pub const TOUCH_MAX_COUNT: u32 = 10_000;
pub const TOUCH_CHARGE_TIME: Duration = Duration::from_micros(10);
pub const CALIBRATION_PASSES: u32 = 8;
/// The application should poll at least this often not to miss short taps
pub const TOUCH_POLL_INTERVAL: Duration = Duration::from_millis(10);

// leds
pub const NUM_LEDS: usize = 20;
pub const LED_BRIGHTNESS: f32 = 0.2;
pub const LED_FADE_INTERVAL: Duration = Duration::from_millis(20);
pub const DEFAULT_FADE_BY: u8 = 5;

pub const WELCOME_COLORS: [u32; 5] = [0x800000, 0x808000, 0x008000, 0x008080, 0x000080];

// audio
pub const MAX_VOICES: usize = 8;
pub const SYNTH_DEFAULT_LEVEL: f32 = 0.75;
pub const PWM_TOP: u16 = 1023;

// midi
pub const MIDI_BAUDRATE: u32 = 31250;
pub const MIDI_CHANNEL_SIZE: usize = 16;
pub const SERIAL_MIDI_BUF_LEN: usize = 64;
pub const BASE_NOTE: u8 = 48;
pub const NOTE_VELOCITY: u8 = 100;

/// Board setup chosen at startup, the rest is fixed by the hardware.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardwareConfig {
    pub sample_rate: u32,
    pub num_voices: usize,
    /// Added on top of the calibrated baseline of every pad
    pub touch_threshold_adjust: u32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            sample_rate: 28000,
            num_voices: 1,
            touch_threshold_adjust: 300,
        }
    }
}

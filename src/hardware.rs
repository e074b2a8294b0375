//! Everything the application needs from the board, constructed once at
//! startup and passed around by reference.

use core::cell::RefCell;

use embassy_rp::gpio::Output;

use crate::board::BoardSetup;
use crate::config::{HardwareConfig, LED_BRIGHTNESS, NUM_TOUCH_PADS};
use crate::leds::{LedStrip, LEFT_HUE, MID_HUE, RIGHT_HUE};
use crate::mixer::Mixer;
use crate::pwm_audio::PwmAudioOut;
use crate::touch::{TouchEventSource, TouchEvents, TouchSnapshot};
use crate::touch_sensors::TouchPads;
use crate::ws2812b::WS2812B;

pub struct Hardware<'d> {
    pub config: HardwareConfig,
    pub leds: LedStrip,
    pub mixer: &'d RefCell<Mixer>,
    led_driver: WS2812B,
    touch_pads: TouchPads<'d>,
    touch_events: TouchEventSource<NUM_TOUCH_PADS>,
    last_snapshot: TouchSnapshot<NUM_TOUCH_PADS>,
    // held high for the lifetime of the program, see `BoardSetup::pwr_mode`
    _pwr_mode: Output<'d>,
}

/// Peripherals that run in their own tasks and are not owned by [`Hardware`].
pub struct HardwareParts<'d> {
    pub led_out: Output<'d>,
    pub audio_out: PwmAudioOut<'d>,
    pub midi_uart: crate::board::MidiUart,
    pub midi_tx_pin: crate::board::MidiTxPin,
    pub midi_rx_pin: crate::board::MidiRxPin,
}

impl<'d> Hardware<'d> {
    /// `mixer` is shared with the audio task, which is started separately
    /// from the returned [`HardwareParts`].
    pub async fn new(
        board: BoardSetup,
        config: HardwareConfig,
        mixer: &'d RefCell<Mixer>,
    ) -> Result<(Self, HardwareParts<'d>), &'static str> {
        info!("Hardware init: {}", config);
        if mixer.borrow().num_voices() != config.num_voices {
            return Err("Mixer does not match the configuration");
        }
        let led_driver = WS2812B::new(board.leds_pio, board.leds_pin, LED_BRIGHTNESS);

        let mut touch_pads = TouchPads::new(board.touch_pins);
        touch_pads.calibrate(config.touch_threshold_adjust).await;
        let last_snapshot = touch_pads.sample().await;
        let touch_events = TouchEventSource::new(&last_snapshot.touched);

        let audio_out = PwmAudioOut::new(board.audio_pwm, board.audio_pin, config.sample_rate);

        Ok((
            Self {
                config,
                leds: LedStrip::new(),
                mixer,
                led_driver,
                touch_pads,
                touch_events,
                last_snapshot,
                _pwr_mode: board.pwr_mode,
            },
            HardwareParts {
                led_out: board.led_out,
                audio_out,
                midi_uart: board.midi_uart,
                midi_tx_pin: board.midi_tx_pin,
                midi_rx_pin: board.midi_rx_pin,
            },
        ))
    }

    /// Sample all pads and return press/release events since the last call.
    /// Must be called frequently.
    pub async fn check_touch(&mut self) -> TouchEvents<NUM_TOUCH_PADS> {
        self.last_snapshot = self.touch_pads.sample().await;
        self.touch_events.poll(&self.last_snapshot.touched)
    }

    /// Call `hold_func(pad, strength)` for every pad touched at the last
    /// [`check_touch`](Self::check_touch). Does not sample the pads again,
    /// the readings are those of that call.
    pub fn check_touch_hold(&self, hold_func: impl FnMut(usize, i32)) {
        self.last_snapshot.check_hold(hold_func);
    }

    pub fn set_synth_volume(&self, vol: f32) {
        self.mixer.borrow_mut().set_synth_volume(vol);
    }

    pub fn fade_leds(&mut self, fade_by: u8) {
        self.leds.fade(fade_by);
    }

    pub fn leds_control_left(&mut self, v: f32) {
        self.leds.control_left(v, LEFT_HUE);
    }

    pub fn leds_control_mid(&mut self, v: f32) {
        self.leds.control_mid(v, MID_HUE);
    }

    pub fn leds_control_right(&mut self, v: f32) {
        self.leds.control_right(v, RIGHT_HUE);
    }

    /// Push the LED buffer out to the strip.
    pub async fn show_leds(&mut self) {
        self.led_driver.write(self.leds.colors()).await;
    }
}

use core::cell::RefCell;

use embassy_rp::pwm::{Config, Pwm};
use embassy_rp::Peripheral;
use embassy_time::{Duration, Ticker};

use crate::board::{AudioPin, AudioPwm};
use crate::config::PWM_TOP;
use crate::mixer::{Mixer, SampleSource};

/// Audio out as PWM duty cycle, filtered to analog on the board.
pub struct PwmAudioOut<'d> {
    pwm: Pwm<'d, AudioPwm>,
    config: Config,
    sample_rate: u32,
}

impl<'d> PwmAudioOut<'d> {
    pub fn new(
        pwm_per: impl Peripheral<P = AudioPwm> + 'd,
        pin: impl Peripheral<P = AudioPin> + 'd,
        sample_rate: u32,
    ) -> Self {
        let mut config = Config::default();
        config.top = PWM_TOP;
        config.compare_a = PWM_TOP / 2;
        let pwm = Pwm::new_output_a(pwm_per, pin, config.clone());
        Self {
            pwm,
            config,
            sample_rate,
        }
    }

    fn write_sample(&mut self, sample: i16) {
        let unsigned = (sample as i32 + 0x8000) as u32;
        self.config.compare_a = ((unsigned * (PWM_TOP as u32 + 1)) >> 16) as u16;
        self.pwm.set_config(&self.config);
    }

    /// Play the mixed `voices` forever. The mixer is shared so that levels
    /// can change while playing.
    pub async fn task(&mut self, mixer: &RefCell<Mixer>, voices: &mut [&mut dyn SampleSource]) -> ! {
        info!("audio: {} Hz, {} voices", self.sample_rate, voices.len());
        let mut ticker = Ticker::every(Duration::from_hz(self.sample_rate as u64));
        loop {
            let sample = mixer.borrow().mix_sources(voices);
            self.write_sample(sample);
            ticker.next().await;
        }
    }
}

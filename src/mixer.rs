//! Voice levels and sample mixing for the audio output.
//!
//! Producing the voices is left to the application; the mixer only scales
//! and sums them. The synthesizer is conventionally on the last voice.

use heapless::Vec;

use crate::config::{MAX_VOICES, SYNTH_DEFAULT_LEVEL};

/// Anything that can feed the mixer one sample at a time.
pub trait SampleSource {
    fn next_sample(&mut self) -> i16;
}

pub struct Silence;

impl SampleSource for Silence {
    fn next_sample(&mut self) -> i16 {
        0
    }
}

pub struct Mixer {
    levels: Vec<f32, MAX_VOICES>,
    synth_voice: usize,
}

impl Mixer {
    pub fn new(num_voices: usize) -> Result<Self, &'static str> {
        if num_voices == 0 || num_voices > MAX_VOICES {
            return Err("Wrong number of voices");
        }
        let mut levels = Vec::new();
        levels.resize(num_voices, 1.0).map_err(|_| "Wrong number of voices")?;
        let synth_voice = num_voices - 1;
        levels[synth_voice] = SYNTH_DEFAULT_LEVEL;
        Ok(Self {
            levels,
            synth_voice,
        })
    }

    pub fn num_voices(&self) -> usize {
        self.levels.len()
    }

    pub fn synth_voice(&self) -> usize {
        self.synth_voice
    }

    pub fn voice_level(&self, voice: usize) -> Option<f32> {
        self.levels.get(voice).copied()
    }

    pub fn set_voice_level(&mut self, voice: usize, level: f32) -> Result<(), &'static str> {
        let l = self.levels.get_mut(voice).ok_or("Wrong voice number")?;
        *l = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        debug!("voice {} level {}", voice, *l);
        Ok(())
    }

    pub fn synth_volume(&self) -> f32 {
        self.levels[self.synth_voice]
    }

    /// Set volume of the synth part
    pub fn set_synth_volume(&mut self, level: f32) {
        let voice = self.synth_voice;
        let _ = self.set_voice_level(voice, level);
    }

    /// Mix one sample per voice; missing voices count as silent.
    pub fn mix(&self, samples: &[i16]) -> i16 {
        let sum: f32 = self
            .levels
            .iter()
            .zip(samples)
            .map(|(&level, &s)| s as f32 * level)
            .sum();
        // float to int casts saturate
        sum as i16
    }

    /// Pull one sample from every source and mix them.
    pub fn mix_sources(&self, sources: &mut [&mut dyn SampleSource]) -> i16 {
        let mut samples = [0i16; MAX_VOICES];
        for (sample, source) in samples.iter_mut().zip(sources.iter_mut()) {
            *sample = source.next_sample();
        }
        self.mix(&samples[..self.levels.len()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(i16);

    impl SampleSource for Constant {
        fn next_sample(&mut self) -> i16 {
            self.0
        }
    }

    #[test]
    fn voice_count_is_checked() {
        assert!(Mixer::new(0).is_err());
        assert!(Mixer::new(MAX_VOICES + 1).is_err());
        let mixer = Mixer::new(1).unwrap();
        assert_eq!(mixer.num_voices(), 1);
        assert_eq!(mixer.synth_voice(), 0);
    }

    #[test]
    fn synth_is_last_voice() {
        let mixer = Mixer::new(3).unwrap();
        assert_eq!(mixer.synth_voice(), 2);
        assert_eq!(mixer.voice_level(0), Some(1.0));
        assert_eq!(mixer.voice_level(2), Some(SYNTH_DEFAULT_LEVEL));
        assert_eq!(mixer.voice_level(3), None);
    }

    #[test]
    fn synth_volume() {
        let mut mixer = Mixer::new(2).unwrap();
        mixer.set_synth_volume(0.5);
        assert_eq!(mixer.voice_level(1), Some(0.5));
        assert_eq!(mixer.synth_volume(), 0.5);
        mixer.set_synth_volume(3.0);
        assert_eq!(mixer.voice_level(1), Some(1.0));
        assert_eq!(mixer.set_voice_level(2, 0.5), Err("Wrong voice number"));
    }

    #[test]
    fn mixing_scales_and_saturates() {
        let mut mixer = Mixer::new(2).unwrap();
        mixer.set_voice_level(1, 0.5).unwrap();
        assert_eq!(mixer.mix(&[1000, 1000]), 1500);
        assert_eq!(mixer.mix(&[1000]), 1000);
        assert_eq!(mixer.mix(&[i16::MAX, i16::MAX]), i16::MAX);
        assert_eq!(mixer.mix(&[i16::MIN, i16::MIN]), i16::MIN);
    }

    #[test]
    fn mixing_sources() {
        let mixer = Mixer::new(2).unwrap();
        let mut a = Constant(100);
        let mut s = Silence;
        let mut voices: [&mut dyn SampleSource; 2] = [&mut a, &mut s];
        assert_eq!(mixer.mix_sources(&mut voices), 100);
        let mut voices: [&mut dyn SampleSource; 2] = [&mut s, &mut a];
        assert_eq!(mixer.mix_sources(&mut voices), 75);
    }
}

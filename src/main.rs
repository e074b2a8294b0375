//! picotouch_synth firmware: touch pads play MIDI notes on the serial MIDI
//! port and light up their LEDs, incoming notes light the LEDs too.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_futures::join::join3;
use embassy_time::{Ticker, Timer};
use {defmt_rtt as _, panic_probe as _};

use picotouch_synth::color::Chsv;
use picotouch_synth::config::*;
use picotouch_synth::hardware::{Hardware, HardwareParts};
use picotouch_synth::midi::{MidiChannel, MidiChannelReceiver, MidiChannelSender, MidiMsg};
use picotouch_synth::mixer::{Mixer, SampleSource, Silence};
use picotouch_synth::pads::{self, ModePad, PadKind};
use picotouch_synth::serial_midi::SerialMidi;
use picotouch_synth::touch::TouchEvent;

const VOLUME_STEP: f32 = 0.1;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let board = picotouch_synth::board::init(p);
    let config = HardwareConfig::default();

    info!("picotouch_synth starting");

    let mixer = RefCell::new(unwrap!(Mixer::new(config.num_voices)));
    let (mut hw, parts) = unwrap!(Hardware::new(board, config, &mixer).await);
    let HardwareParts {
        mut led_out,
        mut audio_out,
        midi_uart,
        midi_tx_pin,
        midi_rx_pin,
    } = parts;

    info!("led on!");
    led_out.set_high();

    let midi_out = MidiChannel::new();
    let midi_in = MidiChannel::new();
    let mut serial_midi = SerialMidi::new(
        midi_uart,
        midi_tx_pin,
        midi_rx_pin,
        midi_out.receiver(),
        midi_in.sender(),
    );

    let mut silence = Silence;
    let mut voices: [&mut dyn SampleSource; 1] = [&mut silence];
    let audio_task = audio_out.task(&mixer, &mut voices);
    let main_task = main_loop(&mut hw, midi_out.sender(), midi_in.receiver());

    join3(main_task, serial_midi.task(), audio_task).await;
}

fn pad_color(pad: usize) -> u32 {
    Chsv::new(pad as f32 / NUM_TOUCH_PADS as f32, 1.0, 1.0).pack()
}

fn light_pad(hw: &mut Hardware<'_>, pad: usize, rgb: u32) {
    // pads past the end of the strip have no LED
    let _ = hw.leds.set(pad, rgb);
}

async fn welcome(hw: &mut Hardware<'_>) {
    for (i, &color) in WELCOME_COLORS.iter().cycle().take(NUM_LEDS).enumerate() {
        light_pad(hw, i, color);
        hw.show_leds().await;
        Timer::after_millis(30).await;
    }
    for _ in 0..64 {
        hw.fade_leds(4 * DEFAULT_FADE_BY);
        hw.show_leds().await;
        Timer::after(LED_FADE_INTERVAL).await;
    }
}

async fn handle_touch(hw: &mut Hardware<'_>, midi_tx: &MidiChannelSender<'_>, event: TouchEvent) {
    let pad = event.key_number;
    match PadKind::of(pad) {
        Some(PadKind::Top) | Some(PadKind::Bottom(_)) => {
            let Some(note) = pads::pad_to_note(pad, BASE_NOTE) else {
                return;
            };
            let msg = if event.pressed {
                light_pad(hw, pad, pad_color(pad));
                MidiMsg::NoteOn {
                    channel: 0,
                    note,
                    velocity: NOTE_VELOCITY,
                }
            } else {
                MidiMsg::NoteOff {
                    channel: 0,
                    note,
                    velocity: 0,
                }
            };
            midi_tx.send(msg).await;
        }
        Some(PadKind::Mode(mode)) if event.pressed => {
            let level = hw.mixer.borrow().synth_volume();
            match mode {
                ModePad::X => hw.set_synth_volume(level - VOLUME_STEP),
                ModePad::Y => hw.set_synth_volume(level + VOLUME_STEP),
                _ => (),
            }
            let level = hw.mixer.borrow().synth_volume();
            hw.leds_control_right(level);
            info!("mode {}: synth volume {}", mode, level);
        }
        _ => {}
    }
}

async fn main_loop(
    hw: &mut Hardware<'_>,
    midi_tx: MidiChannelSender<'_>,
    midi_rx: MidiChannelReceiver<'_>,
) -> ! {
    welcome(hw).await;

    let mut ticker = Ticker::every(TOUCH_POLL_INTERVAL);
    loop {
        for event in hw.check_touch().await {
            debug!("touch: {}", event);
            handle_touch(hw, &midi_tx, event).await;
        }

        // keep held keys lit, the harder the touch the brighter
        let mut held = [0i32; NUM_TOUCH_PADS];
        hw.check_touch_hold(|pad, strength| held[pad] = strength);
        for (pad, &strength) in held.iter().enumerate() {
            if strength > 0 && pads::pad_to_note(pad, BASE_NOTE).is_some() {
                let value = 0.25 + strength as f32 / 2000.0;
                let hue = pad as f32 / NUM_TOUCH_PADS as f32;
                light_pad(hw, pad, Chsv::new(hue, 1.0, value).pack());
            }
        }

        while let Ok(msg) = midi_rx.try_receive() {
            if let MidiMsg::NoteOn { note, .. } = msg {
                if let Some(pad) = note.checked_sub(BASE_NOTE) {
                    light_pad(hw, pad as usize, 0xffffff);
                }
            }
        }

        hw.fade_leds(DEFAULT_FADE_BY);
        hw.show_leds().await;
        ticker.next().await;
    }
}

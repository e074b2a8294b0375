#![no_std]
#![no_main]

use defmt::{unreachable, *};
use embassy_executor::Spawner;
use embassy_futures::join::join;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use picotouch_synth::config::{BASE_NOTE, NOTE_VELOCITY};
use picotouch_synth::midi::{MidiChannel, MidiMsg};
use picotouch_synth::serial_midi::SerialMidi;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let b = picotouch_synth::board::init(p);

    info!("Serial MIDI test...");

    info!("led on!");
    let mut led = b.led_out;
    led.set_high();

    let midi_out = MidiChannel::new();
    let midi_in = MidiChannel::new();
    let mut serial_midi = SerialMidi::new(
        b.midi_uart,
        b.midi_tx_pin,
        b.midi_rx_pin,
        midi_out.receiver(),
        midi_in.sender(),
    );

    let send_task = async {
        loop {
            midi_out
                .send(MidiMsg::NoteOn {
                    channel: 0,
                    note: BASE_NOTE,
                    velocity: NOTE_VELOCITY,
                })
                .await;
            Timer::after_millis(100).await;
            midi_out
                .send(MidiMsg::NoteOff {
                    channel: 0,
                    note: BASE_NOTE,
                    velocity: 0,
                })
                .await;
            while let Ok(msg) = midi_in.try_receive() {
                info!("received: {}", msg);
            }
            Timer::after_millis(1000).await;
        }
    };

    join(serial_midi.task(), send_task).await;

    unreachable!();
}

//! Sets all touch pad pins to high-impedance input state and blinks the LED rapidly,
//! usefull for troubleshooting the pads (so the external 1Mohm pull-downs are measurable)

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::Pull;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    let mut b = picotouch_synth::board::init(p);

    info!("Setting touch pads to high-Z");

    for pin in &mut b.touch_pins {
        pin.set_pull(Pull::None);
        pin.set_as_input();
    }

    let mut led = b.led_out;
    loop {
        let low: u32 = b.touch_pins.iter().map(|pin| pin.is_low() as u32).sum();
        info!("{} of {} pads read low", low, b.touch_pins.len());

        led.set_high();
        Timer::after_millis(100).await;

        led.set_low();
        Timer::after_millis(100).await;
    }
}

use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Level, Output};
use embassy_rp::peripherals::*;
use embassy_rp::Peripherals;

use crate::config::NUM_TOUCH_PADS;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
    UART1_IRQ => embassy_rp::uart::BufferedInterruptHandler<UART1>;
});

pub type LedsPio = PIO0;
pub type LedsPin = PIN_26;

pub type AudioPwm = PWM_CH3;
pub type AudioPin = PIN_22;

pub type MidiUart = UART1;
pub type MidiTxPin = PIN_20;
pub type MidiRxPin = PIN_21;

/// Every peripheral of the picotouch_synth board, handed out once at startup.
pub struct BoardSetup {
    pub led_out: Output<'static>,
    /// High selects PWM mode of the Pico regulator: less ripple, less efficient
    pub pwr_mode: Output<'static>,

    pub leds_pio: LedsPio,
    pub leds_pin: LedsPin,

    pub touch_pins: [Flex<'static>; NUM_TOUCH_PADS],

    pub audio_pwm: AudioPwm,
    pub audio_pin: AudioPin,

    pub midi_uart: MidiUart,
    pub midi_tx_pin: MidiTxPin,
    pub midi_rx_pin: MidiRxPin,
}

pub fn init(p: Peripherals) -> BoardSetup {
    BoardSetup {
        led_out: Output::new(p.PIN_25, Level::Low),
        pwr_mode: Output::new(p.PIN_23, Level::High),

        leds_pio: p.PIO0,
        leds_pin: p.PIN_26,

        touch_pins: [
            Flex::new(p.PIN_0),
            Flex::new(p.PIN_1),
            Flex::new(p.PIN_2),
            Flex::new(p.PIN_3),
            Flex::new(p.PIN_4),
            Flex::new(p.PIN_5),
            Flex::new(p.PIN_6),
            Flex::new(p.PIN_7),
            Flex::new(p.PIN_8),
            Flex::new(p.PIN_9),
            Flex::new(p.PIN_10),
            Flex::new(p.PIN_11),
            Flex::new(p.PIN_12),
            Flex::new(p.PIN_13),
            Flex::new(p.PIN_14),
            Flex::new(p.PIN_15),
            Flex::new(p.PIN_16),
            Flex::new(p.PIN_17),
            Flex::new(p.PIN_18),
            Flex::new(p.PIN_19),
            Flex::new(p.PIN_27),
            Flex::new(p.PIN_28),
        ],

        audio_pwm: p.PWM_CH3,
        audio_pin: p.PIN_22,

        midi_uart: p.UART1,
        midi_tx_pin: p.PIN_20,
        midi_rx_pin: p.PIN_21,
    }
}

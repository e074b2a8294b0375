use embassy_futures::join::join;
use embassy_rp::uart::{BufferedUart, BufferedUartRx, BufferedUartTx};
use embedded_io_async::Read;
use static_cell::StaticCell;

use crate::board::{Irqs, MidiRxPin, MidiTxPin, MidiUart};
use crate::config::{MIDI_BAUDRATE, SERIAL_MIDI_BUF_LEN};
use crate::midi::{MidiChannelReceiver, MidiChannelSender, MidiParser};

pub struct SerialMidi<'d> {
    uart_tx: BufferedUartTx<'d, MidiUart>,
    uart_rx: BufferedUartRx<'d, MidiUart>,
    midi_rx: MidiChannelReceiver<'d>,
    midi_tx: MidiChannelSender<'d>,
}

impl<'d> SerialMidi<'d> {
    /// Messages received on `midi_rx` go out on the wire, messages parsed
    /// from the wire are sent to `midi_tx`.
    pub fn new(
        uart: MidiUart,
        tx_pin: MidiTxPin,
        rx_pin: MidiRxPin,
        midi_rx: MidiChannelReceiver<'d>,
        midi_tx: MidiChannelSender<'d>,
    ) -> Self {
        let mut config = embassy_rp::uart::Config::default();

        config.baudrate = MIDI_BAUDRATE;
        config.data_bits = embassy_rp::uart::DataBits::DataBits8;
        config.stop_bits = embassy_rp::uart::StopBits::STOP1;
        config.parity = embassy_rp::uart::Parity::ParityNone;

        static TX_BUF: StaticCell<[u8; SERIAL_MIDI_BUF_LEN]> = StaticCell::new();
        static RX_BUF: StaticCell<[u8; SERIAL_MIDI_BUF_LEN]> = StaticCell::new();
        let tx_buf = &mut TX_BUF.init([0; SERIAL_MIDI_BUF_LEN])[..];
        let rx_buf = &mut RX_BUF.init([0; SERIAL_MIDI_BUF_LEN])[..];

        let uart = BufferedUart::new(uart, Irqs, tx_pin, rx_pin, tx_buf, rx_buf, config);
        let (uart_rx, uart_tx) = uart.split();

        Self {
            uart_tx,
            uart_rx,
            midi_rx,
            midi_tx,
        }
    }

    pub async fn task(&mut self) -> ! {
        let Self {
            uart_tx,
            uart_rx,
            midi_rx,
            midi_tx,
        } = self;

        let send_task = async {
            loop {
                let msg = midi_rx.receive().await;
                if let Err(err) = msg.send_bytes(uart_tx).await {
                    info!("Midi send error: {}", err);
                }
            }
        };

        let recv_task = async {
            let mut parser = MidiParser::new();
            let mut buf = [0u8; 16];
            loop {
                match uart_rx.read(&mut buf).await {
                    Ok(n) => {
                        for &byte in &buf[..n] {
                            if let Some(msg) = parser.feed(byte) {
                                info!("Midi in: {}", msg);
                                midi_tx.send(msg).await;
                            }
                        }
                    }
                    Err(err) => info!("Midi receive error: {}", err),
                }
            }
        };

        join(send_task, recv_task).await;

        unreachable!();
    }
}

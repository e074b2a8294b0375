use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::MIDI_CHANNEL_SIZE;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiMsg {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
}

impl MidiMsg {
    /// Write the message to `buf`, return the number of bytes used.
    pub fn serialize(&self, buf: &mut [u8]) -> Result<usize, &'static str> {
        let (status, channel, note, velocity) = match *self {
            MidiMsg::NoteOn {
                channel,
                note,
                velocity,
            } => (0x90u8, channel, note, velocity),
            MidiMsg::NoteOff {
                channel,
                note,
                velocity,
            } => (0x80u8, channel, note, velocity),
        };
        if channel > 0x0f || note > 0x7f || velocity > 0x7f {
            return Err("invalid value");
        }
        if buf.len() < 3 {
            return Err("buffer too small");
        }
        buf[..3].copy_from_slice(&[status | channel, note, velocity]);
        Ok(3)
    }

    pub async fn send_bytes(
        &self,
        writer: &mut impl embedded_io_async::Write,
    ) -> Result<usize, &'static str> {
        let mut bytes = [0u8; 3];
        let len = self.serialize(&mut bytes)?;
        writer
            .write_all(&bytes[..len])
            .await
            .map_err(|_| "io error")?;
        Ok(len)
    }
}

/// Byte-at-a-time decoder for incoming serial MIDI.
///
/// Understands running status; everything but note on/off is skipped.
#[derive(Default)]
pub struct MidiParser {
    status: Option<u8>,
    data: [u8; 2],
    len: usize,
}

impl MidiParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, byte: u8) -> Option<MidiMsg> {
        if byte >= 0xf8 {
            // real-time messages may appear anywhere
            return None;
        }
        if byte & 0x80 != 0 {
            // system common messages cancel running status
            self.status = if byte < 0xf0 { Some(byte) } else { None };
            self.len = 0;
            return None;
        }

        let status = self.status?;
        self.data[self.len] = byte;
        self.len += 1;
        let needed = match status & 0xf0 {
            0xc0 | 0xd0 => 1,
            _ => 2,
        };
        if self.len < needed {
            return None;
        }
        self.len = 0;

        let channel = status & 0x0f;
        let [note, velocity] = self.data;
        match status & 0xf0 {
            0x90 if velocity > 0 => Some(MidiMsg::NoteOn {
                channel,
                note,
                velocity,
            }),
            0x90 | 0x80 => Some(MidiMsg::NoteOff {
                channel,
                note,
                velocity,
            }),
            status => {
                trace!("midi: skipping message {}", status);
                None
            }
        }
    }
}

pub type MidiChannel = Channel<NoopRawMutex, MidiMsg, MIDI_CHANNEL_SIZE>;
pub type MidiChannelReceiver<'ch> = Receiver<'ch, NoopRawMutex, MidiMsg, MIDI_CHANNEL_SIZE>;
pub type MidiChannelSender<'ch> = Sender<'ch, NoopRawMutex, MidiMsg, MIDI_CHANNEL_SIZE>;

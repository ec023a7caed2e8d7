//! SteelSeries Siberia Raw wire protocol.
//!
//! Colors are pushed by writing 16-byte frames straight into the HID
//! device node (usually somewhere in /dev/hidrawX). The headset keeps
//! only the last fully delivered color; on disconnect it falls back to
//! whatever the vendor engine configured last.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use thiserror::Error;

use crate::color::Color;

/// Every protocol frame is exactly this long, zero-padded.
pub const FRAME_LEN: usize = 16;

const SETUP: [u8; FRAME_LEN] = [
    0x01, 0x00, 0x95, 0x02, 0x80, 0xbf, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
const CONTENT: [u8; FRAME_LEN] = [
    0x01, 0x00, 0x80, 0x02, 0x52, 0x20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];
const TEARDOWN: [u8; FRAME_LEN] = [
    0x01, 0x00, 0x93, 0x02, 0x03, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

fn color_frame(color: Color) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&[0x01, 0x00, 0x83, 0x03]);
    frame[4] = color.red();
    frame[5] = color.green();
    frame[6] = color.blue();
    frame
}

#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("device write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("short frame write: {written} of {FRAME_LEN} bytes")]
    ShortWrite { written: usize },
}

/// Transmitter over an open device handle. Generic over the sink so the
/// frame sequencing can be exercised without hardware.
pub struct Headset<W: Write> {
    port: W,
}

impl Headset<File> {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let port = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("Failed to open HID device: {}", path.display()))?;
        Ok(Self::new(port))
    }
}

impl<W: Write> Headset<W> {
    pub fn new(port: W) -> Self {
        Self { port }
    }

    /// Sends one color as the fixed four-frame sequence. Aborts on the
    /// first frame that does not go out in full; frames already written
    /// are not rolled back, which can leave the headset mid-sequence.
    pub fn send(&mut self, color: Color) -> Result<(), TransmitError> {
        self.write_frame(&SETUP)?;
        self.write_frame(&CONTENT)?;
        self.write_frame(&color_frame(color))?;
        self.write_frame(&TEARDOWN)?;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8; FRAME_LEN]) -> Result<(), TransmitError> {
        let written = self.port.write(frame)?;
        if written != FRAME_LEN {
            return Err(TransmitError::ShortWrite { written });
        }
        Ok(())
    }
}

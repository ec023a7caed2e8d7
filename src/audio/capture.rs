//! ALSA microphone capture.

use alsa::pcm::{Access, Format, Frames, HwParams, PCM};
use alsa::{Direction, ValueOr};
use anyhow::{Context, Result};

use super::frame::{BLOCK_BYTES, BLOCK_SIZE, SAMPLE_RATE};

/// Blocking capture handle delivering one full block per read.
pub struct Capture {
    pcm: PCM,
}

impl Capture {
    /// Opens an ALSA source, e.g. "default" or "hw:0,0", configured for
    /// mono 16-bit little-endian PCM at 44100 Hz with one block per period.
    pub fn open(name: &str) -> Result<Self> {
        let pcm = PCM::new(name, Direction::Capture, false)
            .with_context(|| format!("Failed to open capture source: {name}"))?;
        {
            let hwp = HwParams::any(&pcm).context("Failed to query capture parameters")?;
            hwp.set_access(Access::RWInterleaved)?;
            hwp.set_format(Format::S16LE)?;
            hwp.set_channels(1)?;
            hwp.set_rate(SAMPLE_RATE, ValueOr::Nearest)?;
            hwp.set_period_size_near(BLOCK_SIZE as Frames, ValueOr::Nearest)?;
            pcm.hw_params(&hwp)
                .context("Failed to apply capture parameters")?;
        }
        pcm.prepare().context("Failed to prepare capture source")?;
        Ok(Self { pcm })
    }

    /// Blocks until one full block has been captured into `block`.
    /// Returns `false` once the source yields no more data; read errors
    /// end the stream the same way rather than aborting the process.
    pub fn read_block(&mut self, block: &mut [u8; BLOCK_BYTES]) -> Result<bool> {
        let io = self.pcm.io_bytes();
        let frames = match io.readi(block) {
            Ok(n) => n,
            Err(err) => {
                log::debug!("Capture read ended: {err}");
                return Ok(false);
            }
        };
        if frames < BLOCK_SIZE {
            return Ok(false);
        }

        // Discard whatever queued up while the last block was being
        // analyzed so the next read starts from live audio.
        self.pcm.drop().context("Failed to flush capture source")?;
        self.pcm.prepare().context("Failed to rearm capture source")?;
        Ok(true)
    }
}

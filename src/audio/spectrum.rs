//! Peak extraction from the frequency spectrum of one capture block.

use std::sync::Arc;

use anyhow::Result;
use realfft::{num_complex::Complex, RealFftPlanner, RealToComplex};

use super::frame::{self, BLOCK_SIZE};

/// The two scalars each analysis cycle reduces the spectrum to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectrumPeaks {
    /// Largest bin magnitude, `sqrt(re^2 + im^2)`, linear scale.
    pub magnitude_max: f64,
    /// Largest per-bin loudness, `20 * log10(magnitude)`. Tracked
    /// independently of `magnitude_max`, not tied to the same bin.
    pub db_max: f64,
    /// Number of frequency bins (N/2 + 1).
    pub bins: usize,
}

/// Real-to-complex FFT over one block, with reusable plan and buffers.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn RealToComplex<f64>>,
    input: Vec<f64>,
    bins: Vec<Complex<f64>>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        let fft = RealFftPlanner::<f64>::new().plan_fft_forward(BLOCK_SIZE);
        let input = fft.make_input_vec();
        let bins = fft.make_output_vec();
        Self { fft, input, bins }
    }

    /// Analyzes exactly one full capture block. No windowing is applied;
    /// samples go into the transform in capture order.
    pub fn analyze(&mut self, block: &[u8]) -> Result<SpectrumPeaks> {
        for (i, slot) in self.input.iter_mut().enumerate() {
            *slot = frame::normalize(frame::sample_at(block, i));
        }

        self.fft.process(&mut self.input, &mut self.bins)?;

        let mut magnitude_max = 0.0f64;
        let mut db_max = 0.0f64;
        for bin in &self.bins {
            let magnitude = (bin.re * bin.re + bin.im * bin.im).sqrt();
            let db = 20.0 * magnitude.log10();
            if magnitude > magnitude_max {
                magnitude_max = magnitude;
            }
            if db > db_max {
                db_max = db;
            }
        }

        Ok(SpectrumPeaks {
            magnitude_max,
            db_max,
            bins: self.bins.len(),
        })
    }
}

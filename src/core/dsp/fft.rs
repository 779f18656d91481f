//! Short-time Fourier transform with windowing

use realfft::RealFftPlanner;

use super::windows::{create_window, WindowType};
use crate::core::matrix::Matrix;
use crate::error::{MfccError, Result};

/// Number of frames produced without centering: `(len - fft_size) / hop + 1`,
/// or zero when the signal is shorter than one frame.
pub fn frame_count(num_samples: usize, fft_size: usize, hop_size: usize) -> usize {
    if num_samples < fft_size || hop_size == 0 {
        return 0;
    }
    (num_samples - fft_size) / hop_size + 1
}

/// Real-input STFT. Frames start at `i * hop_size` with no padding, so the
/// first frame covers samples `0..fft_size`.
pub struct StftProcessor {
    planner: RealFftPlanner<f64>,
    window: Vec<f64>,
    fft_size: usize,
    hop_size: usize,
}

impl StftProcessor {
    pub fn new(fft_size: usize, hop_size: usize, window_type: WindowType) -> Self {
        Self {
            planner: RealFftPlanner::new(),
            window: create_window(fft_size, window_type),
            fft_size,
            hop_size,
        }
    }

    /// `|STFT|` as a `[fft_size/2 + 1 × n_frames]` matrix
    pub fn magnitude_spectrogram(&mut self, samples: &[f64]) -> Result<Matrix> {
        if self.fft_size == 0 || self.hop_size == 0 {
            return Err(MfccError::configuration(
                "fft_size and hop_size must be positive",
            ));
        }
        let n_frames = frame_count(samples.len(), self.fft_size, self.hop_size);
        if n_frames == 0 {
            return Err(MfccError::invalid_input(format!(
                "signal of {} samples is shorter than one frame of {}",
                samples.len(),
                self.fft_size
            )));
        }

        let fft = self.planner.plan_fft_forward(self.fft_size);
        let mut input = fft.make_input_vec();
        let mut spectrum = fft.make_output_vec();
        let n_bins = spectrum.len();
        let mut out = Matrix::zeros(n_bins, n_frames);

        for frame in 0..n_frames {
            let start = frame * self.hop_size;
            let chunk = &samples[start..start + self.fft_size];
            for ((dst, &s), &w) in input.iter_mut().zip(chunk).zip(&self.window) {
                *dst = s * w;
            }
            fft.process(&mut input, &mut spectrum)
                .map_err(|e| MfccError::Backend(e.to_string()))?;
            for (bin, c) in spectrum.iter().enumerate() {
                out.set(bin, frame, c.norm());
            }
        }

        Ok(out)
    }
}

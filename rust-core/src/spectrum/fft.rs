//! Forward real FFT producing a packed real spectrum
//!
//! The analyzer only needs one capability from an FFT: transform a fixed-size
//! real buffer in place into the packed layout
//!
//! ```text
//! X[0]      = Re(bin 0)
//! X[k]      = Re(bin k)        1 <= k < N/2
//! X[N - k]  = Im(bin k)        1 <= k < N/2
//! X[N/2]    = Re(bin N/2)      (Nyquist)
//! ```
//!
//! so any implementation can be swapped in behind [`RealTransform`].

use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// In-place forward transform of a fixed-size real buffer
pub trait RealTransform {
    /// Number of real samples the transform operates on
    fn len(&self) -> usize;

    /// Transform `buffer` (exactly `len()` samples) into the packed layout
    ///
    /// Must not allocate: this runs on the audio thread.
    fn forward(&mut self, buffer: &mut [f32]);
}

impl<T: RealTransform + ?Sized> RealTransform for Box<T> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn forward(&mut self, buffer: &mut [f32]) {
        (**self).forward(buffer)
    }
}

/// Write a half-spectrum of complex bins into the packed real layout
///
/// # Arguments
/// * `spectrum` - Bins 0..=N/2 as produced by a real-input FFT
/// * `packed` - Output buffer of N real values
pub fn pack_spectrum(spectrum: &[Complex<f32>], packed: &mut [f32]) {
    let n = packed.len();
    let half = n / 2;
    debug_assert!(spectrum.len() > half);

    packed[0] = spectrum[0].re;
    for k in 1..half {
        packed[k] = spectrum[k].re;
        packed[n - k] = spectrum[k].im;
    }
    if half > 0 {
        packed[half] = spectrum[half].re;
    }
}

/// FFT engine for real-valued frames backed by realfft
pub struct RealFftTransform {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f32>>,

    /// Reusable output buffer (complex half-spectrum, N/2 + 1 bins)
    spectrum: Vec<Complex<f32>>,

    /// Reusable scratch for the FFT
    scratch: Vec<Complex<f32>>,
}

impl RealFftTransform {
    /// Plan a forward transform of `fft_size` samples
    ///
    /// All buffers are allocated here so that [`RealTransform::forward`]
    /// never touches the allocator.
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f32>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let spectrum = r2c.make_output_vec();
        let scratch = r2c.make_scratch_vec();

        Self {
            fft_size,
            r2c,
            spectrum,
            scratch,
        }
    }

    /// Complex half-spectrum from the most recent transform
    pub fn spectrum(&self) -> &[Complex<f32>] {
        &self.spectrum
    }
}

impl RealTransform for RealFftTransform {
    fn len(&self) -> usize {
        self.fft_size
    }

    fn forward(&mut self, buffer: &mut [f32]) {
        // realfft only fails on length mismatches, which the analyzer rules
        // out at construction. Leave silence rather than stale data.
        if self
            .r2c
            .process_with_scratch(buffer, &mut self.spectrum, &mut self.scratch)
            .is_err()
        {
            buffer.fill(0.0);
            return;
        }

        pack_spectrum(&self.spectrum, buffer);
    }
}

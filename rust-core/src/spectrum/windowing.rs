//! Window tables for spectral analysis
//!
//! Tables are generated once when an analyzer is built and applied to every
//! frame before the FFT to reduce spectral leakage.

use std::f64::consts::PI;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(N-1))
    /// Sidelobe attenuation: ~31 dB, fast rolloff
    #[default]
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(N-1))
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(N-1)) + 0.08*cos(4πn/(N-1))
    Blackman,

    /// Rectangular window (no tapering)
    Rectangular,
}

impl WindowType {
    /// Coefficient at index `n` of an `length`-point window
    fn coefficient(&self, n: usize, length: usize) -> f64 {
        if length < 2 {
            return 1.0;
        }
        let denom = (length - 1) as f64;
        let angle = 2.0 * PI * n as f64 / denom;

        match self {
            WindowType::Hann => 0.5 - 0.5 * angle.cos(),
            WindowType::Hamming => 0.54 - 0.46 * angle.cos(),
            WindowType::Blackman => 0.42 - 0.5 * angle.cos() + 0.08 * (2.0 * angle).cos(),
            WindowType::Rectangular => 1.0,
        }
    }
}

/// Fill `table` with window coefficients
///
/// The window spans the whole slice, so `table.len()` is the window length N.
/// Coefficients are computed in f64 and stored as f32.
pub fn fill_window(window_type: WindowType, table: &mut [f32]) {
    let length = table.len();
    for (n, w) in table.iter_mut().enumerate() {
        *w = window_type.coefficient(n, length) as f32;
    }
}

/// Generate window coefficients
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..length-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f32> {
    let mut window = vec![0.0; length];
    fill_window(window_type, &mut window);
    window
}

/// Amplitude correction factor for a window table
///
/// Multiplying the table by this factor makes its coefficients sum to the
/// table length, so a windowed constant keeps its DC magnitude.
pub fn window_correction_factor(table: &[f32]) -> f32 {
    let sum: f64 = table.iter().map(|&w| w as f64).sum();
    if sum <= 0.0 {
        return 1.0;
    }
    (table.len() as f64 / sum) as f32
}

/// Scale a window table in place by its amplitude correction factor
pub fn normalize_window(table: &mut [f32]) {
    let factor = window_correction_factor(table);
    for w in table.iter_mut() {
        *w *= factor;
    }
}

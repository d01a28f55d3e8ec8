//! Magnitude spectrum from packed real FFT output

/// Smallest magnitude used for dB conversion (avoids log(0))
pub const MIN_MAGNITUDE: f32 = 1e-10;

/// Compute per-bin magnitudes from a packed real spectrum
///
/// # Arguments
/// * `packed` - N values in the packed layout (see [`super::fft`])
/// * `magnitudes` - Output of N/2 bins
///
/// Bin 0 is real-only so its magnitude is `|X[0]|`; bin k pairs `X[k]` with
/// `X[N - k]`. The Nyquist value at `X[N/2]` is not reported.
pub fn packed_magnitudes(packed: &[f32], magnitudes: &mut [f32]) {
    let n = packed.len();
    let half = n / 2;
    debug_assert_eq!(magnitudes.len(), half);

    if half == 0 {
        return;
    }

    magnitudes[0] = packed[0].abs();
    for k in 1..half {
        let re = packed[k];
        let im = packed[n - k];
        magnitudes[k] = (re * re + im * im).sqrt();
    }
}

/// Convert magnitudes to dB: 20*log10(|X[k]| / reference)
///
/// `output` must be the same length as `magnitudes`.
pub fn magnitudes_to_db(magnitudes: &[f32], reference: f32, output: &mut [f32]) {
    for (db, &mag) in output.iter_mut().zip(magnitudes.iter()) {
        *db = 20.0 * (mag.max(MIN_MAGNITUDE) / reference).log10();
    }
}

/// Center frequency of `bin` in Hz for a frame of `frame_size` samples
pub fn bin_frequency(bin: usize, frame_size: usize, sample_rate: f32) -> f32 {
    bin as f32 * sample_rate / frame_size as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_uses_absolute_value() {
        let packed = [-3.0f32, 0.0, 0.0, 0.0];
        let mut mags = [0.0f32; 2];
        packed_magnitudes(&packed, &mut mags);

        assert_eq!(mags[0], 3.0);
        assert_eq!(mags[1], 0.0);
    }

    #[test]
    fn test_pairs_real_and_imaginary() {
        // N = 8: bin 1 = (3, 4), bin 2 = (0, -2), bin 3 = (1, 0), Nyquist = 100
        let packed = [1.0f32, 3.0, 0.0, 1.0, 100.0, 0.0, -2.0, 4.0];
        let mut mags = [0.0f32; 4];
        packed_magnitudes(&packed, &mut mags);

        assert_eq!(mags, [1.0, 5.0, 2.0, 1.0]);
    }

    #[test]
    fn test_nyquist_is_not_reported() {
        let packed = [0.0f32, 7.0];
        let mut mags = [0.0f32; 1];
        packed_magnitudes(&packed, &mut mags);
        assert_eq!(mags, [0.0]);
    }

    #[test]
    fn test_db_conversion() {
        let mags = [1.0f32, 10.0, 0.0];
        let mut db = [0.0f32; 3];
        magnitudes_to_db(&mags, 1.0, &mut db);

        assert!(db[0].abs() < 1e-6);
        assert!((db[1] - 20.0).abs() < 1e-5);
        assert!((db[2] + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_bin_frequency() {
        assert_eq!(bin_frequency(0, 1024, 48000.0), 0.0);
        assert!((bin_frequency(1, 1024, 48000.0) - 46.875).abs() < 1e-4);
        assert!((bin_frequency(512, 1024, 48000.0) - 24000.0).abs() < 1e-2);
    }
}

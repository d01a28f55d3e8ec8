//! Sliding-window spectral frame analyzer
//!
//! Accumulates pushed samples into overlapping frames, windows each frame,
//! runs a forward real FFT and keeps the magnitude spectrum of the most
//! recent frame. Everything is allocated in the constructor so that
//! [`SpectralAnalyzer::push_samples`] is safe to call from an audio callback.

use super::config::AnalyzerConfig;
use super::fft::{RealFftTransform, RealTransform};
use super::fifo::FrameFifo;
use super::magnitude::{bin_frequency, magnitudes_to_db, packed_magnitudes};
use super::windowing::{fill_window, normalize_window};
use crate::error::{Result, SpectralError};
use crate::sink::SpectrumSink;

/// Sink that ignores frames (plain `push_samples`)
struct Discard;

impl SpectrumSink for Discard {
    #[inline]
    fn on_frame(&mut self, _magnitudes: &[f32]) {}
}

/// Real-time STFT magnitude analyzer
pub struct SpectralAnalyzer<T: RealTransform = RealFftTransform> {
    config: AnalyzerConfig,
    frame_size: usize,
    hop_size: usize,

    /// Forward transform of `frame_size` samples
    transform: T,

    /// Window coefficients, fixed at construction
    window: Box<[f32]>,

    /// Incoming time-domain samples
    fifo: FrameFifo,

    /// Windowed frame, transformed in place into the packed spectrum
    frequency_domain: Box<[f32]>,

    /// Magnitudes of the latest frame (`frame_size / 2` bins)
    magnitudes: Box<[f32]>,

    /// False until the first frame completes and after reset
    has_spectrum: bool,

    frames_processed: u64,
}

impl SpectralAnalyzer<RealFftTransform> {
    /// Create an analyzer using the realfft-backed transform
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let (frame_size, _) = config.validate()?;
        Self::with_transform(config, RealFftTransform::new(frame_size))
    }
}

impl<T: RealTransform> SpectralAnalyzer<T> {
    /// Create an analyzer around a caller-supplied transform
    ///
    /// The transform's length must equal the configured frame size.
    pub fn with_transform(config: AnalyzerConfig, transform: T) -> Result<Self> {
        let (frame_size, hop_size) = config.validate()?;

        if transform.len() != frame_size {
            return Err(SpectralError::TransformSizeMismatch {
                expected: frame_size,
                actual: transform.len(),
            });
        }

        let mut window = vec![0.0; frame_size].into_boxed_slice();
        fill_window(config.window_type, &mut window);
        if config.normalize_window {
            normalize_window(&mut window);
        }

        log::debug!(
            "Spectral analyzer: frame {} (order {}), hop {}, {:?} window",
            frame_size,
            config.frame_order,
            hop_size,
            config.window_type
        );

        Ok(Self {
            config,
            frame_size,
            hop_size,
            transform,
            window,
            fifo: FrameFifo::new(frame_size, hop_size),
            frequency_domain: vec![0.0; frame_size].into_boxed_slice(),
            magnitudes: vec![0.0; frame_size / 2].into_boxed_slice(),
            has_spectrum: false,
            frames_processed: 0,
        })
    }

    /// Push new audio samples
    ///
    /// May complete zero, one or many frames. Only the last frame's spectrum
    /// is kept; use [`Self::push_samples_into`] to observe every frame.
    ///
    /// # Returns
    /// Number of frames completed during this call
    pub fn push_samples(&mut self, samples: &[f32]) -> usize {
        self.push_samples_into(samples, &mut Discard)
    }

    /// Push new audio samples, handing every completed spectrum to `sink`
    ///
    /// # Returns
    /// Number of frames completed during this call
    pub fn push_samples_into<S>(&mut self, samples: &[f32], sink: &mut S) -> usize
    where
        S: SpectrumSink + ?Sized,
    {
        let mut remaining = samples;
        let mut completed = 0;

        while !remaining.is_empty() {
            let copied = self.fifo.write(remaining);
            remaining = &remaining[copied..];

            if self.fifo.is_full() {
                self.process_frame();
                sink.on_frame(&self.magnitudes);
                self.fifo.advance();
                completed += 1;
            }
        }

        completed
    }

    /// Window → FFT → magnitude for the frame currently in the FIFO
    fn process_frame(&mut self) {
        for ((out, &x), &w) in self
            .frequency_domain
            .iter_mut()
            .zip(self.fifo.frame())
            .zip(self.window.iter())
        {
            *out = x * w;
        }

        self.transform.forward(&mut self.frequency_domain);
        packed_magnitudes(&self.frequency_domain, &mut self.magnitudes);

        self.has_spectrum = true;
        self.frames_processed += 1;
    }

    /// Magnitudes of the latest completed frame, one per bin
    ///
    /// Empty until the first frame completes (and again after reset).
    pub fn latest_magnitudes(&self) -> &[f32] {
        if self.has_spectrum {
            &self.magnitudes
        } else {
            &[]
        }
    }

    /// Latest magnitudes in dB relative to `reference`
    ///
    /// # Returns
    /// Number of bins written (0 before the first frame)
    pub fn latest_magnitudes_db(&self, reference: f32, output: &mut [f32]) -> usize {
        let magnitudes = self.latest_magnitudes();
        let len = magnitudes.len().min(output.len());
        magnitudes_to_db(&magnitudes[..len], reference, &mut output[..len]);
        len
    }

    /// Return to the freshly constructed state
    ///
    /// The window table and transform are kept.
    pub fn reset(&mut self) {
        self.fifo.clear();
        self.frequency_domain.fill(0.0);
        self.magnitudes.fill(0.0);
        self.has_spectrum = false;
        self.frames_processed = 0;
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_frequency(&self, bin: usize, sample_rate: f32) -> f32 {
        bin_frequency(bin, self.frame_size, sample_rate)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn frame_order(&self) -> u32 {
        self.config.frame_order
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of magnitude bins per frame (frame_size / 2)
    pub fn num_bins(&self) -> usize {
        self.frame_size / 2
    }

    /// Samples buffered toward the next frame
    pub fn fifo_fill(&self) -> usize {
        self.fifo.fill()
    }

    /// The buffered samples themselves (raw, unwindowed)
    pub fn pending_samples(&self) -> &[f32] {
        self.fifo.pending()
    }

    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Frames completed since construction or the last reset
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{frame_queue, spectrum_channel};
    use crate::spectrum::windowing::WindowType;
    use std::f64::consts::PI;

    /// Transform that records its input and leaves it untouched
    struct Recording {
        size: usize,
        frames: Vec<Vec<f32>>,
    }

    impl RealTransform for Recording {
        fn len(&self) -> usize {
            self.size
        }

        fn forward(&mut self, buffer: &mut [f32]) {
            self.frames.push(buffer.to_vec());
        }
    }

    fn rectangular(order: u32, hop: usize) -> AnalyzerConfig {
        AnalyzerConfig::new(order)
            .with_hop_size(hop)
            .with_window(WindowType::Rectangular)
    }

    #[test]
    fn test_reference_scenario() {
        // F = 8, H = 4, identity window
        let recorder = Recording {
            size: 8,
            frames: Vec::new(),
        };
        let mut analyzer = SpectralAnalyzer::with_transform(rectangular(3, 4), recorder).unwrap();

        let completed = analyzer.push_samples(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

        assert_eq!(completed, 1);
        assert_eq!(analyzer.transform.frames.len(), 1);
        assert_eq!(analyzer.transform.frames[0], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(analyzer.latest_magnitudes().len(), 4);
        assert_eq!(analyzer.fifo_fill(), 4);
        assert_eq!(
            analyzer.fifo.contents(),
            &[5.0, 6.0, 7.0, 8.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_frame_count_all_at_once() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(6).with_hop_size(16)).unwrap();

        // F + 5H samples
        let signal = vec![0.25f32; 64 + 5 * 16];
        assert_eq!(analyzer.push_samples(&signal), 6);
        assert_eq!(analyzer.frames_processed(), 6);
        assert_eq!(analyzer.fifo_fill(), 64 - 16);
    }

    #[test]
    fn test_frame_count_split_pushes() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(5).with_hop_size(7)).unwrap();

        // F + 9H = 32 + 63 samples in uneven chunks
        let signal: Vec<f32> = (0..95).map(|n| (n as f32 * 0.1).sin()).collect();
        let mut completed = 0;
        for chunk in signal.chunks(13) {
            completed += analyzer.push_samples(chunk);
        }

        assert_eq!(completed, 10);
        assert_eq!(analyzer.fifo_fill(), 32 - 7);
    }

    #[test]
    fn test_short_push_completes_nothing() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(4)).unwrap();

        assert_eq!(analyzer.push_samples(&[1.0; 15]), 0);
        assert_eq!(analyzer.fifo_fill(), 15);
        assert!(analyzer.latest_magnitudes().is_empty());

        assert_eq!(analyzer.push_samples(&[]), 0);
        assert_eq!(analyzer.fifo_fill(), 15);
    }

    #[test]
    fn test_overlap_is_raw_tail_of_previous_frame() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(4).with_hop_size(6)).unwrap();

        let signal: Vec<f32> = (1..=16).map(|n| n as f32).collect();
        analyzer.push_samples(&signal);

        // Retained samples are unwindowed even though Hann zeroes the edges
        assert_eq!(analyzer.pending_samples(), &signal[6..]);
    }

    #[test]
    fn test_hop_equal_to_frame_has_no_overlap() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(3).with_hop_size(8)).unwrap();

        assert_eq!(analyzer.push_samples(&[1.0; 24]), 3);
        assert_eq!(analyzer.fifo_fill(), 0);
    }

    #[test]
    fn test_idempotent_read() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(6)).unwrap();
        let signal: Vec<f32> = (0..100).map(|n| (n as f32 * 0.3).cos()).collect();
        analyzer.push_samples(&signal);

        let first = analyzer.latest_magnitudes().to_vec();
        let second = analyzer.latest_magnitudes().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(5)).unwrap();
        let window_before = analyzer.window().to_vec();

        analyzer.push_samples(&[0.7; 50]);
        assert!(!analyzer.latest_magnitudes().is_empty());

        analyzer.reset();
        assert!(analyzer.latest_magnitudes().is_empty());
        assert_eq!(analyzer.fifo_fill(), 0);
        assert_eq!(analyzer.frames_processed(), 0);
        assert_eq!(analyzer.window(), window_before.as_slice());

        assert_eq!(analyzer.push_samples(&[0.0; 32]), 1);
        let magnitudes = analyzer.latest_magnitudes();
        assert_eq!(magnitudes.len(), 16);
        assert!(magnitudes.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_dc_bin_is_sum_of_windowed_samples() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(8)).unwrap();
        let c = -0.5f32;

        analyzer.push_samples(&[c; 256]);

        let expected: f32 = analyzer.window().iter().map(|&w| w * c).sum::<f32>().abs();
        let dc = analyzer.latest_magnitudes()[0];
        assert!((dc - expected).abs() < 1e-3, "dc {} expected {}", dc, expected);
    }

    #[test]
    fn test_integer_bin_sinusoid_peaks_at_bin() {
        let sample_rate = 48000.0f32;
        let frame_size = 1024;
        let bin = 37;
        let freq = bin as f64 * sample_rate as f64 / frame_size as f64;

        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(10)).unwrap();
        let signal: Vec<f32> = (0..frame_size)
            .map(|n| (2.0 * PI * freq * n as f64 / sample_rate as f64).sin() as f32)
            .collect();
        analyzer.push_samples(&signal);

        let magnitudes = analyzer.latest_magnitudes();
        let (peak_bin, &peak) = magnitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        assert_eq!(peak_bin, bin);
        assert!((analyzer.bin_frequency(peak_bin, sample_rate) - freq as f32).abs() < 1e-2);

        // Hann main lobe spans ±2 bins; beyond that leakage is small
        for (k, &m) in magnitudes.iter().enumerate() {
            if k.abs_diff(bin) > 2 {
                assert!(m < peak * 0.01, "bin {} = {} vs peak {}", k, m, peak);
            }
        }
    }

    #[test]
    fn test_sink_sees_every_frame_in_order() {
        let mut analyzer = SpectralAnalyzer::new(rectangular(3, 4)).unwrap();
        let mut dc_values = Vec::new();

        // Frames: [1;8] → DC 8, [1,1,1,1,2,2,2,2] → 12, [2;8] → 16
        let mut signal = vec![1.0f32; 8];
        signal.extend_from_slice(&[2.0; 8]);

        let completed = analyzer.push_samples_into(&signal, &mut |mags: &[f32]| {
            dc_values.push(mags[0]);
        });

        assert_eq!(completed, 3);
        assert_eq!(dc_values.len(), 3);
        for (got, want) in dc_values.iter().zip([8.0f32, 12.0, 16.0]) {
            assert!((got - want).abs() < 1e-4);
        }
        // Only the last frame is retained
        assert!((analyzer.latest_magnitudes()[0] - 16.0).abs() < 1e-4);
    }

    #[test]
    fn test_publish_to_reader() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(4)).unwrap();
        let (mut publisher, mut reader) = spectrum_channel(analyzer.num_bins());

        analyzer.push_samples_into(&[0.3; 40], &mut publisher);

        let snapshot = reader.read();
        assert_eq!(snapshot.frame_index(), analyzer.frames_processed());
        assert_eq!(snapshot.magnitudes(), analyzer.latest_magnitudes());
    }

    #[test]
    fn test_queue_collects_frames() {
        let mut analyzer = SpectralAnalyzer::new(AnalyzerConfig::new(3)).unwrap();
        let (mut producer, mut consumer) = frame_queue(analyzer.num_bins(), 8).unwrap();

        let completed = analyzer.push_samples_into(&[1.0; 20], &mut producer);
        assert_eq!(completed, 4);
        assert_eq!(consumer.pending_frames(), 4);

        let mut frame = vec![0.0f32; analyzer.num_bins()];
        let mut last = Vec::new();
        while consumer.pop_frame(&mut frame).unwrap() {
            last = frame.clone();
        }
        assert_eq!(last.as_slice(), analyzer.latest_magnitudes());
    }

    #[test]
    fn test_db_output() {
        let mut analyzer = SpectralAnalyzer::new(rectangular(2, 2)).unwrap();
        let mut db = [0.0f32; 2];

        assert_eq!(analyzer.latest_magnitudes_db(1.0, &mut db), 0);

        // DC = 4 * 2.5 = 10 → 20 dB, bin 1 is silent → floor
        analyzer.push_samples(&[2.5; 4]);
        assert_eq!(analyzer.latest_magnitudes_db(1.0, &mut db), 2);
        assert!((db[0] - 20.0).abs() < 1e-4);
        assert!(db[1] < -150.0);
    }

    #[test]
    fn test_normalized_window_preserves_dc() {
        let config = AnalyzerConfig::new(7).with_normalized_window(true);
        let mut analyzer = SpectralAnalyzer::new(config).unwrap();

        analyzer.push_samples(&[1.0; 128]);
        assert!((analyzer.latest_magnitudes()[0] - 128.0).abs() < 1e-2);
    }

    #[test]
    fn test_construction_errors() {
        assert!(matches!(
            SpectralAnalyzer::new(AnalyzerConfig::new(3).with_hop_size(16)),
            Err(SpectralError::InvalidHopSize { .. })
        ));
        assert!(matches!(
            SpectralAnalyzer::new(AnalyzerConfig::new(0)),
            Err(SpectralError::InvalidFrameOrder { .. })
        ));

        let wrong = Recording {
            size: 16,
            frames: Vec::new(),
        };
        assert!(matches!(
            SpectralAnalyzer::with_transform(AnalyzerConfig::new(3), wrong),
            Err(SpectralError::TransformSizeMismatch {
                expected: 8,
                actual: 16
            })
        ));
    }
}

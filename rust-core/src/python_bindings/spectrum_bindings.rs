//! Python bindings for the spectral frame analyzer

use crate::spectrum::{AnalyzerConfig, SpectralAnalyzer, WindowType};
use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Window type enum exposed to Python
#[pyclass(name = "WindowType")]
#[derive(Clone)]
pub enum PyWindowType {
    Hann,
    Hamming,
    Blackman,
    Rectangular,
}

impl From<PyWindowType> for WindowType {
    fn from(py_win: PyWindowType) -> Self {
        match py_win {
            PyWindowType::Hann => WindowType::Hann,
            PyWindowType::Hamming => WindowType::Hamming,
            PyWindowType::Blackman => WindowType::Blackman,
            PyWindowType::Rectangular => WindowType::Rectangular,
        }
    }
}

/// Spectral frame analyzer exposed to Python
#[pyclass(name = "SpectralAnalyzer")]
pub struct PySpectralAnalyzer {
    analyzer: SpectralAnalyzer,
}

#[pymethods]
impl PySpectralAnalyzer {
    /// Create a new analyzer
    ///
    /// Args:
    ///     frame_order: Frame size as a power of two (10 → 1024 samples)
    ///     hop_size: Samples between frames (default: half the frame)
    ///     window_type: Window applied before the FFT
    #[new]
    #[pyo3(signature = (frame_order=10, hop_size=None, window_type=PyWindowType::Hann))]
    fn new(frame_order: u32, hop_size: Option<usize>, window_type: PyWindowType) -> PyResult<Self> {
        let config = AnalyzerConfig {
            frame_order,
            hop_size,
            window_type: window_type.into(),
            normalize_window: false,
        };

        let analyzer =
            SpectralAnalyzer::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(Self { analyzer })
    }

    /// Push samples (float32 numpy array)
    ///
    /// Returns:
    ///     Number of frames completed
    fn push_samples(&mut self, samples: PyReadonlyArray1<f32>) -> PyResult<usize> {
        let samples = samples.as_slice().map_err(|e| {
            log::warn!("Rejected non-contiguous sample array: {}", e);
            PyValueError::new_err(e.to_string())
        })?;

        Ok(self.analyzer.push_samples(samples))
    }

    /// Magnitude spectrum of the latest frame (empty before the first frame)
    fn latest_magnitudes<'py>(&self, py: Python<'py>) -> &'py PyArray1<f32> {
        PyArray1::from_slice(py, self.analyzer.latest_magnitudes())
    }

    /// Clear buffered samples and the latest spectrum
    fn reset(&mut self) {
        self.analyzer.reset();
    }

    /// Bin center frequencies in Hz
    fn bin_frequencies_hz<'py>(&self, py: Python<'py>, sample_rate: f32) -> &'py PyArray1<f32> {
        let freqs: Vec<f32> = (0..self.analyzer.num_bins())
            .map(|bin| self.analyzer.bin_frequency(bin, sample_rate))
            .collect();
        PyArray1::from_vec(py, freqs)
    }

    #[getter]
    fn frame_size(&self) -> usize {
        self.analyzer.frame_size()
    }

    #[getter]
    fn hop_size(&self) -> usize {
        self.analyzer.hop_size()
    }

    #[getter]
    fn num_bins(&self) -> usize {
        self.analyzer.num_bins()
    }

    #[getter]
    fn fifo_fill(&self) -> usize {
        self.analyzer.fifo_fill()
    }
}

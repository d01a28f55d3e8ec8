//! Spectral Frame - real-time STFT magnitude analysis
//!
//! Buffers streaming audio into overlapping frames, windows and transforms
//! each one, and keeps the magnitude spectrum of the latest frame. Nothing is
//! allocated after construction, so pushing samples is safe on an audio thread.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod sink;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectralError};
pub use sink::{frame_queue, spectrum_channel, SpectrumSink};
pub use spectrum::{AnalyzerConfig, RealFftTransform, RealTransform, SpectralAnalyzer, WindowType};

//! Short-time spectral analysis

pub mod analysis;
pub mod config;
pub mod fft;
pub mod fifo;
pub mod magnitude;
pub mod windowing;

pub use analysis::SpectralAnalyzer;
pub use config::AnalyzerConfig;
pub use fft::{RealFftTransform, RealTransform};
pub use windowing::WindowType;

//! Error types for analyzer construction and sink wiring
//!
//! Steady-state operations (pushing samples, reading spectra, resetting)
//! never fail; only configuration is validated here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpectralError {
    #[error("Frame order {order} is out of range (expected {min}..={max})")]
    InvalidFrameOrder { order: u32, min: u32, max: u32 },

    #[error("Hop size {hop_size} exceeds frame size {frame_size}")]
    InvalidHopSize { hop_size: usize, frame_size: usize },

    #[error("Transform length {actual} does not match frame size {expected}")]
    TransformSizeMismatch { expected: usize, actual: usize },

    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, SpectralError>;

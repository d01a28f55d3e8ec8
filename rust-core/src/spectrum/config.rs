//! Analyzer configuration
//!
//! Fixed at construction; the analyzer never reconfigures itself because
//! that would mean reallocating on the audio thread.

use super::windowing::WindowType;
use crate::error::{Result, SpectralError};

/// Smallest supported frame order (2-sample frames)
pub const MIN_FRAME_ORDER: u32 = 1;

/// Largest supported frame order (65536-sample frames)
pub const MAX_FRAME_ORDER: u32 = 16;

/// Spectral frame analyzer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Frame size as a power of two (frame size = 2^frame_order)
    pub frame_order: u32,

    /// Samples to advance between frames. `None` or `Some(0)` means
    /// frame_size / 2 (50% overlap).
    pub hop_size: Option<usize>,

    /// Window applied to every frame before the transform
    pub window_type: WindowType,

    /// Scale the window so its coefficients sum to the frame size
    pub normalize_window: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            frame_order: 10,
            hop_size: None,
            window_type: WindowType::Hann,
            normalize_window: false,
        }
    }
}

impl AnalyzerConfig {
    /// Configuration for a 2^frame_order frame with default hop and Hann window
    pub fn new(frame_order: u32) -> Self {
        Self {
            frame_order,
            ..Self::default()
        }
    }

    pub fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = Some(hop_size);
        self
    }

    pub fn with_window(mut self, window_type: WindowType) -> Self {
        self.window_type = window_type;
        self
    }

    pub fn with_normalized_window(mut self, normalize: bool) -> Self {
        self.normalize_window = normalize;
        self
    }

    /// Frame size in samples, 2^frame_order
    ///
    /// Zero when the order is too large to shift; `validate` rejects it.
    pub fn frame_size(&self) -> usize {
        1usize.checked_shl(self.frame_order).unwrap_or(0)
    }

    /// Effective hop size after defaulting
    ///
    /// Absent or zero hop falls back to half the frame (integer division;
    /// frame sizes are powers of two, so this is exact).
    pub fn resolved_hop_size(&self) -> usize {
        match self.hop_size {
            Some(hop) if hop > 0 => hop,
            _ => self.frame_size() / 2,
        }
    }

    /// Check the construction contract
    ///
    /// # Returns
    /// `(frame_size, hop_size)` on success
    pub fn validate(&self) -> Result<(usize, usize)> {
        if !(MIN_FRAME_ORDER..=MAX_FRAME_ORDER).contains(&self.frame_order) {
            return Err(SpectralError::InvalidFrameOrder {
                order: self.frame_order,
                min: MIN_FRAME_ORDER,
                max: MAX_FRAME_ORDER,
            });
        }

        let frame_size = self.frame_size();
        let hop_size = self.resolved_hop_size();
        if hop_size > frame_size {
            return Err(SpectralError::InvalidHopSize {
                hop_size,
                frame_size,
            });
        }

        Ok((frame_size, hop_size))
    }
}

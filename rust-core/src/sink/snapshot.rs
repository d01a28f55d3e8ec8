//! Latest-spectrum snapshot shared between the audio and UI threads
//!
//! Backed by a triple buffer: the audio thread writes into its own slot and
//! publishes with an atomic swap, the reader always sees a complete spectrum.

use super::SpectrumSink;
use triple_buffer::{Input, Output, TripleBuffer};

/// One published spectrum
#[derive(Debug, Clone)]
pub struct SpectrumSnapshot {
    /// 1-based index of the frame this spectrum came from, 0 before any frame
    frame_index: u64,

    /// Valid bins in `magnitudes` (0 until the first frame, or after clear)
    len: usize,

    /// Preallocated bin storage
    magnitudes: Vec<f32>,
}

impl SpectrumSnapshot {
    fn empty(num_bins: usize) -> Self {
        Self {
            frame_index: 0,
            len: 0,
            magnitudes: vec![0.0; num_bins],
        }
    }

    /// Magnitude per bin; empty until a frame has been published
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes[..self.len]
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Create a publisher/reader pair for spectra of `num_bins` bins
pub fn spectrum_channel(num_bins: usize) -> (SpectrumPublisher, SpectrumReader) {
    log::debug!("Creating spectrum channel with {} bins", num_bins);

    let (input, output) = TripleBuffer::new(&SpectrumSnapshot::empty(num_bins)).split();

    (
        SpectrumPublisher {
            input,
            num_bins,
            published: 0,
        },
        SpectrumReader { output },
    )
}

/// Writer end (audio thread)
pub struct SpectrumPublisher {
    input: Input<SpectrumSnapshot>,
    num_bins: usize,
    published: u64,
}

impl SpectrumPublisher {
    /// Copy `magnitudes` into the back buffer and publish it
    ///
    /// Spectra of the wrong length are ignored.
    pub fn publish(&mut self, magnitudes: &[f32]) {
        if magnitudes.len() != self.num_bins {
            debug_assert!(false, "spectrum length {} != {}", magnitudes.len(), self.num_bins);
            return;
        }

        self.published += 1;
        let slot = self.input.input_buffer();
        slot.magnitudes.copy_from_slice(magnitudes);
        slot.len = magnitudes.len();
        slot.frame_index = self.published;
        self.input.publish();
    }

    /// Publish an empty spectrum (e.g. after the analyzer was reset)
    pub fn clear(&mut self) {
        let slot = self.input.input_buffer();
        slot.len = 0;
        slot.frame_index = self.published;
        self.input.publish();
    }

    /// Number of spectra published so far
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }
}

impl SpectrumSink for SpectrumPublisher {
    fn on_frame(&mut self, magnitudes: &[f32]) {
        self.publish(magnitudes);
    }
}

/// Reader end (UI thread)
pub struct SpectrumReader {
    output: Output<SpectrumSnapshot>,
}

impl SpectrumReader {
    /// Most recently published snapshot
    pub fn read(&mut self) -> &SpectrumSnapshot {
        self.output.read()
    }

    /// True if a newer snapshot is waiting
    pub fn has_update(&self) -> bool {
        self.output.updated()
    }
}

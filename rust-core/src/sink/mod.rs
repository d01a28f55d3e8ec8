//! Per-frame spectrum delivery
//!
//! The analyzer keeps only the latest spectrum. Sinks observe every
//! completed frame as it happens, either to hand it to another thread
//! ([`SpectrumPublisher`], [`FrameQueueProducer`]) or to process it inline.

pub mod queue;
pub mod snapshot;

pub use queue::{frame_queue, FrameQueueConsumer, FrameQueueProducer};
pub use snapshot::{spectrum_channel, SpectrumPublisher, SpectrumReader, SpectrumSnapshot};

/// Receiver of completed magnitude spectra
///
/// Called on the thread that pushes samples, once per frame and in frame
/// order. Implementations must not block or allocate.
pub trait SpectrumSink {
    fn on_frame(&mut self, magnitudes: &[f32]);
}

impl<F> SpectrumSink for F
where
    F: FnMut(&[f32]),
{
    fn on_frame(&mut self, magnitudes: &[f32]) {
        self(magnitudes)
    }
}

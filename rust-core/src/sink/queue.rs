//! Bounded queue of every completed spectrum
//!
//! Lock-free SPSC ring buffer sized in whole frames. The producer only ever
//! pushes complete spectra, so the consumer always pops aligned frames.

use super::SpectrumSink;
use crate::error::{Result, SpectralError};
use ringbuf::{HeapConsumer, HeapProducer, HeapRb};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Create a queue holding up to `capacity_frames` spectra of `num_bins` bins
///
/// # Returns
/// Producer end (audio thread) and consumer end (reader thread)
pub fn frame_queue(
    num_bins: usize,
    capacity_frames: usize,
) -> Result<(FrameQueueProducer, FrameQueueConsumer)> {
    if num_bins == 0 || capacity_frames == 0 {
        return Err(SpectralError::BufferSizeMismatch {
            expected: 1,
            actual: num_bins.min(capacity_frames),
        });
    }

    log::debug!(
        "Creating frame queue: {} frames x {} bins",
        capacity_frames,
        num_bins
    );

    let rb = HeapRb::<f32>::new(num_bins * capacity_frames);
    let (producer, consumer) = rb.split();
    let dropped = Arc::new(AtomicU64::new(0));

    Ok((
        FrameQueueProducer {
            producer,
            num_bins,
            dropped: Arc::clone(&dropped),
        },
        FrameQueueConsumer {
            consumer,
            num_bins,
            dropped,
        },
    ))
}

/// Producer end of the frame queue
pub struct FrameQueueProducer {
    producer: HeapProducer<f32>,
    num_bins: usize,
    dropped: Arc<AtomicU64>,
}

impl FrameQueueProducer {
    /// Push one spectrum
    ///
    /// # Returns
    /// `false` if the queue had no room for a whole frame (the frame is
    /// dropped and counted) or the spectrum has the wrong length
    pub fn push_frame(&mut self, magnitudes: &[f32]) -> bool {
        if magnitudes.len() != self.num_bins {
            return false;
        }

        if self.producer.free_len() < self.num_bins {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        self.producer.push_slice(magnitudes);
        true
    }

    /// Number of whole frames that still fit
    pub fn free_frames(&self) -> usize {
        self.producer.free_len() / self.num_bins
    }
}

impl SpectrumSink for FrameQueueProducer {
    fn on_frame(&mut self, magnitudes: &[f32]) {
        self.push_frame(magnitudes);
    }
}

/// Consumer end of the frame queue
pub struct FrameQueueConsumer {
    consumer: HeapConsumer<f32>,
    num_bins: usize,
    dropped: Arc<AtomicU64>,
}

impl FrameQueueConsumer {
    /// Pop the oldest spectrum into `frame`
    ///
    /// # Returns
    /// `Ok(false)` if no complete frame is queued
    pub fn pop_frame(&mut self, frame: &mut [f32]) -> Result<bool> {
        if frame.len() != self.num_bins {
            return Err(SpectralError::BufferSizeMismatch {
                expected: self.num_bins,
                actual: frame.len(),
            });
        }

        if self.consumer.len() < self.num_bins {
            return Ok(false);
        }

        self.consumer.pop_slice(frame);
        Ok(true)
    }

    /// Number of complete frames waiting
    pub fn pending_frames(&self) -> usize {
        self.consumer.len() / self.num_bins
    }

    pub fn is_empty(&self) -> bool {
        self.pending_frames() == 0
    }

    /// Frames dropped because the queue was full
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }
}

//! Frame accumulation buffer
//!
//! Turns arbitrary-length pushes into fixed-size overlapping frames. The
//! buffer is allocated once; writes and shifts stay inside it.

/// Fixed-capacity accumulation buffer with hop-size overlap shift
#[derive(Debug, Clone)]
pub struct FrameFifo {
    /// Exactly `frame_size` samples; the first `fill` are valid
    buffer: Box<[f32]>,

    /// Number of leading slots holding not-yet-consumed samples
    fill: usize,

    /// Samples discarded from the front after each frame
    hop_size: usize,
}

impl FrameFifo {
    /// Create an empty FIFO
    ///
    /// `hop_size` must be in `1..=frame_size`; [`crate::AnalyzerConfig`]
    /// validates this before a FIFO is built.
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        debug_assert!(hop_size > 0 && hop_size <= frame_size);

        Self {
            buffer: vec![0.0; frame_size].into_boxed_slice(),
            fill: 0,
            hop_size,
        }
    }

    /// Copy as many samples as fit into the free space
    ///
    /// # Returns
    /// Number of samples consumed from `input`
    #[inline]
    pub fn write(&mut self, input: &[f32]) -> usize {
        let count = input.len().min(self.free_len());
        self.buffer[self.fill..self.fill + count].copy_from_slice(&input[..count]);
        self.fill += count;
        count
    }

    /// True when a full frame is ready
    #[inline]
    pub fn is_full(&self) -> bool {
        self.fill == self.buffer.len()
    }

    /// The whole frame (only meaningful when [`Self::is_full`])
    pub fn frame(&self) -> &[f32] {
        &self.buffer
    }

    /// Drop the oldest `hop_size` samples, keeping the overlap at the front
    ///
    /// The retained samples are the raw input; windowing happens on a copy.
    /// Slots past the new fill are zeroed.
    #[inline]
    pub fn advance(&mut self) {
        let hop = self.hop_size.min(self.fill);
        self.buffer.copy_within(hop.., 0);
        self.fill -= hop;
        self.buffer[self.fill..].fill(0.0);
    }

    /// Empty the FIFO and zero its contents
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.fill = 0;
    }

    /// Valid samples waiting for the next frame
    pub fn pending(&self) -> &[f32] {
        &self.buffer[..self.fill]
    }

    /// Number of valid samples
    pub fn fill(&self) -> usize {
        self.fill
    }

    /// Free slots before the frame is full
    pub fn free_len(&self) -> usize {
        self.buffer.len() - self.fill
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Whole buffer, including the zeroed slots past `fill`
    pub fn contents(&self) -> &[f32] {
        &self.buffer
    }
}

//! Fixed-capacity sample accumulator for one analysis window.

/// Collects samples until one transform window is full.
///
/// There is never more than one window in flight: once full, the caller
/// consumes [`AnalysisFifo::as_slice`] and calls [`AnalysisFifo::clear`]
/// before the next push.
#[derive(Debug, Clone)]
pub struct AnalysisFifo {
    buffer: Vec<f32>,
    len: usize,
}

impl AnalysisFifo {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            len: 0,
        }
    }

    /// Append one sample. Returns `true` when the window became full.
    /// Pushing into a full FIFO is ignored.
    #[inline]
    pub fn push(&mut self, sample: f32) -> bool {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = sample;
            self.len += 1;
        }
        self.is_full()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buffer.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Samples pushed so far, oldest first.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer[..self.len]
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

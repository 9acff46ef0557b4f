use std::collections::VecDeque;

/// Output history of one terminal session.
///
/// Append-only and bounded by a byte budget: once full, the oldest bytes
/// are evicted. After [`dispose`](Self::dispose) every append is dropped.
#[derive(Debug, Clone)]
pub struct DisplayBuffer {
    bytes: VecDeque<u8>,
    capacity: usize,
    total_written: u64,
    disposed: bool,
}

impl DisplayBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: VecDeque::new(),
            capacity,
            total_written: 0,
            disposed: false,
        }
    }

    pub fn append(&mut self, data: &[u8]) {
        if self.disposed {
            return;
        }
        self.total_written += data.len() as u64;
        let keep = data.len().min(self.capacity);
        self.bytes.extend(&data[data.len() - keep..]);
        let overflow = self.bytes.len().saturating_sub(self.capacity);
        self.bytes.drain(..overflow);
    }

    /// Retained bytes, oldest first.
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.iter().copied().collect()
    }

    /// Retained bytes decoded lossily as UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Release the buffer. Later appends are ignored.
    pub fn dispose(&mut self) {
        self.bytes = VecDeque::new();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Every byte ever appended, including evicted ones.
    pub fn total_written(&self) -> u64 {
        self.total_written
    }
}

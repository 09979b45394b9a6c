use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};

/// Fixed-capacity, append-only store for samples captured during one recording.
///
/// Lock-free on the capture path: samples are stored as f32 bit patterns in
/// atomics and the write position is published with release ordering, so
/// readers (`len`, `snapshot`) never block the audio callback.
///
/// Single writer: `append` must not be called from two threads at once.
/// Samples arriving after the buffer is full are dropped and counted.
#[derive(Debug)]
pub struct CaptureBuffer {
    slots: Box<[AtomicU32]>,
    position: AtomicUsize,
    overflowed: AtomicU64,
}

impl CaptureBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            position: AtomicUsize::new(0),
            overflowed: AtomicU64::new(0),
        }
    }

    /// Append samples, returning how many were stored.
    pub fn append(&self, samples: &[f32]) -> usize {
        let start = self.position.load(Ordering::Relaxed);
        let stored = samples.len().min(self.slots.len() - start);

        for (slot, sample) in self.slots[start..start + stored].iter().zip(samples) {
            slot.store(sample.to_bits(), Ordering::Relaxed);
        }
        self.position.store(start + stored, Ordering::Release);

        let dropped = samples.len() - stored;
        if dropped > 0 && self.overflowed.fetch_add(dropped as u64, Ordering::Relaxed) == 0 {
            log::warn!(
                "Capture buffer full at {} samples, dropping further input",
                self.slots.len()
            );
        }
        stored
    }

    /// Number of samples captured so far.
    pub fn len(&self) -> usize {
        self.position.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Samples dropped because the buffer was already full.
    pub fn overflowed(&self) -> u64 {
        self.overflowed.load(Ordering::Relaxed)
    }

    /// Copy out the captured samples, trimmed to the current position.
    pub fn snapshot(&self) -> Vec<f32> {
        let len = self.len();
        self.slots[..len]
            .iter()
            .map(|slot| f32::from_bits(slot.load(Ordering::Relaxed)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_snapshot() {
        let buf = CaptureBuffer::with_capacity(10);
        assert_eq!(buf.append(&[1.0, 2.0, 3.0]), 3);
        buf.append(&[4.0]);

        assert_eq!(buf.len(), 4);
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.snapshot(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn snapshot_is_trimmed_to_position() {
        let buf = CaptureBuffer::with_capacity(1000);
        buf.append(&[0.5; 7]);
        assert_eq!(buf.snapshot().len(), 7);
    }

    #[test]
    fn overflow_drops_newest_and_counts() {
        let buf = CaptureBuffer::with_capacity(4);
        buf.append(&[1.0, 2.0, 3.0]);
        assert_eq!(buf.append(&[4.0, 5.0, 6.0]), 1);
        assert_eq!(buf.append(&[7.0]), 0);

        assert_eq!(buf.snapshot(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.overflowed(), 3);
    }

    #[test]
    fn zero_capacity() {
        let buf = CaptureBuffer::with_capacity(0);
        assert_eq!(buf.append(&[1.0]), 0);
        assert!(buf.is_empty());
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    fn preserves_exact_bits() {
        let buf = CaptureBuffer::with_capacity(3);
        buf.append(&[-0.0, f32::MIN_POSITIVE, -1.0]);
        let out = buf.snapshot();
        assert!(out[0].is_sign_negative());
        assert_eq!(out[1], f32::MIN_POSITIVE);
        assert_eq!(out[2], -1.0);
    }

    #[test]
    fn reader_on_other_thread_sees_published_samples() {
        let buf = std::sync::Arc::new(CaptureBuffer::with_capacity(100));
        let writer = std::sync::Arc::clone(&buf);
        std::thread::spawn(move || {
            for _ in 0..10 {
                writer.append(&[0.25; 10]);
            }
        })
        .join()
        .unwrap();
        assert_eq!(buf.len(), 100);
        assert!(buf.snapshot().iter().all(|&s| s == 0.25));
    }
}

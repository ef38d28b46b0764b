//! Pending sample queue shared between producer and consumer threads.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::geom::Point;

/// FIFO of samples waiting to be drained into a plot.
///
/// Clones share the same queue. Producers push at the back from any thread;
/// the consumer takes the whole backlog at once.
#[derive(Debug, Clone, Default)]
pub struct PendingQueue {
    inner: Arc<Mutex<VecDeque<Point>>>,
}

impl PendingQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample at the back.
    pub fn push(&self, point: Point) {
        self.lock().push_back(point);
    }

    /// Remove the front sample.
    pub fn pop(&self) -> Option<Point> {
        self.lock().pop_front()
    }

    /// Take every queued sample in arrival order.
    ///
    /// The lock is held only for the swap.
    pub fn take_all(&self) -> VecDeque<Point> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of queued samples.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Point>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("pending queue lock poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_fifo_order() {
        let queue = PendingQueue::new();
        queue.push(Point::new(1.0, 1.0));
        queue.push(Point::new(2.0, 2.0));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Point::new(1.0, 1.0)));
        assert_eq!(queue.pop(), Some(Point::new(2.0, 2.0)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn take_all_empties_queue() {
        let queue = PendingQueue::new();
        for i in 0..5 {
            queue.push(Point::new(i as f64, 0.0));
        }
        let taken = queue.take_all();
        assert_eq!(taken.len(), 5);
        assert_eq!(taken.front().map(|point| point.x), Some(0.0));
        assert!(queue.is_empty());
    }

    #[test]
    fn producers_on_other_threads_share_queue() {
        let queue = PendingQueue::new();
        let handles: Vec<_> = (0..4)
            .map(|thread| {
                let queue = queue.clone();
                std::thread::spawn(move || {
                    for i in 0..250 {
                        queue.push(Point::new(i as f64, thread as f64));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("producer thread");
        }
        assert_eq!(queue.len(), 1000);
    }
}

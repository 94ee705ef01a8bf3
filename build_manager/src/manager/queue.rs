//manager/queue.rs
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Notify;

/// Snapshot of the slot queue, exposed on `/api/builds/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueueStats {
    pub running: usize,
    pub waiting: usize,
    pub max_concurrent: usize,
}

pub struct Queue {
    max_concurrent: usize,
    running: usize,
    waiting: VecDeque<Arc<Notify>>,
}

impl Queue {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
            running: 0,
            waiting: VecDeque::new(),
        }
    }

    /// Called when a build is about to start.
    /// `None` means the slot was taken and the build can run now; otherwise the
    /// caller must await the returned `Notify`, which fires once a slot has been
    /// handed over to it.
    pub fn try_acquire_slot(&mut self) -> Option<Arc<Notify>> {
        if self.running < self.max_concurrent {
            self.running += 1;
            None
        } else {
            let notify = Arc::new(Notify::new());
            self.waiting.push_back(notify.clone());
            Some(notify)
        }
    }

    /// Called when a build completes. The slot passes straight to the oldest waiter.
    pub fn release_slot(&mut self) {
        self.running = self.running.saturating_sub(1);

        if let Some(waiting_task) = self.waiting.pop_front() {
            self.running += 1;
            // notify_one stores a permit, so a waiter that has not polled yet still wakes
            waiting_task.notify_one();
        }
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            running: self.running,
            waiting: self.waiting.len(),
            max_concurrent: self.max_concurrent,
        }
    }
}

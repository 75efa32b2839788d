//! Cooperative frame scheduling.
//!
//! [`FrameLoop`] plays the role of the platform's "call me before the next
//! repaint" primitive: callbacks are queued, fire once on the next frame, and
//! must re-request themselves to keep running. Every request hands back a
//! [`FrameHandle`] that cancels the callback when dropped.

mod driver;

pub use driver::{AnimationDriver, FrameClock, FrameTiming, ScrollState, TickOutcome};

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

/// Callback invoked with the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Identifier of one queued frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequestId(u64);

#[derive(Default)]
struct FrameQueue {
    next_id: u64,
    pending: Vec<(FrameRequestId, FrameCallback)>,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameRequestId {
        self.next_id += 1;
        let id = FrameRequestId(self.next_id);
        self.pending.push((id, callback));
        id
    }

    fn remove(&mut self, id: FrameRequestId) -> Option<FrameCallback> {
        let index = self.pending.iter().position(|(pending, _)| *pending == id)?;
        Some(self.pending.remove(index).1)
    }

    fn contains(&self, id: FrameRequestId) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == id)
    }
}

/// Single-threaded frame callback queue.
///
/// Cloning yields another handle onto the same queue.
#[derive(Clone, Default)]
pub struct FrameLoop {
    queue: Rc<RefCell<FrameQueue>>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `callback` for the next frame.
    pub fn request_frame(&self, callback: impl FnOnce(f64) + 'static) -> FrameHandle {
        let id = self.queue.borrow_mut().push(Box::new(callback));
        FrameHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        }
    }

    /// Fires every callback that was pending when the frame began and returns
    /// how many ran. Callbacks requested while the frame runs wait for the
    /// next one; callbacks cancelled mid-frame are skipped.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        let due: Vec<FrameRequestId> = self
            .queue
            .borrow()
            .pending
            .iter()
            .map(|(id, _)| *id)
            .collect();

        let mut fired = 0;
        for id in due {
            let callback = self.queue.borrow_mut().remove(id);
            if let Some(callback) = callback {
                callback(timestamp);
                fired += 1;
            }
        }
        fired
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Non-owning reference, for callbacks that need to re-arm themselves
    /// without keeping the queue alive.
    pub fn downgrade(&self) -> WeakFrameLoop {
        WeakFrameLoop {
            queue: Rc::downgrade(&self.queue),
        }
    }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Weak counterpart of [`FrameLoop`].
#[derive(Clone, Default)]
pub struct WeakFrameLoop {
    queue: Weak<RefCell<FrameQueue>>,
}

impl WeakFrameLoop {
    pub fn upgrade(&self) -> Option<FrameLoop> {
        self.queue.upgrade().map(|queue| FrameLoop { queue })
    }
}

impl fmt::Debug for WeakFrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakFrameLoop").finish()
    }
}

/// Scoped ownership of one frame request. Dropping the handle cancels it.
pub struct FrameHandle {
    id: FrameRequestId,
    queue: Weak<RefCell<FrameQueue>>,
}

impl FrameHandle {
    pub fn id(&self) -> FrameRequestId {
        self.id
    }

    /// Whether the callback is still waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.queue
            .upgrade()
            .map(|queue| queue.borrow().contains(self.id))
            .unwrap_or(false)
    }

    /// Cancels the request. Returns `true` only if a pending callback was
    /// removed; cancelling twice, or after the callback fired, does nothing.
    pub fn cancel(&mut self) -> bool {
        let Some(queue) = self.queue.upgrade() else {
            return false;
        };
        self.queue = Weak::new();
        // Release the borrow before the callback is dropped.
        let removed = queue.borrow_mut().remove(self.id);
        removed.is_some()
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameHandle")
            .field("id", &self.id)
            .field("pending", &self.is_pending())
            .finish()
    }
}

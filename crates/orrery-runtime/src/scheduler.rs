//! "Run before next repaint" scheduling

use std::cell::Cell;
use std::rc::Rc;

/// The host's frame-scheduling primitive.
///
/// A request asks the host to invoke the orchestrator's frame callback once,
/// before its next repaint. Several requests before the same repaint coalesce
/// into one callback.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// A pending-frame flag shared between the orchestrator and a host loop.
///
/// The orchestrator holds one clone as its scheduler; the host holds another
/// and polls [`FrameQueue::take_pending`] once per repaint.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame has been requested and not yet taken
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clear the pending flag, returning whether a frame was due
    pub fn take_pending(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total requests received, including coalesced ones
    pub fn request_count(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}

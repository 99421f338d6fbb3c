use std::collections::VecDeque;

/// Identifies one requested frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// The host's "next frame" primitive.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancelling an unknown or already delivered handle is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A scheduler pumped by hand: requested frames queue up until the host pulls them.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pops the oldest frame still pending.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&pending| pending != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_delivered_in_request_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);

        assert_eq!(queue.next_frame(), Some(a));
        assert_eq!(queue.next_frame(), Some(b));
        assert_eq!(queue.next_frame(), None);
    }

    #[test]
    fn cancelled_frames_are_never_delivered() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();

        queue.cancel_frame(a);
        queue.cancel_frame(a);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next_frame(), Some(b));
        assert!(queue.is_empty());
    }
}

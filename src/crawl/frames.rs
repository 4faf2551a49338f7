/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest {
    pub handle: FrameHandle,
    pub cancelled: Option<FrameHandle>,
}

/// Keeps at most one frame callback outstanding.
///
/// Requesting a new frame cancels the previous one; a delivered frame is only
/// accepted if it matches the pending handle, so stale ticks fall through.
#[derive(Debug, Default)]
pub struct FrameLoop {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn request(&mut self) -> FrameRequest {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        let cancelled = self.pending.replace(handle);
        FrameRequest { handle, cancelled }
    }

    pub fn cancel(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Consume the pending handle if `handle` is the one outstanding.
    pub fn accept(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_replaces_and_reports_prior_handle() {
        let mut frames = FrameLoop::default();
        let first = frames.request();
        assert_eq!(first.cancelled, None);
        let second = frames.request();
        assert_eq!(second.cancelled, Some(first.handle));
        assert!(second.handle > first.handle);
        assert_eq!(frames.pending(), Some(second.handle));
    }

    #[test]
    fn stale_and_cancelled_handles_are_rejected() {
        let mut frames = FrameLoop::default();
        let stale = frames.request().handle;
        let live = frames.request().handle;
        assert!(!frames.accept(stale));
        assert!(frames.accept(live));
        assert!(!frames.accept(live));

        let next = frames.request().handle;
        assert_eq!(frames.cancel(), Some(next));
        assert!(!frames.accept(next));
        assert_eq!(frames.pending(), None);
    }
}

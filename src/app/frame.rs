//! Per-frame coalescing of scroll and resize signals.
//!
//! Signals only mark a frame as pending; the event loop's frame tick runs the
//! evaluation at most once per frame.  Signals that arrive while a frame is
//! already pending or in flight are folded into it, not queued.

#[derive(Debug, Default)]
pub struct FrameScheduler {
    pending: bool,
    in_flight: bool,
    /// Frames actually evaluated.
    evaluations: u64,
    /// Signals absorbed by an already-scheduled frame.
    coalesced: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a signal.  Returns `true` if it scheduled a new frame.
    pub fn request(&mut self) -> bool {
        if self.pending || self.in_flight {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start the pending frame, if there is one.  Every `true` must be
    /// followed by [`finish_frame`](Self::finish_frame).
    pub fn begin_frame(&mut self) -> bool {
        if !self.pending || self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Mark the in-flight frame done; the next signal schedules a new one.
    pub fn finish_frame(&mut self) {
        if self.in_flight {
            self.in_flight = false;
            self.pending = false;
            self.evaluations += 1;
        }
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

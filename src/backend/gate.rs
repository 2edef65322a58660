//! Coalescing guard for store fetches.

/// Keeps at most one fetch in flight.
///
/// Timer ticks that land while a fetch is outstanding are dropped. Explicit
/// refresh requests are folded into a single follow-up fetch that starts once
/// the current one completes, so a refresh issued after a post always
/// observes the post.
#[derive(Debug, Default)]
pub struct RefreshGate {
    in_flight: bool,
    follow_up: bool,
    last_seq: u64,
}

impl RefreshGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Periodic tick. Returns the sequence number of the fetch to start, or
    /// `None` when a fetch is already running.
    pub fn tick(&mut self) -> Option<u64> {
        if self.in_flight {
            None
        } else {
            Some(self.start())
        }
    }

    /// Explicit refresh. Starts a fetch now or queues exactly one follow-up.
    pub fn request(&mut self) -> Option<u64> {
        if self.in_flight {
            self.follow_up = true;
            None
        } else {
            Some(self.start())
        }
    }

    /// The running fetch finished (or died). Returns the follow-up fetch to
    /// start, if one was requested meanwhile.
    pub fn complete(&mut self) -> Option<u64> {
        self.in_flight = false;
        if std::mem::take(&mut self.follow_up) {
            Some(self.start())
        } else {
            None
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    fn start(&mut self) -> u64 {
        self.in_flight = true;
        self.last_seq += 1;
        self.last_seq
    }
}

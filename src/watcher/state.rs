//! Idle/Processing state of the change loop.

/// Loop phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Processing,
}

/// In-flight flag and the last executed snapshot.
#[derive(Debug, Default)]
pub struct WatchState {
    phase: Phase,
    last_seen: Option<Vec<u8>>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Raw bytes of the most recently executed snapshot.
    pub fn last_seen(&self) -> Option<&[u8]> {
        self.last_seen.as_deref()
    }

    /// Enter `Processing`. Returns `None` if a cycle is already running.
    ///
    /// The returned guard puts the state back to `Idle` when dropped, on
    /// every exit path.
    pub fn begin(&mut self) -> Option<Cycle<'_>> {
        if self.phase == Phase::Processing {
            return None;
        }
        self.phase = Phase::Processing;
        Some(Cycle { state: self })
    }
}

/// One parse-execute cycle; holds the state in `Processing`.
#[derive(Debug)]
pub struct Cycle<'a> {
    state: &'a mut WatchState,
}

impl Cycle<'_> {
    /// Byte-wise comparison with the last executed snapshot.
    pub fn is_duplicate(&self, snapshot: &[u8]) -> bool {
        self.state.last_seen.as_deref() == Some(snapshot)
    }

    /// Record `snapshot` as the content about to be executed.
    pub fn accept(&mut self, snapshot: Vec<u8>) {
        self.state.last_seen = Some(snapshot);
    }
}

impl Drop for Cycle<'_> {
    fn drop(&mut self) {
        self.state.phase = Phase::Idle;
    }
}

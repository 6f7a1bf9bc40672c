//! Progress counting for a generation run.

/// Receives progress updates. Implemented by the CLI progress bar.
pub trait ProgressSink {
    /// Called after every completed unit with `current <= total`.
    fn update(&mut self, current: usize, total: usize);

    /// Called once when the run finishes.
    fn finish(&mut self) {}
}

/// Monotonic counter over the units of work of one run.
///
/// The counter never exceeds the total set by [`ProgressTracker::start`].
/// Without a sink it only counts.
pub struct ProgressTracker {
    total: usize,
    current: usize,
    sink: Option<Box<dyn ProgressSink>>,
}

impl ProgressTracker {
    #[must_use]
    pub fn new(sink: Box<dyn ProgressSink>) -> Self {
        Self {
            total: 0,
            current: 0,
            sink: Some(sink),
        }
    }

    /// A tracker that reports nowhere.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            total: 0,
            current: 0,
            sink: None,
        }
    }

    /// Reset the counter and set the expected number of units.
    pub fn start(&mut self, total: usize) {
        self.total = total;
        self.current = 0;
        if let Some(sink) = &mut self.sink {
            sink.update(0, total);
        }
    }

    /// Count one finished unit.
    pub fn increment(&mut self) {
        if self.current >= self.total {
            return;
        }
        self.current += 1;
        if let Some(sink) = &mut self.sink {
            sink.update(self.current, self.total);
        }
    }

    pub fn finish(&mut self) {
        if let Some(sink) = &mut self.sink {
            sink.finish();
        }
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}

impl std::fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("total", &self.total)
            .field("current", &self.current)
            .field("sink", &self.sink.is_some())
            .finish()
    }
}

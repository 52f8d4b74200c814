use std::time::Instant;

/// Counters for one run of the capture flow
#[derive(Clone, Debug, Default)]
pub struct FlowStatus {
    pub captures: u64,
    pub capture_failures: u64,
    pub last_capture_time: Option<Instant>,
    pub issued: u64,
    pub completed: u64,
    pub failed: u64,
    pub stale: u64,
    pub discarded: u64,
    pub copies: u64,
}

impl FlowStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_capture(&mut self) {
        self.captures += 1;
        self.last_capture_time = Some(Instant::now());
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "[EVENT_LOOP] session: {} captures ({} failed), {} recognitions issued, {} completed, {} failed, {} stale, {} discarded, {} copies",
            self.captures,
            self.capture_failures,
            self.issued,
            self.completed,
            self.failed,
            self.stale,
            self.discarded,
            self.copies
        );

        if let Some(at) = self.last_capture_time {
            tracing::debug!("[EVENT_LOOP] last capture {:?} ago", at.elapsed());
        }
    }
}

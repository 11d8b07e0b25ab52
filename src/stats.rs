/// Run statistics
///
/// Throughput and latency figures for one completed pipeline run. Pure data
/// and arithmetic; formatting belongs to the reporting side.

use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    messages: u64,
    bytes: u64,
    elapsed: Duration,
}

impl RunStats {
    pub fn new(messages: u64, bytes: u64, elapsed: Duration) -> Self {
        RunStats {
            messages,
            bytes,
            elapsed,
        }
    }

    pub fn total_messages(&self) -> u64 {
        self.messages
    }

    pub fn total_bytes(&self) -> u64 {
        self.bytes
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Messages per second over the whole run.
    pub fn messages_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.messages as f64 / secs
        } else {
            0.0
        }
    }

    /// Bytes per second over the whole run.
    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }

    /// Mean wall-clock time per message, in microseconds.
    pub fn mean_latency_us(&self) -> f64 {
        if self.messages == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() * 1e6 / self.messages as f64
    }
}

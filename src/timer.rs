//! Simple timing utility reporting through `tracing`

use std::time::Instant;

pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        tracing::trace!(target: "r1cs_qap::timer", "  * {}", name);

        Timer {
            name,
            start: Instant::now(),
        }
    }

    pub fn stop(&self) {
        let duration = self.start.elapsed();
        tracing::debug!(target: "r1cs_qap::timer", elapsed = ?duration, "  * {}", self.name);
    }
}

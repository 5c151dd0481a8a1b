use serde::Serialize;

/// Timing and size of mesh rebuilds, reported as an operational signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct RebuildStats {
    pub rebuild_count: u64,
    pub last_rebuild_ms: f64,
    pub total_rebuild_ms: f64,
    pub vertex_count: usize,
    pub singular_vertices: usize,
}

impl RebuildStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed rebuild.
    pub fn record(&mut self, elapsed_ms: f64, vertex_count: usize, singular_vertices: usize) {
        self.rebuild_count += 1;
        self.last_rebuild_ms = elapsed_ms;
        self.total_rebuild_ms += elapsed_ms;
        self.vertex_count = vertex_count;
        self.singular_vertices = singular_vertices;
    }

    /// Mean rebuild time in milliseconds, 0 before the first rebuild.
    pub fn average_ms(&self) -> f64 {
        if self.rebuild_count == 0 {
            0.0
        } else {
            self.total_rebuild_ms / self.rebuild_count as f64
        }
    }
}

/// Current time in milliseconds.
#[cfg(target_arch = "wasm32")]
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_start_at_zero() {
        let stats = RebuildStats::new();
        assert_eq!(stats.rebuild_count, 0);
        assert_eq!(stats.average_ms(), 0.0);
    }

    #[test]
    fn record_accumulates() {
        let mut stats = RebuildStats::new();
        stats.record(4.0, 600, 0);
        stats.record(2.0, 1200, 3);
        assert_eq!(stats.rebuild_count, 2);
        assert_eq!(stats.last_rebuild_ms, 2.0);
        assert_eq!(stats.total_rebuild_ms, 6.0);
        assert_eq!(stats.vertex_count, 1200);
        assert_eq!(stats.singular_vertices, 3);
        assert!((stats.average_ms() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn now_reads_a_clock() {
        assert!(now() > 0.0);
    }
}

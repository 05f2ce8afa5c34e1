//! Forwarding counters.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters updated by the forwarding engine.
#[derive(Debug, Default)]
pub struct SwitchStats {
    pub frames_received: AtomicU64,
    pub frames_malformed: AtomicU64,
    pub frames_flooded: AtomicU64,
    pub frames_unicast: AtomicU64,
    pub frames_filtered: AtomicU64,
    pub emissions: AtomicU64,
    pub entries_inserted: AtomicU64,
    pub entries_refreshed: AtomicU64,
    pub entries_moved: AtomicU64,
    pub entries_evicted: AtomicU64,
    pub control_commands: AtomicU64,
}

/// Point-in-time copy of [`SwitchStats`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchStatsSnapshot {
    pub frames_received: u64,
    pub frames_malformed: u64,
    pub frames_flooded: u64,
    pub frames_unicast: u64,
    pub frames_filtered: u64,
    pub emissions: u64,
    pub entries_inserted: u64,
    pub entries_refreshed: u64,
    pub entries_moved: u64,
    pub entries_evicted: u64,
    pub control_commands: u64,
}

impl SwitchStats {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    /// Copies the current counter values.
    pub fn snapshot(&self) -> SwitchStatsSnapshot {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        SwitchStatsSnapshot {
            frames_received: load(&self.frames_received),
            frames_malformed: load(&self.frames_malformed),
            frames_flooded: load(&self.frames_flooded),
            frames_unicast: load(&self.frames_unicast),
            frames_filtered: load(&self.frames_filtered),
            emissions: load(&self.emissions),
            entries_inserted: load(&self.entries_inserted),
            entries_refreshed: load(&self.entries_refreshed),
            entries_moved: load(&self.entries_moved),
            entries_evicted: load(&self.entries_evicted),
            control_commands: load(&self.control_commands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_default() {
        let stats = SwitchStats::default();
        assert_eq!(stats.snapshot(), SwitchStatsSnapshot::default());
    }

    #[test]
    fn test_snapshot_reflects_counters() {
        let stats = SwitchStats::default();
        SwitchStats::bump(&stats.frames_received);
        SwitchStats::bump(&stats.frames_received);
        SwitchStats::add(&stats.emissions, 3);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.frames_received, 2);
        assert_eq!(snapshot.emissions, 3);
        assert_eq!(snapshot.frames_flooded, 0);
    }
}

//! Bounded ring buffer of recent alert records.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

/// How many alert records are retained for `/health` and `/stats`.
pub const ALERT_CAPACITY: usize = 10;

/// One logged notification event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertRecord {
    /// Unix timestamp in seconds.
    pub time: f64,
    /// Human-readable alert text.
    pub msg: String,
}

impl AlertRecord {
    /// Create a record stamped with the current wall-clock time.
    pub fn now(msg: String) -> Self {
        let time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Self { time, msg }
    }
}

/// Fixed-capacity alert history with overwrite-oldest semantics.
///
/// Appends and snapshots take a short lock; the lock is never held across
/// an await point.
#[derive(Debug)]
pub struct StatsLedger {
    records: Mutex<VecDeque<AlertRecord>>,
    capacity: usize,
}

impl StatsLedger {
    pub fn new() -> Self {
        Self::with_capacity(ALERT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Append a record, evicting the oldest if the buffer is full.
    pub fn push(&self, record: AlertRecord) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Copy of the retained records, oldest first.
    pub fn snapshot(&self) -> Vec<AlertRecord> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StatsLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn record(msg: &str) -> AlertRecord {
        AlertRecord::now(msg.to_string())
    }

    #[test]
    fn starts_empty() {
        let ledger = StatsLedger::new();
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().is_empty());
    }

    #[test]
    fn retains_insertion_order() {
        let ledger = StatsLedger::new();
        ledger.push(record("first"));
        ledger.push(record("second"));

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot[0].msg, "first");
        assert_eq!(snapshot[1].msg, "second");
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let ledger = StatsLedger::new();
        for i in 0..15 {
            ledger.push(record(&format!("alert {}", i)));
        }

        let snapshot = ledger.snapshot();
        assert_eq!(snapshot.len(), ALERT_CAPACITY);
        assert_eq!(snapshot[0].msg, "alert 5");
        assert_eq!(snapshot[9].msg, "alert 14");
    }

    #[test]
    fn concurrent_appends_lose_nothing_within_capacity() {
        let ledger = Arc::new(StatsLedger::with_capacity(100));

        let handles: Vec<_> = (0..10)
            .map(|t| {
                let ledger = ledger.clone();
                std::thread::spawn(move || {
                    for i in 0..10 {
                        ledger.push(record(&format!("t{}-{}", t, i)));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.len(), 100);
    }
}

//! Destinations for interception records

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::InterceptionRecord;

/// Receives the records of intercepted calls
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &InterceptionRecord);
}

impl<S: RecordSink + ?Sized> RecordSink for Arc<S> {
    fn emit(&self, record: &InterceptionRecord) {
        (**self).emit(record)
    }
}

impl<S: RecordSink + ?Sized> RecordSink for &S {
    fn emit(&self, record: &InterceptionRecord) {
        (**self).emit(record)
    }
}

/// Writes records as `INFO` events under the `execlog` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl RecordSink for TracingSink {
    fn emit(&self, record: &InterceptionRecord) {
        info!(
            target: "execlog",
            stage = %record.stage,
            method = %record.method,
            class = %record.class,
            parameters = record.parameters.as_deref(),
            result = record.result.as_deref(),
            time_execution_ms = record.elapsed_ms,
            "{}",
            record
        );
    }
}

/// Keeps records in memory; clones share the same buffer
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<InterceptionRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records emitted so far
    pub fn records(&self) -> Vec<InterceptionRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl RecordSink for MemorySink {
    fn emit(&self, record: &InterceptionRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stage;

    fn record() -> InterceptionRecord {
        InterceptionRecord {
            stage: Stage::Init,
            method: "run".to_string(),
            class: "Job".to_string(),
            parameters: None,
            result: None,
            elapsed_ms: None,
        }
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let clone = sink.clone();

        clone.emit(&record());
        assert_eq!(sink.records(), vec![record()]);

        sink.clear();
        assert!(clone.records().is_empty());
    }

    #[test]
    fn test_arc_sink_forwards() {
        let sink = MemorySink::new();
        let shared: Arc<dyn RecordSink> = Arc::new(sink.clone());

        shared.emit(&record());
        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        TracingSink.emit(&record());
    }
}

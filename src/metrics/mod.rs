use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated across layout passes and tree mutations.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    passes: u64,
    failed_passes: u64,
    regions: u64,
    created: u64,
    background: u64,
    mutations: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, regions: usize, created: usize, background: usize) {
        self.passes = self.passes.saturating_add(1);
        self.regions = self.regions.saturating_add(regions as u64);
        self.created = self.created.saturating_add(created as u64);
        self.background = self.background.saturating_add(background as u64);
    }

    pub fn record_failure(&mut self) {
        self.failed_passes = self.failed_passes.saturating_add(1);
    }

    pub fn record_mutation(&mut self) {
        self.mutations = self.mutations.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            passes: self.passes,
            failed_passes: self.failed_passes,
            regions: self.regions,
            created: self.created,
            background: self.background,
            mutations: self.mutations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub passes: u64,
    pub failed_passes: u64,
    pub regions: u64,
    pub created: u64,
    pub background: u64,
    pub mutations: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("failed_passes".to_string(), json!(self.failed_passes));
        map.insert("regions".to_string(), json!(self.regions));
        map.insert("created".to_string(), json!(self.created));
        map.insert("background".to_string(), json!(self.background));
        map.insert("mutations".to_string(), json!(self.mutations));
        map
    }
}

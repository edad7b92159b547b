use std::sync::{Arc, Mutex};

use crate::logging::Logger;
use crate::metrics::LayoutMetrics;

/// Observability knobs for a layout tree.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Optional structured logger for passes and mutations.
    pub logger: Option<Logger>,
    /// Shared counters updated on every pass and mutation.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Target field attached to every emitted log event.
    pub log_target: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            log_target: "room_layout::tree".to_string(),
        }
    }
}

impl LayoutConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

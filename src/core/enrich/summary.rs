//! Enrichment run summary and reporting

use crate::domain::{ReferenceKind, ResourceKind};
use crate::log_enrichment_complete;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Outcome of one enrichment run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentSummary {
    /// Kind that was enriched
    pub kind: ResourceKind,

    /// Wall-clock start of the run
    pub started_at: DateTime<Utc>,

    /// Records returned
    pub total_records: usize,

    /// Records paired with a SWAPI counterpart
    pub matched: usize,

    /// Records returned without a counterpart
    pub unmatched: usize,

    /// Catalogs that could not be loaded and were treated as empty
    pub degraded_catalogs: Vec<ReferenceKind>,

    /// Duration of the run
    pub duration: Duration,
}

impl EnrichmentSummary {
    /// Create an empty summary for a run starting now
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            started_at: Utc::now(),
            total_records: 0,
            matched: 0,
            unmatched: 0,
            degraded_catalogs: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count one returned record
    pub fn record(&mut self, matched: bool) {
        self.total_records += 1;
        if matched {
            self.matched += 1;
        } else {
            self.unmatched += 1;
        }
    }

    /// Note a catalog that failed to load
    pub fn add_degraded(&mut self, catalog: ReferenceKind) {
        if !self.degraded_catalogs.contains(&catalog) {
            self.degraded_catalogs.push(catalog);
        }
    }

    /// Whether every catalog loaded
    pub fn is_complete(&self) -> bool {
        self.degraded_catalogs.is_empty()
    }

    /// Share of records that found a counterpart, as a percentage
    pub fn match_rate(&self) -> f64 {
        if self.total_records == 0 {
            return 0.0;
        }
        (self.matched as f64 / self.total_records as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        if self.total_records == 0 {
            tracing::warn!(kind = %self.kind, "Enrichment produced no records");
        }

        log_enrichment_complete!(self.kind, self.total_records, self.duration);
        tracing::info!(
            kind = %self.kind,
            started_at = %self.started_at.to_rfc3339(),
            matched = self.matched,
            unmatched = self.unmatched,
            match_rate = format!("{:.1}%", self.match_rate()),
            "Enrichment match results"
        );

        if !self.is_complete() {
            let degraded: Vec<&str> = self.degraded_catalogs.iter().map(|k| k.as_str()).collect();
            tracing::warn!(
                kind = %self.kind,
                degraded = %degraded.join(", "),
                "Enrichment ran without some reference catalogs"
            );
        }
    }
}

//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output for development
//! - JSON-formatted rolling log files
//! - `RUST_LOG` style filtering
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the embedding application through [`init_logging`].
//!
//! # Example
//!
//! ```no_run
//! use holonet::logging::init_logging;
//! use holonet::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an enrichment run
///
/// # Example
///
/// ```no_run
/// use holonet::log_enrichment_start;
/// use holonet::domain::ResourceKind;
///
/// log_enrichment_start!(ResourceKind::Characters);
/// ```
#[macro_export]
macro_rules! log_enrichment_start {
    ($kind:expr) => {
        tracing::info!(kind = %$kind, "Starting enrichment");
    };
}

/// Log the completion of an enrichment run
///
/// # Example
///
/// ```no_run
/// use holonet::log_enrichment_complete;
/// use holonet::domain::ResourceKind;
/// use std::time::Duration;
///
/// log_enrichment_complete!(ResourceKind::Locations, 42, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_enrichment_complete {
    ($kind:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            kind = %$kind,
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Enrichment completed"
        );
    };
}

/// Log a reference catalog that could not be loaded
///
/// # Example
///
/// ```no_run
/// use holonet::log_catalog_degraded;
/// use holonet::domain::{ReferenceKind, SourceError};
///
/// let error = SourceError::Timeout("people".to_string());
/// log_catalog_degraded!(ReferenceKind::People, &error);
/// ```
#[macro_export]
macro_rules! log_catalog_degraded {
    ($catalog:expr, $error:expr) => {
        tracing::warn!(
            catalog = %$catalog,
            error = %$error,
            "Reference catalog unavailable, enriching without it"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use holonet::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying request"
        );
    };
}

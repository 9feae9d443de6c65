// File: crates/price-chart-core/src/error.rs
// Summary: Error types for chart initialization and engine delegation.

use thiserror::Error;

/// Failure reported by a [`ChartEngine`](crate::engine::ChartEngine) when it cannot
/// accept a configuration. Engines must not keep partial state on error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("render failed: {0}")]
    Render(#[from] anyhow::Error),
    #[error("configuration rejected: {0}")]
    Rejected(String),
}

/// Terminal outcomes of [`ChartInitializer::try_initialize`](crate::init::ChartInitializer::try_initialize).
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Canvas element not found: {0}")]
    MissingSurface(String),
    #[error("No chart data available")]
    EmptyOrAbsentData,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

// File: crates/price-chart-core/src/init.rs
// Summary: ChartInitializer: surface lookup, data validation, engine delegation.

use tracing::{error, info, warn};

use crate::config::ChartConfig;
use crate::data::{validate, ChartData};
use crate::engine::ChartEngine;
use crate::error::InitError;
use crate::surface::SurfaceHost;

/// Builds the price-history chart for a surface and hands it to an engine.
///
/// Failures never propagate out of [`initialize`](Self::initialize): they end in a
/// diagnostic and nothing is rendered.
pub struct ChartInitializer<H, E> {
    host: H,
    engine: E,
}

impl<H, E> ChartInitializer<H, E>
where
    H: SurfaceHost,
    E: ChartEngine<H::Surface>,
{
    pub fn new(host: H, engine: E) -> Self {
        Self { host, engine }
    }

    /// Render the price chart on `surface_id`. Outcomes are reported only through
    /// `tracing`: error for a missing surface or engine failure, warning for missing
    /// data, info on success.
    pub fn initialize(&mut self, surface_id: &str, data: Option<&ChartData>) {
        match self.try_initialize(surface_id, data) {
            Ok(_) => info!("Price chart initialized successfully"),
            Err(InitError::MissingSurface(id)) => error!(surface_id = %id, "Canvas element not found: {id}"),
            Err(InitError::EmptyOrAbsentData) => warn!("No chart data available"),
            Err(InitError::Engine(e)) => error!(surface_id, error = %e, "Price chart rendering failed"),
        }
    }

    /// Same checkpoints as [`initialize`](Self::initialize), returning the outcome
    /// instead of logging it.
    pub fn try_initialize(&mut self, surface_id: &str, data: Option<&ChartData>) -> Result<E::Handle, InitError> {
        let surface = self
            .host
            .resolve(surface_id)
            .ok_or_else(|| InitError::MissingSurface(surface_id.to_string()))?;
        let data = validate(data)?;
        let config = build_config(data);
        Ok(self.engine.create(surface, config)?)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

/// Configuration submitted for valid data.
pub fn build_config(data: &ChartData) -> ChartConfig {
    ChartConfig::price_history(data)
}

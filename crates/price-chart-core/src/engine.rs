// File: crates/price-chart-core/src/engine.rs
// Summary: Chart engine seam: accepts a surface plus a full configuration and renders it.

use crate::config::ChartConfig;
use crate::error::EngineError;

/// Renders a configured chart onto a surface of type `S`.
///
/// Contract: `create` either accepts the whole configuration (and returns a handle to
/// the live chart) or fails without keeping anything.
pub trait ChartEngine<S> {
    type Handle;

    fn create(&mut self, surface: S, config: ChartConfig) -> Result<Self::Handle, EngineError>;
}

impl<S, E: ChartEngine<S> + ?Sized> ChartEngine<S> for &mut E {
    type Handle = E::Handle;

    fn create(&mut self, surface: S, config: ChartConfig) -> Result<Self::Handle, EngineError> {
        (**self).create(surface, config)
    }
}

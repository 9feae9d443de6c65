// File: crates/price-chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart initializer, config model and raster engine.

pub mod chart;
pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod init;
pub mod keepa;
pub mod raster;
pub mod scale;
pub mod spline;
pub mod style;
pub mod surface;
pub mod text;
pub mod types;

pub use chart::{ChartInstance, Layout, RenderOptions, TooltipContent};
pub use config::{ChartConfig, TickCallback, TooltipLabel};
pub use data::ChartData;
pub use engine::ChartEngine;
pub use error::{EngineError, InitError};
pub use format::{format_fixed, format_price_tick, format_tooltip_label, series_label};
pub use init::{build_config, ChartInitializer};
pub use raster::{ChartHandle, RasterEngine};
pub use style::{Color, Theme};
pub use surface::{CanvasElement, Document, SurfaceHost};
pub use text::TextShaper;

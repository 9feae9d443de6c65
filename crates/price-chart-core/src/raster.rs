// File: crates/price-chart-core/src/raster.rs
// Summary: RasterEngine: ChartEngine implementation that renders configs onto CanvasElements with Skia.

use std::path::PathBuf;

use tracing::debug;

use crate::chart::{ChartInstance, RenderOptions};
use crate::config::ChartConfig;
use crate::engine::ChartEngine;
use crate::error::EngineError;
use crate::surface::CanvasElement;

/// Index of a chart created by a [`RasterEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub usize);

/// Headless engine. Each accepted chart is rendered once at creation; the
/// instance and its frame are kept until [`destroy`](Self::destroy) so callers can
/// re-render (e.g. with hover). Frames already written to `output_dir` are not kept.
pub struct RasterEngine {
    pub opts: RenderOptions,
    /// When set, every created chart is also written to `<dir>/<canvas id>.png`.
    pub output_dir: Option<PathBuf>,
    // Destroyed slots stay `None`; handles are never reused.
    charts: Vec<Option<LiveChart>>,
}

struct LiveChart {
    instance: ChartInstance,
    png: Option<Vec<u8>>,
}

impl Default for RasterEngine {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl RasterEngine {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts, output_dir: None, charts: Vec::new() }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    fn live(&self, handle: ChartHandle) -> Option<&LiveChart> {
        self.charts.get(handle.0).and_then(Option::as_ref)
    }

    pub fn chart(&self, handle: ChartHandle) -> Option<&ChartInstance> {
        self.live(handle).map(|c| &c.instance)
    }

    /// PNG bytes produced when the chart was created; `None` once written to disk.
    pub fn frame(&self, handle: ChartHandle) -> Option<&[u8]> {
        self.live(handle).and_then(|c| c.png.as_deref())
    }

    /// Drop a chart and its frame. Returns `false` for unknown or already destroyed handles.
    pub fn destroy(&mut self, handle: ChartHandle) -> bool {
        let removed = self.charts.get_mut(handle.0).and_then(Option::take).is_some();
        if removed {
            debug!(handle = handle.0, "chart destroyed");
        }
        removed
    }

    /// Live charts.
    pub fn len(&self) -> usize {
        self.charts.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChartEngine<CanvasElement> for RasterEngine {
    type Handle = ChartHandle;

    fn create(&mut self, surface: CanvasElement, config: ChartConfig) -> Result<ChartHandle, EngineError> {
        if config.data.datasets.is_empty() {
            return Err(EngineError::Rejected("configuration has no dataset".to_string()));
        }
        let instance = ChartInstance::new(surface, config);
        let png = match &self.output_dir {
            Some(dir) => {
                let path = dir.join(format!("{}.png", instance.canvas.id));
                instance.render_to_png(&self.opts, &path)?;
                debug!(path = %path.display(), "wrote chart frame");
                None
            }
            None => Some(instance.render_to_png_bytes(&self.opts)?),
        };
        let handle = ChartHandle(self.charts.len());
        debug!(canvas = %instance.canvas.id, points = instance.point_count(), "chart created");
        self.charts.push(Some(LiveChart { instance, png }));
        Ok(handle)
    }
}

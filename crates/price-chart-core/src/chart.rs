// File: crates/price-chart-core/src/chart.rs
// Summary: Chart instance layout and headless rendering (PNG / RGBA) using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::config::{ChartConfig, Dataset, InteractionAxis, XTicks};
use crate::geometry::Rect;
use crate::grid::{nice_ticks, skip_labels, y_tick_budget};
use crate::scale::{CategoryScale, ValueScale};
use crate::spline;
use crate::style::{Color, Theme};
use crate::surface::CanvasElement;
use crate::text::TextShaper;
use crate::types::{Insets, LINE_ASPECT_RATIO};

pub struct RenderOptions {
    pub insets: Insets,
    pub theme: Theme,
    /// Text output toggle; snapshot tests switch it off to avoid font variance.
    pub draw_labels: bool,
    /// Pointer position in canvas pixels; drives hover styling and the tooltip.
    pub hover: Option<(f32, f32)>,
    pub font_size: f32,
    pub aspect_ratio: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            insets: Insets::default(),
            theme: Theme::light(),
            draw_labels: true,
            hover: None,
            font_size: 12.0,
            aspect_ratio: LINE_ASPECT_RATIO,
        }
    }
}

/// Tooltip contents for the hovered category.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipContent {
    pub index: usize,
    pub title: String,
    pub lines: Vec<String>,
    /// Pixel position of the hovered point.
    pub anchor: (f32, f32),
}

/// Resolved pixel geometry for one render.
#[derive(Clone, Debug)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub plot: Rect,
    pub x: CategoryScale,
    pub y: ValueScale,
    pub y_ticks: Vec<f64>,
    /// Category indices whose labels are drawn.
    pub x_ticks: Vec<usize>,
    /// Pixel position per plotted index; `None` for non-finite prices.
    pub points: Vec<Option<(f32, f32)>>,
}

/// A configured chart bound to its canvas.
#[derive(Clone, Debug)]
pub struct ChartInstance {
    pub canvas: CanvasElement,
    pub config: ChartConfig,
}

impl ChartInstance {
    pub fn new(canvas: CanvasElement, config: ChartConfig) -> Self {
        Self { canvas, config }
    }

    /// Output size. A responsive chart fills the canvas width; with the aspect ratio
    /// maintained the height follows from it, otherwise the canvas height is used.
    pub fn size(&self, opts: &RenderOptions) -> (i32, i32) {
        let width = self.canvas.width.max(1) as f32;
        let height = if self.config.options.maintain_aspect_ratio {
            (width / opts.aspect_ratio.max(0.01)).round()
        } else {
            self.canvas.height as f32
        };
        (width as i32, (height as i32).max(1))
    }

    /// Number of plotted points: the shorter of labels and prices.
    pub fn point_count(&self) -> usize {
        let prices = self.config.dataset().map_or(0, |d| d.data.len());
        self.config.data.labels.len().min(prices)
    }

    pub fn layout(&self, opts: &RenderOptions, shaper: Option<&TextShaper>) -> Layout {
        let (width, height) = self.size(opts);
        let n = self.point_count();
        let values: &[f64] = match self.config.dataset() {
            Some(d) => &d.data[..n],
            None => &[],
        };
        let y_opts = &self.config.options.scales.y;
        let x_opts = &self.config.options.scales.x;

        let mut vmin = f64::INFINITY;
        let mut vmax = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| v.is_finite()) {
            vmin = vmin.min(v);
            vmax = vmax.max(v);
        }
        if !vmin.is_finite() {
            vmin = 0.0;
            vmax = 1.0;
        }
        if y_opts.begin_at_zero {
            vmin = vmin.min(0.0);
            vmax = vmax.max(0.0);
        }

        let mut top = opts.insets.top as f32;
        if self.config.options.plugins.legend.display {
            top += opts.font_size + 12.0;
        }
        let rough_plot_h = (height as f32 - top - opts.insets.bottom as f32).max(1.0);
        let y_ticks = nice_ticks(vmin, vmax, y_tick_budget(rough_plot_h));

        let mut left = opts.insets.left as f32;
        let mut bottom_gap = opts.insets.bottom as f32;
        let x_ticks = skip_labels(n, x_opts.ticks.max_ticks_limit);
        if let (true, Some(shaper)) = (opts.draw_labels, shaper) {
            let widest_y = y_ticks
                .iter()
                .map(|&t| shaper.measure_width(&y_opts.ticks.callback.format(t), opts.font_size))
                .fold(0.0f32, f32::max);
            left = left.max(widest_y + 12.0);
            let widest_x = x_ticks
                .iter()
                .map(|&i| shaper.measure_width(&self.config.data.labels[i], opts.font_size))
                .fold(0.0f32, f32::max);
            let rotation = label_rotation(&x_opts.ticks);
            bottom_gap = bottom_gap.max(TextShaper::rotated_extent(widest_x, opts.font_size, rotation) + 12.0);
        }

        let plot = Rect::from_ltrb(
            left,
            top,
            (width as f32 - opts.insets.right as f32).max(left + 1.0),
            (height as f32 - bottom_gap).max(top + 1.0),
        );
        let (lo, hi) = match (y_ticks.first(), y_ticks.last()) {
            (Some(&lo), Some(&hi)) => (lo, hi),
            _ => (vmin, vmax),
        };
        let x = CategoryScale::new(plot.left, plot.right, n);
        let y = ValueScale::new_linear(plot.top, plot.bottom, lo, hi);
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| v.is_finite().then(|| (x.to_px(i), y.to_px(v))))
            .collect();

        Layout { width, height, plot, x, y, y_ticks, x_ticks, points }
    }

    /// Tooltip for a pointer at `pos`, following the configured interaction: the
    /// closest point along the interaction axis, without requiring the pointer to
    /// touch it. `None` when the pointer is off the canvas or nothing is plotted.
    pub fn tooltip_at(&self, layout: &Layout, pos: (f32, f32)) -> Option<TooltipContent> {
        let (px, py) = pos;
        if px < 0.0 || py < 0.0 || px > layout.width as f32 || py > layout.height as f32 {
            return None;
        }
        let interaction = &self.config.options.interaction;
        let index = nearest_point(&layout.points, pos, interaction.axis)?;
        if interaction.intersect {
            let (x, y) = layout.points[index]?;
            let radius = self.config.dataset().map_or(0.0, |d| d.point_hover_radius);
            if crate::geometry::distance((x, y), pos) > radius {
                return None;
            }
        }
        let dataset = self.config.dataset()?;
        let label = &self.config.options.plugins.tooltip.callbacks.label;
        Some(TooltipContent {
            index,
            title: self.config.data.labels[index].clone(),
            lines: vec![label.format(dataset.data[index])],
            anchor: layout.points[index]?,
        })
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) -> Layout {
        let shaper = opts.draw_labels.then(TextShaper::new);
        let layout = self.layout(opts, shaper.as_ref());
        canvas.clear(opts.theme.background.to_skia());

        draw_y_axis(canvas, &layout, self, opts, shaper.as_ref());
        draw_x_axis(canvas, &layout, self, opts, shaper.as_ref());

        let tooltip = opts.hover.and_then(|pos| self.tooltip_at(&layout, pos));
        if let Some(dataset) = self.config.dataset() {
            draw_line_series(canvas, &layout, dataset, tooltip.as_ref().map(|t| t.index));
            if self.config.options.plugins.legend.display {
                if let Some(shaper) = shaper.as_ref() {
                    draw_legend(canvas, &layout, dataset, opts, shaper);
                }
            }
        }
        if let (Some(tip), Some(shaper)) = (tooltip.as_ref(), shaper.as_ref()) {
            draw_tooltip(canvas, &layout, tip, opts, shaper);
        }
        layout
    }

    fn render_surface(&self, opts: &RenderOptions) -> Result<skia::Surface> {
        let (w, h) = self.size(opts);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        self.draw(surface.canvas(), opts);
        Ok(surface)
    }

    /// Render to PNG bytes in memory.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = self.render_surface(opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Render to a straight-alpha RGBA8 buffer: `(pixels, width, height, row_bytes)`.
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.render_surface(opts)?;
        let (w, h) = self.size(opts);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            anyhow::bail!("reading back {w}x{h} pixels failed");
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }
}

/// Closest plotted point to `pos` measured along `axis`; ties go to the lower index.
pub fn nearest_point(points: &[Option<(f32, f32)>], pos: (f32, f32), axis: InteractionAxis) -> Option<usize> {
    let metric = |p: (f32, f32)| match axis {
        InteractionAxis::X => (p.0 - pos.0).abs(),
        InteractionAxis::Y => (p.1 - pos.1).abs(),
        InteractionAxis::Xy => crate::geometry::distance(p, pos),
    };
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.iter().enumerate() {
        let Some(p) = *p else { continue };
        let d = metric(p);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

// ---- helpers ----------------------------------------------------------------

/// Labels are not auto-rotated to fit: the minimum rotation is always used.
fn label_rotation(ticks: &XTicks) -> f32 {
    ticks.min_rotation.clamp(0.0, 90.0)
}

fn stroke_paint(color: Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color.to_skia());
    paint
}

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color.to_skia());
    paint
}

fn draw_y_axis(canvas: &skia::Canvas, layout: &Layout, chart: &ChartInstance, opts: &RenderOptions, shaper: Option<&TextShaper>) {
    let y_opts = &chart.config.options.scales.y;
    let plot = &layout.plot;
    if y_opts.grid.display {
        let paint = stroke_paint(y_opts.grid.color.unwrap_or(opts.theme.axis_line), 1.0);
        for &t in &layout.y_ticks {
            let y = layout.y.to_px(t);
            canvas.draw_line((plot.left, y), (plot.right, y), &paint);
        }
    }
    canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &stroke_paint(opts.theme.axis_line, 1.0));
    if let Some(shaper) = shaper {
        for &t in &layout.y_ticks {
            let y = layout.y.to_px(t) + opts.font_size * 0.35;
            let text = y_opts.ticks.callback.format(t);
            shaper.draw_right(canvas, &text, plot.left - 8.0, y, opts.font_size, opts.theme.tick_label);
        }
    }
}

fn draw_x_axis(canvas: &skia::Canvas, layout: &Layout, chart: &ChartInstance, opts: &RenderOptions, shaper: Option<&TextShaper>) {
    let x_opts = &chart.config.options.scales.x;
    let plot = &layout.plot;
    if x_opts.grid.display {
        let paint = stroke_paint(x_opts.grid.color.unwrap_or(opts.theme.axis_line), 1.0);
        for &i in &layout.x_ticks {
            let x = layout.x.to_px(i);
            canvas.draw_line((x, plot.top), (x, plot.bottom), &paint);
        }
    }
    canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &stroke_paint(opts.theme.axis_line, 1.0));
    if let Some(shaper) = shaper {
        let rotation = label_rotation(&x_opts.ticks);
        for &i in &layout.x_ticks {
            let x = layout.x.to_px(i);
            let label = &chart.config.data.labels[i];
            shaper.draw_rotated_end(canvas, label, x, plot.bottom + 8.0 + opts.font_size * 0.5, rotation, opts.font_size, opts.theme.tick_label);
        }
    }
}

fn draw_line_series(canvas: &skia::Canvas, layout: &Layout, dataset: &Dataset, hovered: Option<usize>) {
    let plot = &layout.plot;
    // fill target is the zero line, clamped into the plot
    let base_y = crate::geometry::clamp(layout.y.to_px(0.0), plot.top, plot.bottom);

    for segment in segments(&layout.points) {
        let pts: Vec<(f32, f32)> = segment.iter().map(|&(_, p)| p).collect();
        let smoothed = spline::smooth(&pts, dataset.tension, plot);
        let line = spline::to_path(&smoothed);

        if dataset.fill && pts.len() > 1 {
            let mut area = line.clone();
            let (first, last) = (pts[0], pts[pts.len() - 1]);
            area.line_to((last.0, base_y));
            area.line_to((first.0, base_y));
            area.close();
            canvas.draw_path(&area, &fill_paint(dataset.background_color));
        }
        if pts.len() > 1 {
            canvas.draw_path(&line, &stroke_paint(dataset.border_color, dataset.border_width));
        }

        let point_fill = fill_paint(dataset.point_background_color);
        let point_border = stroke_paint(dataset.point_border_color, dataset.point_border_width);
        for &(i, (x, y)) in &segment {
            let r = if hovered == Some(i) { dataset.point_hover_radius } else { dataset.point_radius };
            if r <= 0.0 {
                continue;
            }
            canvas.draw_circle((x, y), r, &point_fill);
            if dataset.point_border_width > 0.0 {
                canvas.draw_circle((x, y), r, &point_border);
            }
        }
    }
}

/// Runs of consecutive finite points; non-finite prices leave gaps.
fn segments(points: &[Option<(f32, f32)>]) -> Vec<Vec<(usize, (f32, f32))>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for (i, p) in points.iter().enumerate() {
        match p {
            Some(p) => current.push((i, *p)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn draw_legend(canvas: &skia::Canvas, layout: &Layout, dataset: &Dataset, opts: &RenderOptions, shaper: &TextShaper) {
    let size = opts.font_size;
    let text_w = shaper.measure_width(&dataset.label, size);
    let box_w = size * 3.0;
    let total = box_w + 8.0 + text_w;
    let left = layout.plot.center_x() - total * 0.5;
    let top = opts.insets.top as f32;
    let swatch = skia::Rect::from_xywh(left, top, box_w, size);
    canvas.draw_rect(swatch, &fill_paint(dataset.background_color));
    canvas.draw_rect(swatch, &stroke_paint(dataset.border_color, dataset.border_width));
    shaper.draw_left(canvas, &dataset.label, left + box_w + 8.0, top + size, size, opts.theme.tick_label);
}

fn draw_tooltip(canvas: &skia::Canvas, layout: &Layout, tip: &TooltipContent, opts: &RenderOptions, shaper: &TextShaper) {
    let size = opts.font_size;
    let pad = 6.0;
    let line_h = size * 1.3;
    let text_w = std::iter::once(&tip.title)
        .chain(tip.lines.iter())
        .map(|s| shaper.measure_width(s, size))
        .fold(0.0f32, f32::max);
    let box_w = text_w + pad * 2.0;
    let box_h = line_h * (1 + tip.lines.len()) as f32 + pad * 2.0;

    let (ax, ay) = tip.anchor;
    let mut left = ax + 10.0;
    if left + box_w > layout.width as f32 {
        left = ax - 10.0 - box_w;
    }
    let top = crate::geometry::clamp(ay - box_h * 0.5, 0.0, (layout.height as f32 - box_h).max(0.0));
    let rect = skia::Rect::from_xywh(left, top, box_w, box_h);
    canvas.draw_round_rect(rect, 6.0, 6.0, &fill_paint(opts.theme.tooltip_background));

    let mut baseline = top + pad + size;
    shaper.draw_left(canvas, &tip.title, left + pad, baseline, size, opts.theme.tooltip_text);
    for line in &tip.lines {
        baseline += line_h;
        shaper.draw_left(canvas, line, left + pad, baseline, size, opts.theme.tooltip_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_along_x_ignores_vertical_distance() {
        let pts = vec![Some((0.0, 0.0)), Some((10.0, 500.0)), None, Some((30.0, 0.0))];
        assert_eq!(nearest_point(&pts, (11.0, 0.0), InteractionAxis::X), Some(1));
        assert_eq!(nearest_point(&pts, (21.0, 0.0), InteractionAxis::X), Some(3));
        assert_eq!(nearest_point(&pts, (11.0, 0.0), InteractionAxis::Xy), Some(0));
        assert_eq!(nearest_point(&[None, None], (0.0, 0.0), InteractionAxis::X), None);
    }

    #[test]
    fn gaps_split_segments() {
        let pts = vec![Some((0.0, 0.0)), None, Some((2.0, 2.0)), Some((3.0, 3.0))];
        let segs = segments(&pts);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1][0].0, 2);
    }
}

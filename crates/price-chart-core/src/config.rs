// File: crates/price-chart-core/src/config.rs
// Summary: Line-chart configuration model handed to a chart engine, with Chart.js-shaped JSON export.

use serde::Serialize;

use crate::data::ChartData;
use crate::format::{format_price_tick, format_tooltip_label, series_label};
use crate::style::{self, Color};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

/// Full chart description. Plain data: two configs built from the same data compare equal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartDataConfig,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartDataConfig {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: Color,
    pub background_color: Color,
    pub border_width: f32,
    pub fill: bool,
    pub tension: f32,
    pub point_radius: f32,
    pub point_hover_radius: f32,
    pub point_background_color: Color,
    pub point_border_color: Color,
    pub point_border_width: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
    pub interaction: Interaction,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// All items at the same category index.
    Index,
    /// Item closest to the pointer.
    Nearest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAxis {
    X,
    Y,
    Xy,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub mode: InteractionMode,
    pub intersect: bool,
    pub callbacks: TooltipCallbacks,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipCallbacks {
    pub label: TooltipLabel,
}

/// Tooltip label callback. Serialized as a tagged description.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "callback", rename_all = "camelCase")]
pub enum TooltipLabel {
    /// `Precio: $<value:.2> <currency>`
    PriceWithCurrency { currency: String },
}

impl TooltipLabel {
    pub fn format(&self, value: f64) -> String {
        match self {
            TooltipLabel::PriceWithCurrency { currency } => format_tooltip_label(value, currency),
        }
    }
}

/// Tick label callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "callback", rename_all = "camelCase")]
pub enum TickCallback {
    /// Engine's own number formatting.
    Default,
    /// `$<value:.2>`
    Dollars,
}

impl TickCallback {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickCallback::Default => format!("{value}"),
            TickCallback::Dollars => format_price_tick(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scales {
    pub y: YScale,
    pub x: XScale,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YScale {
    pub begin_at_zero: bool,
    pub ticks: YTicks,
    pub grid: Grid,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YTicks {
    #[serde(flatten)]
    pub callback: TickCallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct XScale {
    pub ticks: XTicks,
    pub grid: Grid,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XTicks {
    pub max_rotation: f32,
    pub min_rotation: f32,
    pub max_ticks_limit: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interaction {
    pub mode: InteractionMode,
    pub axis: InteractionAxis,
    pub intersect: bool,
}

impl ChartConfig {
    /// Price-history line chart for `data`. Does not validate; see [`crate::data::validate`].
    pub fn price_history(data: &ChartData) -> Self {
        let dataset = Dataset {
            label: series_label(&data.currency),
            data: data.prices.clone(),
            border_color: style::PRIMARY_BLUE,
            background_color: style::PRIMARY_BLUE_FILL,
            border_width: style::BORDER_WIDTH,
            fill: true,
            tension: style::TENSION,
            point_radius: style::POINT_RADIUS,
            point_hover_radius: style::POINT_HOVER_RADIUS,
            point_background_color: style::PRIMARY_BLUE,
            point_border_color: style::WHITE,
            point_border_width: style::POINT_BORDER_WIDTH,
        };

        let options = ChartOptions {
            responsive: true,
            maintain_aspect_ratio: true,
            plugins: Plugins {
                legend: Legend { display: false },
                tooltip: Tooltip {
                    mode: InteractionMode::Index,
                    intersect: false,
                    callbacks: TooltipCallbacks {
                        label: TooltipLabel::PriceWithCurrency { currency: data.currency.clone() },
                    },
                },
            },
            scales: Scales {
                y: YScale {
                    begin_at_zero: false,
                    ticks: YTicks { callback: TickCallback::Dollars },
                    grid: Grid { display: true, color: Some(style::GRID_FAINT) },
                },
                x: XScale {
                    ticks: XTicks {
                        max_rotation: style::X_TICK_ROTATION,
                        min_rotation: style::X_TICK_ROTATION,
                        max_ticks_limit: style::X_MAX_TICKS,
                    },
                    grid: Grid { display: false, color: None },
                },
            },
            interaction: Interaction {
                mode: InteractionMode::Nearest,
                axis: InteractionAxis::X,
                intersect: false,
            },
        };

        Self {
            kind: ChartKind::Line,
            data: ChartDataConfig { labels: data.labels().to_vec(), datasets: vec![dataset] },
            options,
        }
    }

    /// The single series of a price chart.
    pub fn dataset(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_chartjs_keys() {
        let data = ChartData::new(vec!["2024-01-01".into()], vec![19.99], "USD");
        let v = ChartConfig::price_history(&data).to_json().unwrap();
        assert_eq!(v["type"], "line");
        assert_eq!(v["data"]["datasets"][0]["borderColor"], "#0d6efd");
        assert_eq!(v["data"]["datasets"][0]["backgroundColor"], "rgba(13, 110, 253, 0.1)");
        assert_eq!(v["data"]["datasets"][0]["pointBorderColor"], "#ffffff");
        assert_eq!(v["options"]["maintainAspectRatio"], true);
        assert_eq!(v["options"]["scales"]["y"]["beginAtZero"], false);
        assert_eq!(v["options"]["scales"]["y"]["grid"]["color"], "rgba(0, 0, 0, 0.05)");
        assert_eq!(v["options"]["scales"]["y"]["ticks"]["callback"], "dollars");
        assert_eq!(v["options"]["scales"]["x"]["ticks"]["maxTicksLimit"], 15);
        assert_eq!(v["options"]["scales"]["x"]["grid"]["display"], false);
        assert_eq!(v["options"]["interaction"]["mode"], "nearest");
        assert_eq!(v["options"]["plugins"]["tooltip"]["mode"], "index");
        assert_eq!(v["options"]["plugins"]["tooltip"]["callbacks"]["label"]["currency"], "USD");
    }
}

// File: crates/price-chart-demo/src/main.rs
// Summary: Demo loads a price history (JSON, CSV or Keepa payload) and renders it through the chart initializer.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use price_chart_core::{build_config, style, CanvasElement, ChartData, ChartInitializer, Document, RasterEngine, RenderOptions};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    /// Pick from the file extension and contents
    Auto,
    /// `{"labels": [...], "prices": [...], "currency": "USD"}`
    Json,
    /// Header row with `date` and `price` columns, optional `currency`
    Csv,
    /// Raw Keepa product object
    Keepa,
}

#[derive(Parser, Debug)]
#[command(name = "price-chart-demo")]
#[command(about = "Render a price-history line chart to PNG", long_about = None)]
struct Cli {
    /// Input file
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = InputFormat::Auto)]
    format: InputFormat,

    /// Id of the canvas the chart is mounted on
    #[arg(long, default_value = "priceChart")]
    canvas_id: String,

    /// Canvas (container) width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Canvas height, used only when the aspect ratio is not kept
    #[arg(long, default_value_t = 512)]
    height: u32,

    /// Directory receiving `<canvas-id>.png`
    #[arg(short, long, default_value = "target/out")]
    out_dir: PathBuf,

    /// Also write the chart configuration as JSON
    #[arg(long)]
    config_json: Option<PathBuf>,

    /// Simulate the pointer at this x pixel to draw the tooltip
    #[arg(long)]
    hover_x: Option<f32>,

    /// Theme preset (light, dark)
    #[arg(long, default_value = "light")]
    theme: String,

    /// Skip text rendering
    #[arg(long)]
    no_labels: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let data = load_chart_data(&cli.input, cli.format)
        .with_context(|| format!("failed to load chart data from '{}'", cli.input.display()))?;
    info!(points = data.point_count(), currency = %data.currency, "loaded price history");
    if data.labels().len() != data.prices.len() {
        info!(labels = data.labels().len(), prices = data.prices.len(), "labels and prices differ in length");
    }

    if let Some(path) = &cli.config_json {
        let json = build_config(&data).to_json_string_pretty()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    let canvas = CanvasElement::new(cli.canvas_id.clone(), cli.width, cli.height);
    let doc = Document::new().with_canvas(canvas);

    let mut opts = RenderOptions { theme: style::find(&cli.theme), draw_labels: !cli.no_labels, ..RenderOptions::default() };
    if let Some(x) = cli.hover_x {
        let height = cli.width as f32 / opts.aspect_ratio;
        opts.hover = Some((x, height * 0.5));
    }
    let engine = RasterEngine::new(opts).with_output_dir(&cli.out_dir);

    let mut init = ChartInitializer::new(&doc, engine);
    init.initialize(&cli.canvas_id, Some(&data));

    if init.engine().is_empty() {
        println!("Nothing rendered (see log output)");
    } else {
        println!("Wrote {}", cli.out_dir.join(format!("{}.png", cli.canvas_id)).display());
    }
    Ok(())
}

fn load_chart_data(path: &Path, format: InputFormat) -> Result<ChartData> {
    let format = match format {
        InputFormat::Auto => detect_format(path)?,
        other => other,
    };
    match format {
        InputFormat::Csv => load_csv(path),
        InputFormat::Json | InputFormat::Auto => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        InputFormat::Keepa => {
            let text = std::fs::read_to_string(path)?;
            let raw: serde_json::Value = serde_json::from_str(&text)?;
            Ok(ChartData::from_keepa_product(&raw))
        }
    }
}

/// `.csv` is CSV; JSON with a top-level `csv` array is a Keepa product.
fn detect_format(path: &Path) -> Result<InputFormat> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    if ext == "csv" {
        return Ok(InputFormat::Csv);
    }
    let text = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&text).context("input is neither CSV nor JSON")?;
    Ok(if value.get("csv").is_some_and(|v| v.is_array()) { InputFormat::Keepa } else { InputFormat::Json })
}

fn load_csv(path: &Path) -> Result<ChartData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));

    let i_label = idx(&["date", "label", "time", "timestamp"]).context("missing date column")?;
    let i_price = idx(&["price", "close", "value"]).context("missing price column")?;
    let i_currency = idx(&["currency"]);

    let mut labels = Vec::new();
    let mut prices = Vec::new();
    let mut currency = None;
    for rec in rdr.records() {
        let rec = rec?;
        let (Some(label), Some(price)) = (rec.get(i_label), rec.get(i_price)) else { continue };
        let Ok(price) = price.trim().parse::<f64>() else {
            tracing::warn!(row = ?rec.position().map(|p| p.line()), "skipping row with unparsable price");
            continue;
        };
        if currency.is_none() {
            currency = i_currency.and_then(|i| rec.get(i)).map(|c| c.trim().to_string()).filter(|c| !c.is_empty());
        }
        labels.push(label.trim().to_string());
        prices.push(price);
    }
    Ok(ChartData::new(labels, prices, currency.unwrap_or_else(|| "USD".to_string())))
}

// File: crates/price-chart-core/src/keepa.rs
// Summary: Builds ChartData from a Keepa product payload (buy-box price history).

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use crate::data::ChartData;

/// Index of the buy-box-with-shipping history inside a product's `csv` array.
pub const BUY_BOX_SHIPPING: usize = 18;
/// Keepa epoch (2011-12-21 00:00 UTC) in Unix milliseconds.
pub const KEEPA_EPOCH_MS: i64 = 1_324_339_200_000;
/// Most recent points kept for the chart.
pub const MAX_POINTS: usize = 90;
/// Keepa marks "no offer" with this price.
const NO_DATA: i64 = -1;

pub const CURRENCY: &str = "USD";

/// Convert Keepa minutes to a UTC timestamp. `None` when out of chrono's range.
pub fn keepa_minutes_to_datetime(minutes: i64) -> Option<DateTime<Utc>> {
    let epoch = Utc.timestamp_millis_opt(KEEPA_EPOCH_MS).single()?;
    let offset = Duration::try_minutes(minutes)?;
    epoch.checked_add_signed(offset)
}

impl ChartData {
    /// Extract the buy-box price history from a raw Keepa product object.
    ///
    /// The history is a flat `[minutes, cents, minutes, cents, ...]` array. Entries
    /// priced `-1` or `null`, non-numeric entries and a trailing unpaired value are
    /// skipped. Prices are converted from cents and rounded to two decimals, labels
    /// are `YYYY-MM-DD`, and only the last [`MAX_POINTS`] points are kept.
    /// Any structural problem yields [`ChartData::empty`] in USD.
    pub fn from_keepa_product(raw: &Value) -> ChartData {
        let Some(history) = buy_box_history(raw) else {
            debug!("Keepa payload has no buy-box history");
            return ChartData::empty(CURRENCY);
        };

        let mut labels = Vec::new();
        let mut prices = Vec::new();
        for pair in history.chunks_exact(2) {
            let Some(minutes) = as_integer(&pair[0]) else { continue };
            let Some(cents) = as_number(&pair[1]) else { continue };
            if cents == NO_DATA as f64 {
                continue;
            }
            let Some(when) = keepa_minutes_to_datetime(minutes) else { continue };
            labels.push(when.format("%Y-%m-%d").to_string());
            prices.push(round2(cents / 100.0));
        }

        if labels.len() > MAX_POINTS {
            let cut = labels.len() - MAX_POINTS;
            labels.drain(..cut);
            prices.drain(..cut);
        }
        debug!(points = prices.len(), "extracted Keepa price history");
        ChartData::new(labels, prices, CURRENCY)
    }
}

fn buy_box_history(raw: &Value) -> Option<&[Value]> {
    let csv = raw.get("csv")?.as_array()?;
    if csv.len() <= BUY_BOX_SHIPPING {
        return None;
    }
    let series = csv[BUY_BOX_SHIPPING].as_array()?;
    if series.is_empty() {
        return None;
    }
    Some(series.as_slice())
}

fn as_integer(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_f64().filter(|f| f.is_finite() && f.fract() == 0.0).map(|f| f as i64))
}

fn as_number(v: &Value) -> Option<f64> {
    v.as_f64()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// File: crates/price-chart-core/tests/keepa.rs
// Purpose: ChartData extraction from Keepa product payloads.

use price_chart_core::keepa::{BUY_BOX_SHIPPING, MAX_POINTS};
use price_chart_core::ChartData;
use serde_json::{json, Value};

fn product_with_history(history: Value) -> Value {
    let mut csv = vec![Value::Null; BUY_BOX_SHIPPING + 1];
    csv[BUY_BOX_SHIPPING] = history;
    json!({ "asin": "B000TEST", "csv": csv })
}

#[test]
fn converts_minutes_and_cents() {
    // day 0 and day 1 after the Keepa epoch
    let raw = product_with_history(json!([0, 1999, 1440, 2550]));
    let d = ChartData::from_keepa_product(&raw);
    assert_eq!(d.labels(), ["2011-12-21", "2011-12-22"]);
    assert_eq!(d.prices, vec![19.99, 25.5]);
    assert_eq!(d.currency, "USD");
    assert!(d.has_data);
}

#[test]
fn skips_missing_prices_and_unpaired_tail() {
    let raw = product_with_history(json!([0, -1, 1440, 1000, 2880, null, 4320, "n/a", 5760]));
    let d = ChartData::from_keepa_product(&raw);
    assert_eq!(d.labels(), ["2011-12-22"]);
    assert_eq!(d.prices, vec![10.0]);
}

#[test]
fn keeps_the_most_recent_points() {
    let flat: Vec<i64> = (0..120).flat_map(|day| [day * 1440, 1000 + day]).collect();
    let d = ChartData::from_keepa_product(&product_with_history(json!(flat)));
    assert_eq!(d.prices.len(), MAX_POINTS);
    assert_eq!(d.labels().len(), MAX_POINTS);
    assert_eq!(d.prices[0], 10.30); // day 30
    assert_eq!(*d.prices.last().unwrap(), 11.19); // day 119
}

#[test]
fn malformed_payloads_fall_back_to_empty_usd() {
    let cases = [
        json!({}),
        json!({ "csv": "nope" }),
        json!({ "csv": [[0, 100]] }),
        product_with_history(Value::Null),
        product_with_history(json!([])),
    ];
    for raw in cases {
        let d = ChartData::from_keepa_product(&raw);
        assert!(d.labels().is_empty(), "{raw}");
        assert!(d.prices.is_empty());
        assert_eq!(d.currency, "USD");
        assert!(!d.has_data);
    }
}

#[test]
fn all_missing_prices_yield_no_data() {
    let d = ChartData::from_keepa_product(&product_with_history(json!([0, -1, 1440, -1])));
    assert!(!d.has_data);
    assert!(d.labels().is_empty());
}

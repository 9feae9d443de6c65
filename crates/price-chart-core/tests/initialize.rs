// File: crates/price-chart-core/tests/initialize.rs
// Purpose: Initializer contract: surface lookup, data validation, delegation and diagnostics.

mod common;

use common::{at_level, capture, page, sample_data, RecordingEngine};
use price_chart_core::config::{ChartKind, InteractionAxis, InteractionMode, TickCallback, TooltipLabel};
use price_chart_core::{ChartData, ChartInitializer, InitError};
use tracing::Level;

#[test]
fn valid_input_submits_one_line_chart() {
    let doc = page();
    let data = sample_data("USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());

    let ((), events) = capture(|| init.initialize("priceChart", Some(&data)));

    let calls = &init.engine().calls;
    assert_eq!(calls.len(), 1);
    let (canvas, config) = &calls[0];
    assert_eq!(canvas.id, "priceChart");
    assert_eq!(config.kind, ChartKind::Line);
    assert_eq!(config.data.labels, data.labels().to_vec());
    assert_eq!(config.data.datasets.len(), 1);
    assert_eq!(config.data.datasets[0].data, data.prices);

    let infos = at_level(&events, Level::INFO);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].message, "Price chart initialized successfully");
    assert!(at_level(&events, Level::ERROR).is_empty());
    assert!(at_level(&events, Level::WARN).is_empty());
}

#[test]
fn missing_surface_logs_error_and_renders_nothing() {
    let doc = page();
    let data = sample_data("USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());

    let ((), events) = capture(|| init.initialize("noSuchCanvas", Some(&data)));

    assert!(init.engine().calls.is_empty());
    let errors = at_level(&events, Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("noSuchCanvas"));
    assert_eq!(errors[0].field("surface_id"), Some("noSuchCanvas"));
    assert!(at_level(&events, Level::INFO).is_empty());
}

#[test]
fn missing_surface_wins_over_missing_data() {
    let doc = page();
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    let err = init.try_initialize("noSuchCanvas", None).unwrap_err();
    assert!(matches!(err, InitError::MissingSurface(ref id) if id == "noSuchCanvas"));
}

#[test]
fn absent_or_empty_data_logs_warning() {
    let doc = page();
    let no_labels = ChartData { labels: None, prices: vec![1.0], currency: "USD".into(), has_data: true };
    let empty = ChartData::empty("USD");

    for data in [None, Some(&no_labels), Some(&empty)] {
        let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
        let ((), events) = capture(|| init.initialize("priceChart", data));

        assert!(init.engine().calls.is_empty());
        let warnings = at_level(&events, Level::WARN);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "No chart data available");
        assert!(at_level(&events, Level::INFO).is_empty());
    }
}

#[test]
fn empty_prices_with_labels_still_delegates() {
    // only labels are validated
    let doc = page();
    let data = ChartData { labels: Some(vec!["a".into()]), prices: vec![], currency: "USD".into(), has_data: false };
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    assert!(init.try_initialize("priceChart", Some(&data)).is_ok());
    assert!(init.engine().calls[0].1.data.datasets[0].data.is_empty());
}

#[test]
fn length_mismatch_is_passed_through_unchanged() {
    let doc = page();
    let data = ChartData::new(vec!["a".into(), "b".into(), "c".into()], vec![1.0], "USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    init.try_initialize("priceChart", Some(&data)).unwrap();
    let (_, config) = &init.engine().calls[0];
    assert_eq!(config.data.labels.len(), 3);
    assert_eq!(config.data.datasets[0].data, vec![1.0]);
}

#[test]
fn engine_failure_is_logged_not_raised() {
    let doc = page();
    let data = sample_data("USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine { reject: true, ..Default::default() });

    let ((), events) = capture(|| init.initialize("priceChart", Some(&data)));

    assert!(init.engine().calls.is_empty());
    assert_eq!(at_level(&events, Level::ERROR).len(), 1);
    assert!(at_level(&events, Level::INFO).is_empty());
    assert!(matches!(init.try_initialize("priceChart", Some(&data)), Err(InitError::Engine(_))));
}

#[test]
fn series_label_and_style_constants() {
    let doc = page();
    let data = sample_data("USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    init.try_initialize("priceChart", Some(&data)).unwrap();
    let (_, config) = &init.engine().calls[0];
    let ds = &config.data.datasets[0];

    assert_eq!(ds.label, "Precio (USD)");
    assert_eq!(ds.border_color.to_css(), "#0d6efd");
    assert_eq!(ds.background_color.to_css(), "rgba(13, 110, 253, 0.1)");
    assert_eq!(ds.border_width, 2.0);
    assert!(ds.fill);
    assert_eq!(ds.tension, 0.4);
    assert_eq!(ds.point_radius, 3.0);
    assert_eq!(ds.point_hover_radius, 6.0);
    assert_eq!(ds.point_border_color.to_css(), "#ffffff");

    let o = &config.options;
    assert!(o.responsive && o.maintain_aspect_ratio);
    assert!(!o.plugins.legend.display);
    assert_eq!(o.plugins.tooltip.mode, InteractionMode::Index);
    assert!(!o.plugins.tooltip.intersect);
    assert_eq!(o.plugins.tooltip.callbacks.label, TooltipLabel::PriceWithCurrency { currency: "USD".into() });
    assert!(!o.scales.y.begin_at_zero);
    assert_eq!(o.scales.y.ticks.callback, TickCallback::Dollars);
    assert_eq!(o.scales.y.grid.color.map(|c| c.to_css()).as_deref(), Some("rgba(0, 0, 0, 0.05)"));
    assert_eq!(o.scales.x.ticks.min_rotation, 45.0);
    assert_eq!(o.scales.x.ticks.max_rotation, 45.0);
    assert_eq!(o.scales.x.ticks.max_ticks_limit, 15);
    assert!(!o.scales.x.grid.display);
    assert_eq!(o.interaction.mode, InteractionMode::Nearest);
    assert_eq!(o.interaction.axis, InteractionAxis::X);
    assert!(!o.interaction.intersect);
}

#[test]
fn repeated_calls_differ_only_in_payload() {
    let doc = page();
    let first = sample_data("USD");
    let second = ChartData::new(vec!["x".into(), "y".into()], vec![5.0, 6.0], "USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    init.try_initialize("priceChart", Some(&first)).unwrap();
    init.try_initialize("otherChart", Some(&second)).unwrap();

    let calls = &init.engine().calls;
    let (a, b) = (&calls[0].1, &calls[1].1);
    assert_eq!(a.options, b.options);
    assert_eq!(a.kind, b.kind);

    let mut a_style = a.data.datasets[0].clone();
    let mut b_style = b.data.datasets[0].clone();
    assert_ne!(a_style.data, b_style.data);
    a_style.data.clear();
    b_style.data.clear();
    assert_eq!(a_style, b_style);

    let label = &a.options.plugins.tooltip.callbacks.label;
    assert_eq!(label.format(7.5), b.options.plugins.tooltip.callbacks.label.format(7.5));
}

#[test]
fn same_surface_twice_creates_two_charts() {
    let doc = page();
    let data = sample_data("USD");
    let mut init = ChartInitializer::new(&doc, RecordingEngine::default());
    init.initialize("priceChart", Some(&data));
    init.initialize("priceChart", Some(&data));
    assert_eq!(init.engine().calls.len(), 2);
    assert_eq!(init.engine().calls[0].1, init.engine().calls[1].1);
}

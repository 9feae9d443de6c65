use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use price_chart_core::{build_config, CanvasElement, ChartData, ChartInstance, RenderOptions};

fn history(n: usize) -> ChartData {
    let labels = (0..n).map(|i| format!("2024-{:02}-{:02}", 1 + (i / 28) % 12, 1 + i % 28)).collect();
    let prices = (0..n).map(|i| 20.0 + (i as f64 * 0.1).sin() * 3.0).collect();
    ChartData::new(labels, prices, "USD")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    for &n in &[90usize, 1_000usize] {
        group.bench_function(format!("points_{n}"), |b| {
            let chart = ChartInstance::new(CanvasElement::new("bench", 800, 400), build_config(&history(n)));
            let opts = RenderOptions { draw_labels: false, ..RenderOptions::default() };
            b.iter(|| -> Result<()> {
                let bytes = chart.render_to_png_bytes(&opts)?;
                black_box(bytes);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);

use std::time::Instant;

use crate::composer::compose;
use crate::highlight::highlight_for_display;
use crate::model::Filter;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn compose_and_highlight_p95_under_25ms() {
    let filters: Vec<Filter> = (0..500)
        .map(|i| match i % 4 {
            0 => Filter::Site {
                value: format!("host{i}.example.org"),
            },
            1 => Filter::Exact {
                value: format!("phrase number {i}"),
            },
            2 => Filter::Or {
                term1: format!("left{i}"),
                term2: format!("right{i}"),
            },
            _ => Filter::Exclude {
                value: format!("noise{i}"),
            },
        })
        .collect();

    for _ in 0..20 {
        let _ = highlight_for_display(&compose("warm   up", &filters));
    }

    let mut samples = Vec::with_capacity(100);
    for _ in 0..100 {
        let start = Instant::now();
        let query = compose("  latency   check ", &filters);
        let _ = highlight_for_display(&query).to_html();
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 25.0, "p95 too high: {p95:.3}ms (budget 25.0ms)");
}

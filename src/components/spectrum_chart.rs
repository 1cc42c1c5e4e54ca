use leptos::prelude::*;
use sonalyze_core::spectrum::SpectrumPoint;

/// Smallest visible bar, in percent of the chart height.
const MIN_BAR_PCT: f64 = 2.0;

/// Bar heights in percent, scaled between the smallest and largest
/// amplitude so negative (dB) spectra still render.
fn bar_heights(points: &[SpectrumPoint]) -> Vec<f64> {
    let min = points.iter().map(|p| p.amplitude).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.amplitude).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    points
        .iter()
        .map(|p| {
            if range > 0.0 {
                MIN_BAR_PCT + (p.amplitude - min) / range * (100.0 - MIN_BAR_PCT)
            } else {
                100.0
            }
        })
        .collect()
}

#[component]
pub fn SpectrumChart(points: Vec<SpectrumPoint>) -> impl IntoView {
    let heights = bar_heights(&points);
    let bars = points
        .into_iter()
        .zip(heights)
        .map(|(p, h)| {
            view! {
                <div
                    class="spectrum-bar"
                    style=format!("height: {h:.1}%")
                    title=format!("{}: {:.2}", p.frequency, p.amplitude)
                ></div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="spectrum-chart">{bars}</div>
    }
}

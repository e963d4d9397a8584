//! Small UI helpers: percentage labels, gauge ratios, clock labels, temp icons.

use chrono::{DateTime, Local};

pub fn pct_label(v: f32) -> String {
    format!("{:.0}%", v.clamp(0.0, 100.0))
}

/// Gauge ratio in 0..=1 for a 0..=100 percentage.
pub fn ratio(v: f32) -> f64 {
    (v as f64 / 100.0).clamp(0.0, 1.0)
}

pub fn time_label(t: DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}

pub fn temp_icon(t: f32) -> &'static str {
    if t < 50.0 {
        "😎"
    } else if t < 85.0 {
        "⚠️"
    } else {
        "🔥"
    }
}

//! Shared UI theme constants.

use ratatui::style::Color;
use sysmon_core::Metric;

pub const BORDER: Color = Color::LightBlue;
pub const LABEL: Color = Color::Blue;
pub const UNAVAILABLE: Color = Color::DarkGray;

pub fn metric_color(m: Metric) -> Color {
    match m {
        Metric::Cpu => Color::Cyan,
        Metric::Ram => Color::Magenta,
        Metric::Gpu => Color::Green,
        Metric::GpuVram => Color::LightMagenta,
    }
}

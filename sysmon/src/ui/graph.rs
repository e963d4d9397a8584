//! Rolling usage graphs: one braille line chart per metric, y fixed to 0..100.

use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};
use sysmon_core::{Metric, RollingSeries};

use crate::ui::theme;
use crate::ui::util::time_label;

pub fn graph_title(metric: Metric, series: &RollingSeries) -> String {
    match series.latest() {
        Some(v) => format!("{} (now: {:>5.1}%)", metric.label(), v),
        None => metric.label().to_string(),
    }
}

pub fn draw_usage_graph(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    metric: Metric,
    series: &RollingSeries,
    available: bool,
) {
    let color = if available {
        theme::metric_color(metric)
    } else {
        theme::UNAVAILABLE
    };
    let data: Vec<(f64, f64)> = series
        .values()
        .enumerate()
        .map(|(i, v)| (i as f64, v as f64))
        .collect();

    let span_of = |t: Option<chrono::DateTime<chrono::Local>>| {
        Span::raw(t.map(time_label).unwrap_or_else(|| "--:--:--".into()))
    };
    let x_axis = Axis::default()
        .title("Time")
        .style(Style::default().fg(theme::UNAVAILABLE))
        .bounds([0.0, series.capacity().saturating_sub(1) as f64])
        .labels(vec![span_of(series.oldest_at()), span_of(series.newest_at())]);
    let y_axis = Axis::default()
        .title("%")
        .style(Style::default().fg(theme::UNAVAILABLE))
        .bounds([0.0, 100.0])
        .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]);

    let chart = Chart::new(vec![Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data)])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(graph_title(metric, series)),
    )
    .x_axis(x_axis)
    .y_axis(y_axis);
    f.render_widget(chart, area);
}

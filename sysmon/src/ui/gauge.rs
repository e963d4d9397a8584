//! "<label> Usage" bars.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge},
};
use sysmon_core::{Metric, Snapshot};

use crate::ui::theme;
use crate::ui::util::{pct_label, ratio};

pub fn draw_usage_bar(f: &mut ratatui::Frame<'_>, area: Rect, metric: Metric, s: &Snapshot) {
    let title = format!("{} Usage", metric.label());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(title);

    // GPU bars keep their frame but drop the value when the query failed
    let g = if metric.is_gpu() && !s.gpu_available {
        Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(theme::UNAVAILABLE))
            .ratio(0.0)
            .label("unavailable")
    } else {
        let v = s.value(metric);
        Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(theme::metric_color(metric)))
            .ratio(ratio(v))
            .label(ratatui::text::Span::styled(
                pct_label(v),
                Style::default().add_modifier(Modifier::BOLD),
            ))
    };
    f.render_widget(g, area);
}

//! Top header with clock and GPU temperature indicator.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use sysmon_core::Snapshot;

use crate::ui::theme;
use crate::ui::util::{temp_icon, time_label};

pub fn header_title(s: &Snapshot) -> String {
    let temp = if s.gpu_available {
        format!("GPU Temp: {:.0}°C {}", s.gpu_temp_c, temp_icon(s.gpu_temp_c))
    } else {
        "GPU Temp: N/A".into()
    };
    format!(
        "sysmon | {} | {}  (press 'q' to quit)",
        time_label(s.timestamp),
        temp
    )
}

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, s: &Snapshot) {
    let block = Block::default()
        .title(header_title(s))
        .title_style(Style::default().fg(theme::LABEL).add_modifier(Modifier::BOLD))
        .borders(Borders::BOTTOM);
    f.render_widget(block, area);
}

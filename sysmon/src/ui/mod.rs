//! UI module root: the ratatui-backed `Renderer` and the screen layout.

pub mod gauge;
pub mod graph;
pub mod header;
pub mod theme;
pub mod util;

use std::io;

use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use sysmon_core::{Metric, Renderer, SeriesSet, Snapshot};

use gauge::draw_usage_bar;
use graph::draw_usage_graph;
use header::draw_header;

pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    type Error = io::Error;

    fn render(&mut self, snapshot: &Snapshot, series: &SeriesSet) -> io::Result<()> {
        self.terminal.draw(|f| draw(f, snapshot, series))?;
        Ok(())
    }
}

pub fn draw(f: &mut ratatui::Frame<'_>, snapshot: &Snapshot, series: &SeriesSet) {
    let area = f.area();

    // Root rows: header, four usage bars, graphs
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(area);

    draw_header(f, rows[0], snapshot);
    for (i, m) in Metric::ALL.into_iter().enumerate() {
        draw_usage_bar(f, rows[i + 1], m, snapshot);
    }

    // Graphs: 2x2, CPU/RAM on top, GPU/GPU memory below
    let grid = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(rows[5]);
    for (r, pair) in Metric::ALL.chunks(2).enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(grid[r]);
        for (c, &m) in pair.iter().enumerate() {
            let available = !m.is_gpu() || snapshot.gpu_available;
            draw_usage_graph(f, cols[c], m, series.get(m), available);
        }
    }
}

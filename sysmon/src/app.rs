//! App lifecycle: terminal setup/teardown, the input thread, and the sampling loop.

use std::{
    io,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sysmon_core::{Config, Sampler};
use tokio::sync::mpsc;
use tracing::warn;

use crate::ui::TerminalRenderer;

const INPUT_POLL: Duration = Duration::from_millis(100);

pub struct App {
    sampler: Sampler,
    tick: Duration,
}

impl App {
    pub fn new(cfg: &Config) -> Self {
        Self {
            sampler: Sampler::from_config(cfg),
            tick: cfg.tick,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        let mut renderer = TerminalRenderer::new(terminal);

        // Input lives on its own thread so 'q' is honoured while a tick waits on the GPU
        let (quit_tx, mut quit_rx) = mpsc::unbounded_channel();
        let stop = Arc::new(AtomicBool::new(false));
        spawn_input_thread(quit_tx, Arc::clone(&stop));

        let shutdown = async move {
            tokio::select! {
                _ = quit_rx.recv() => {}
                _ = tokio::signal::ctrl_c() => {}
            }
        };
        let res = self.sampler.run(self.tick, &mut renderer, shutdown).await;
        stop.store(true, Ordering::Relaxed);

        // Teardown
        disable_raw_mode()?;
        let terminal = renderer.terminal_mut();
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res?;
        Ok(())
    }
}

fn spawn_input_thread(quit: mpsc::UnboundedSender<()>, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(INPUT_POLL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(k)) if is_quit_key(&k) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("terminal input error: {e}");
                        break;
                    }
                },
                Err(e) => {
                    warn!("terminal input error: {e}");
                    break;
                }
            }
        }
        let _ = quit.send(());
    });
}

/// `q`, plus Ctrl-C since raw mode turns it into a key press.
fn is_quit_key(k: &KeyEvent) -> bool {
    if k.kind != KeyEventKind::Press {
        return false;
    }
    match k.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => k.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn q_quits() {
        assert!(is_quit_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&key(KeyCode::Char('Q'), KeyModifiers::SHIFT)));
        assert!(is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert!(!is_quit_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Char('x'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&key(KeyCode::Enter, KeyModifiers::NONE)));

        let mut release = key(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }
}

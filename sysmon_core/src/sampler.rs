//! Tick-driven sampler: polls every source, assembles a Snapshot, appends to
//! the rolling history and hands both to the renderer.

use std::future::Future;
use std::time::Duration;

use chrono::Local;
use futures::future::join_all;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::gpu::ExternalProcessSource;
use crate::history::SeriesSet;
use crate::metrics::{CounterSource, CPU_WARMUP};
use crate::render::Renderer;
use crate::source::MetricSource;
use crate::types::{Reading, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Idle,
    Sampling,
}

pub struct Sampler {
    sources: Vec<MetricSource>,
    series: SeriesSet,
    state: SamplerState,
    last: Option<Snapshot>,
    // None until the first GPU poll resolves
    gpu_up: Option<bool>,
}

impl Sampler {
    pub fn new(sources: Vec<MetricSource>) -> Self {
        Self {
            sources,
            series: SeriesSet::new(),
            state: SamplerState::Idle,
            last: None,
            gpu_up: None,
        }
    }

    /// CPU + RAM from sysinfo, plus the GPU query unless disabled.
    pub fn from_config(cfg: &Config) -> Self {
        let mut sources: Vec<MetricSource> =
            vec![CounterSource::cpu().into(), CounterSource::ram().into()];
        if cfg.gpu_enabled {
            sources.push(
                ExternalProcessSource::nvidia_smi(cfg.gpu_program.clone(), cfg.gpu_timeout).into(),
            );
        } else {
            info!("gpu source disabled");
        }
        Self::new(sources)
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last.as_ref()
    }

    /// Poll all sources and assemble a Snapshot without touching history.
    ///
    /// Sources are polled concurrently on the current task. A failed source
    /// contributes zeros; a failed or missing GPU source also clears
    /// `gpu_available`.
    pub async fn sample(&mut self) -> Snapshot {
        let results = join_all(self.sources.iter_mut().map(|s| s.poll())).await;

        let mut snap = Snapshot::empty(Local::now());
        let mut gpu_err = None;
        for (src, res) in self.sources.iter().zip(results) {
            match res {
                Ok(Reading::Cpu(v)) => snap.cpu_pct = v,
                Ok(Reading::Ram(v)) => snap.ram_pct = v,
                Ok(Reading::Gpu(g)) => {
                    snap.gpu_pct = g.util_pct.min(100) as f32;
                    snap.gpu_vram_pct = g.vram_pct.min(100) as f32;
                    snap.gpu_temp_c = g.temp_c as f32;
                    snap.gpu_available = true;
                }
                Err(e) => {
                    debug!(source = src.name(), "poll failed: {e}");
                    if matches!(src, MetricSource::External(_)) {
                        gpu_err = Some(e);
                    }
                }
            }
        }

        if self.has_gpu_source() {
            self.note_gpu(snap.gpu_available, gpu_err.map(|e| e.to_string()));
        }
        snap
    }

    /// One full tick. The renderer sees the history already including `snap`.
    /// A renderer error is returned as-is; the sampler is back to Idle either way.
    pub async fn tick<R: Renderer>(&mut self, renderer: &mut R) -> Result<Snapshot, R::Error> {
        self.state = SamplerState::Sampling;
        let snap = self.sample().await;
        self.series.push_snapshot(&snap);
        self.last = Some(snap);
        let res = renderer.render(&snap, &self.series);
        self.state = SamplerState::Idle;
        res.map(|()| snap)
    }

    /// Tick every `period` until `shutdown` resolves.
    ///
    /// The first tick waits `CPU_WARMUP` so the CPU reading spans a real
    /// interval since the source took its baseline.
    /// Timer fires that land while a tick is still running are skipped. On
    /// shutdown an in-flight tick is dropped before anything is pushed or
    /// rendered, which also kills a pending GPU query.
    pub async fn run<R, F>(
        &mut self,
        period: Duration,
        renderer: &mut R,
        shutdown: F,
    ) -> Result<(), R::Error>
    where
        R: Renderer,
        F: Future<Output = ()>,
    {
        let mut ticker = interval_at(Instant::now() + CPU_WARMUP, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);
        info!(?period, sources = self.sources.len(), "sampler started");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            let stopped = tokio::select! {
                biased;
                _ = &mut shutdown => true,
                res = self.tick(&mut *renderer) => {
                    res?;
                    false
                }
            };
            if stopped {
                break;
            }
        }

        self.state = SamplerState::Idle;
        info!("sampler stopped");
        Ok(())
    }

    fn has_gpu_source(&self) -> bool {
        self.sources
            .iter()
            .any(|s| matches!(s, MetricSource::External(_)))
    }

    fn note_gpu(&mut self, up: bool, err: Option<String>) {
        if self.gpu_up == Some(up) {
            return;
        }
        match (up, err) {
            (true, _) => info!("gpu metrics available"),
            (false, Some(e)) => warn!("gpu metrics unavailable: {e}"),
            (false, None) => warn!("gpu metrics unavailable"),
        }
        self.gpu_up = Some(up);
    }
}

//! Values produced by the sampler and handed to the renderer.

use chrono::{DateTime, Local};
use serde::Serialize;

/// One tick's worth of metrics. Never mutated after assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Local>,
    pub cpu_pct: f32,
    pub ram_pct: f32,
    pub gpu_pct: f32,
    pub gpu_vram_pct: f32,
    pub gpu_temp_c: f32,
    pub gpu_available: bool,
}

impl Snapshot {
    /// All-zero snapshot with the GPU marked unavailable.
    pub fn empty(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            cpu_pct: 0.0,
            ram_pct: 0.0,
            gpu_pct: 0.0,
            gpu_vram_pct: 0.0,
            gpu_temp_c: 0.0,
            gpu_available: false,
        }
    }

    pub fn value(&self, metric: Metric) -> f32 {
        match metric {
            Metric::Cpu => self.cpu_pct,
            Metric::Ram => self.ram_pct,
            Metric::Gpu => self.gpu_pct,
            Metric::GpuVram => self.gpu_vram_pct,
        }
    }
}

/// The metrics that keep a rolling history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Cpu,
    Ram,
    Gpu,
    GpuVram,
}

impl Metric {
    /// Display order.
    pub const ALL: [Metric; 4] = [Metric::Cpu, Metric::Ram, Metric::Gpu, Metric::GpuVram];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Cpu => "CPU",
            Metric::Ram => "RAM",
            Metric::Gpu => "GPU",
            Metric::GpuVram => "GPU Memory",
        }
    }

    pub fn is_gpu(self) -> bool {
        matches!(self, Metric::Gpu | Metric::GpuVram)
    }
}

/// Parsed result of one GPU query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuReading {
    pub temp_c: i32,
    pub util_pct: u32, // 0..100
    pub vram_pct: u32, // 0..100
}

/// What a successful poll yields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Cpu(f32),
    Ram(f32),
    Gpu(GpuReading),
}

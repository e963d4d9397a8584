//! Host CPU and memory counters.
//!
//! `CounterFacility` is the seam to the OS; the production facilities wrap
//! sysinfo. `CounterSource` clamps whatever the facility reports to 0..=100.

use std::panic::{catch_unwind, AssertUnwindSafe};

use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::error::SourceError;
use crate::types::Reading;

/// How long a fresh CPU source needs before its first reading means anything.
pub const CPU_WARMUP: std::time::Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

pub trait CounterFacility: Send {
    /// Raw percentage; may be out of range.
    fn read_percent(&mut self) -> Result<f32, SourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Cpu,
    Ram,
}

impl CounterKind {
    pub fn name(self) -> &'static str {
        match self {
            CounterKind::Cpu => "cpu",
            CounterKind::Ram => "ram",
        }
    }
}

/// Synchronous CPU/RAM source.
pub struct CounterSource {
    kind: CounterKind,
    facility: Box<dyn CounterFacility>,
}

impl CounterSource {
    pub fn new(kind: CounterKind, facility: Box<dyn CounterFacility>) -> Self {
        Self { kind, facility }
    }

    pub fn cpu() -> Self {
        Self::new(CounterKind::Cpu, Box::new(SysCpu::new()))
    }

    pub fn ram() -> Self {
        Self::new(CounterKind::Ram, Box::new(SysRam::new()))
    }

    pub fn kind(&self) -> CounterKind {
        self.kind
    }

    pub fn poll(&mut self) -> Result<Reading, SourceError> {
        let raw = self.facility.read_percent()?;
        if !raw.is_finite() {
            return Err(SourceError::Facility(format!(
                "{} reading is not a number: {raw}",
                self.kind.name()
            )));
        }
        let v = raw.clamp(0.0, 100.0);
        Ok(match self.kind {
            CounterKind::Cpu => Reading::Cpu(v),
            CounterKind::Ram => Reading::Ram(v),
        })
    }
}

fn refresh_guarded(what: &str, f: impl FnOnce()) -> Result<(), SourceError> {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return Err(SourceError::Unsupported);
    }
    catch_unwind(AssertUnwindSafe(f))
        .map_err(|e| SourceError::Facility(format!("sysinfo {what} refresh panicked: {e:?}")))
}

/// Global CPU usage since the previous refresh.
pub struct SysCpu {
    sys: System,
}

impl SysCpu {
    pub fn new() -> Self {
        // new_with_specifics takes the baseline sample the next refresh diffs against
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage()),
        );
        Self { sys }
    }
}

impl Default for SysCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterFacility for SysCpu {
    fn read_percent(&mut self) -> Result<f32, SourceError> {
        let sys = &mut self.sys;
        refresh_guarded("cpu", || sys.refresh_cpu_usage())?;
        Ok(self.sys.global_cpu_usage())
    }
}

/// Memory pressure as `(total - available) / total`.
pub struct SysRam {
    sys: System,
}

impl SysRam {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self { sys }
    }
}

impl Default for SysRam {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterFacility for SysRam {
    fn read_percent(&mut self) -> Result<f32, SourceError> {
        let sys = &mut self.sys;
        refresh_guarded("memory", || {
            sys.refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram())
        })?;
        let total = self.sys.total_memory();
        if total == 0 {
            return Err(SourceError::Facility("total memory reported as zero".into()));
        }
        let used = total.saturating_sub(self.sys.available_memory());
        Ok((used as f64 / total as f64 * 100.0) as f32)
    }
}

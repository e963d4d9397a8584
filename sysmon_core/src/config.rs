//! Start-up settings for the sampler. The binary builds these with `Default`.

use std::time::Duration;

use crate::gpu::DEFAULT_GPU_PROGRAM;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_GPU_TIMEOUT: Duration = Duration::from_millis(750);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tick: Duration,
    pub gpu_enabled: bool,
    pub gpu_program: String,
    pub gpu_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            gpu_enabled: true,
            gpu_program: DEFAULT_GPU_PROGRAM.to_string(),
            gpu_timeout: DEFAULT_GPU_TIMEOUT,
        }
    }
}

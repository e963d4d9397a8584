//! Sampling core for sysmon: metric sources, rolling history and the
//! tick-driven sampler that feeds a renderer.

pub mod config;
pub mod error;
pub mod gpu;
pub mod history;
pub mod metrics;
pub mod render;
pub mod sampler;
pub mod source;
pub mod types;

pub use config::Config;
pub use error::SourceError;
pub use history::{RollingSeries, SeriesSet, HISTORY_CAPACITY};
pub use render::Renderer;
pub use sampler::{Sampler, SamplerState};
pub use source::MetricSource;
pub use types::{GpuReading, Metric, Reading, Snapshot};

//! The single `poll()` capability shared by every metric source.

use crate::error::SourceError;
use crate::gpu::ExternalProcessSource;
use crate::metrics::CounterSource;
use crate::types::Reading;

pub enum MetricSource {
    Counter(CounterSource),
    External(ExternalProcessSource),
}

impl MetricSource {
    pub fn name(&self) -> &str {
        match self {
            MetricSource::Counter(c) => c.kind().name(),
            MetricSource::External(_) => "gpu",
        }
    }

    pub async fn poll(&mut self) -> Result<Reading, SourceError> {
        match self {
            MetricSource::Counter(c) => c.poll(),
            MetricSource::External(g) => g.poll().await.map(Reading::Gpu),
        }
    }
}

impl From<CounterSource> for MetricSource {
    fn from(c: CounterSource) -> Self {
        MetricSource::Counter(c)
    }
}

impl From<ExternalProcessSource> for MetricSource {
    fn from(g: ExternalProcessSource) -> Self {
        MetricSource::External(g)
    }
}

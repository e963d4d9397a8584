//! Contract between the sampler and whatever draws its output.

use crate::history::SeriesSet;
use crate::types::Snapshot;

/// Called at most once per completed tick. Receives shared borrows only and
/// must not keep them past the call.
pub trait Renderer {
    type Error;

    fn render(&mut self, snapshot: &Snapshot, series: &SeriesSet) -> Result<(), Self::Error>;
}

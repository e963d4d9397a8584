//! Bounded history buffers for the usage graphs.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::types::{Metric, Snapshot};

/// Samples kept per metric.
pub const HISTORY_CAPACITY: usize = 60;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    while dq.len() >= cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

/// Fixed-capacity FIFO of `(timestamp, value)` samples, oldest first.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    points: VecDeque<(DateTime<Local>, f32)>,
    cap: usize,
}

impl RollingSeries {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            points: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append a sample stamped with the current time.
    pub fn push(&mut self, value: f32) {
        self.push_at(Local::now(), value);
    }

    pub fn push_at(&mut self, at: DateTime<Local>, value: f32) {
        push_capped(&mut self.points, (at, value), self.cap);
    }

    /// Values in chronological order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = f32> + ExactSizeIterator + '_ {
        self.points.iter().map(|&(_, v)| v)
    }

    pub fn points(
        &self,
    ) -> impl DoubleEndedIterator<Item = (DateTime<Local>, f32)> + ExactSizeIterator + '_ {
        self.points.iter().copied()
    }

    pub fn latest(&self) -> Option<f32> {
        self.points.back().map(|&(_, v)| v)
    }

    pub fn oldest_at(&self) -> Option<DateTime<Local>> {
        self.points.front().map(|&(t, _)| t)
    }

    pub fn newest_at(&self) -> Option<DateTime<Local>> {
        self.points.back().map(|&(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

/// One series per tracked metric.
#[derive(Debug, Clone, Default)]
pub struct SeriesSet {
    cpu: RollingSeries,
    ram: RollingSeries,
    gpu: RollingSeries,
    gpu_vram: RollingSeries,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, metric: Metric) -> &RollingSeries {
        match metric {
            Metric::Cpu => &self.cpu,
            Metric::Ram => &self.ram,
            Metric::Gpu => &self.gpu,
            Metric::GpuVram => &self.gpu_vram,
        }
    }

    fn get_mut(&mut self, metric: Metric) -> &mut RollingSeries {
        match metric {
            Metric::Cpu => &mut self.cpu,
            Metric::Ram => &mut self.ram,
            Metric::Gpu => &mut self.gpu,
            Metric::GpuVram => &mut self.gpu_vram,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &RollingSeries)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Push every field of `snap` into its series, all stamped with the snapshot time.
    pub fn push_snapshot(&mut self, snap: &Snapshot) {
        for m in Metric::ALL {
            self.get_mut(m).push_at(snap.timestamp, snap.value(m));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn filled(n: usize) -> RollingSeries {
        let start = Local::now();
        let mut s = RollingSeries::default();
        for i in 0..n {
            s.push_at(start + Duration::seconds(i as i64), i as f32);
        }
        s
    }

    #[test]
    fn under_capacity_keeps_every_sample_in_order() {
        for n in [0, 1, 30, 59, 60] {
            let s = filled(n);
            assert_eq!(s.len(), n);
            let vals: Vec<f32> = s.values().collect();
            let want: Vec<f32> = (0..n).map(|i| i as f32).collect();
            assert_eq!(vals, want, "n={n}");
        }
    }

    #[test]
    fn over_capacity_evicts_oldest_first() {
        for n in [61, 75, 200] {
            let s = filled(n);
            assert_eq!(s.len(), HISTORY_CAPACITY);
            let vals: Vec<f32> = s.values().collect();
            let want: Vec<f32> = (n - HISTORY_CAPACITY..n).map(|i| i as f32).collect();
            assert_eq!(vals, want, "n={n}");
        }
    }

    #[test]
    fn timestamps_stay_chronological_after_eviction() {
        let s = filled(90);
        let ts: Vec<_> = s.points().map(|(t, _)| t).collect();
        assert!(ts.windows(2).all(|w| w[0] < w[1]));
        assert!(s.oldest_at() < s.newest_at());
    }

    #[test]
    fn push_uses_current_time() {
        let before = Local::now();
        let mut s = RollingSeries::new(3);
        s.push(12.5);
        assert_eq!(s.latest(), Some(12.5));
        assert!(s.newest_at().is_some_and(|t| t >= before));
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut s = RollingSeries::new(0);
        s.push(1.0);
        s.push(2.0);
        assert_eq!(s.capacity(), 1);
        assert_eq!(s.values().collect::<Vec<_>>(), vec![2.0]);
    }

    #[test]
    fn push_snapshot_grows_each_series_by_one() {
        let mut set = SeriesSet::new();
        let mut snap = Snapshot::empty(Local::now());
        snap.cpu_pct = 10.0;
        snap.gpu_vram_pct = 4.0;
        set.push_snapshot(&snap);
        for (_, s) in set.iter() {
            assert_eq!(s.len(), 1);
        }
        assert_eq!(set.get(Metric::Cpu).latest(), Some(10.0));
        assert_eq!(set.get(Metric::GpuVram).latest(), Some(4.0));
        assert_eq!(set.get(Metric::Gpu).newest_at(), Some(snap.timestamp));
    }
}

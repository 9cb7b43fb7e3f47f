use monitor_core::{MonitorError, Result, Sample};
use monitor_theme::Color;
use std::collections::VecDeque;

/// Filled area between a measured curve and an all-zero baseline.
///
/// Both curves always hold the same number of points with pairwise equal
/// x indices, ascending from front (oldest) to back (newest).
#[derive(Debug, Clone)]
pub struct AreaSeries {
    points:   VecDeque<Sample>,
    baseline: VecDeque<Sample>,
    pub color: Color,
    pub stroke_thickness: f32,
}

impl AreaSeries {
    pub fn new(color: Color) -> Self {
        Self {
            points:   VecDeque::new(),
            baseline: VecDeque::new(),
            color,
            stroke_thickness: 1.0,
        }
    }

    /// Append `(index, value)` to the measured curve and `(index, 0)` to the baseline.
    pub fn push(&mut self, index: u64, value: f64) {
        self.points.push_back(Sample::new(index, value));
        self.baseline.push_back(Sample::new(index, 0.0));
    }

    /// Drop the oldest point of both curves.
    pub fn evict_oldest(&mut self) -> Option<Sample> {
        self.baseline.pop_front();
        self.points.pop_front()
    }

    /// Evict oldest points until at most `limit` remain.  Returns how many were dropped.
    pub fn evict_beyond(&mut self, limit: usize) -> usize {
        let excess = self.points.len().saturating_sub(limit);
        for _ in 0..excess {
            self.evict_oldest();
        }
        excess
    }

    /// Verify the two curves are still index-aligned.
    pub fn check_aligned(&self) -> Result<()> {
        if self.points.len() != self.baseline.len() {
            return Err(MonitorError::Chart(format!(
                "curve lengths diverged: {} measured vs {} baseline",
                self.points.len(),
                self.baseline.len()
            )));
        }
        let ends = |c: &VecDeque<Sample>| (c.front().map(|s| s.index), c.back().map(|s| s.index));
        if ends(&self.points) != ends(&self.baseline) {
            return Err(MonitorError::Chart("curve x indices diverged".into()));
        }
        Ok(())
    }

    pub fn points(&self) -> &VecDeque<Sample> {
        &self.points
    }

    pub fn baseline(&self) -> &VecDeque<Sample> {
        &self.baseline
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

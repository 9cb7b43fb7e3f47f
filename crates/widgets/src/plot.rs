use crate::series::AreaSeries;
use monitor_theme::Color;

/// Lowest value of the usage axis.
pub const Y_MIN: f64 = 0.0;
/// Highest value of the usage axis.
pub const Y_MAX: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRange {
    /// Fit the data currently in the series.
    Auto,
    Fixed { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub position: AxisPosition,
    pub visible:  bool,
    pub range:    AxisRange,
}

/// Renderable chart: two hidden axes and one area series.
///
/// Renderers compare [`PlotModel::revision`] to decide whether to redraw.
#[derive(Debug, Clone)]
pub struct PlotModel {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: AreaSeries,
    revision:   u64,
}

impl PlotModel {
    pub fn new(color: Color) -> Self {
        Self {
            x_axis: Axis {
                position: AxisPosition::Bottom,
                visible:  false,
                range:    AxisRange::Auto,
            },
            y_axis: Axis {
                position: AxisPosition::Left,
                visible:  false,
                range:    AxisRange::Fixed { min: Y_MIN, max: Y_MAX },
            },
            series: AreaSeries::new(color),
            revision: 0,
        }
    }

    /// Mark the model dirty; returns the new revision.
    pub fn invalidate(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Visible x interval, or `None` while an auto-ranged axis has no data.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        match self.x_axis.range {
            AxisRange::Fixed { min, max } => Some((min, max)),
            AxisRange::Auto => {
                let points = self.series.points();
                let first = points.front()?.index as f64;
                let last = points.back()?.index as f64;
                Some((first, last))
            }
        }
    }

    /// Visible y interval.  An auto-ranged axis always includes the zero baseline.
    pub fn y_range(&self) -> (f64, f64) {
        match self.y_axis.range {
            AxisRange::Fixed { min, max } => (min, max),
            AxisRange::Auto => self
                .series
                .points()
                .iter()
                .fold((0.0_f64, 0.0_f64), |(lo, hi), p| (lo.min(p.value), hi.max(p.value))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_model_has_hidden_axes() {
        let plot = PlotModel::new(Color::BLUE);
        assert!(!plot.x_axis.visible);
        assert!(!plot.y_axis.visible);
        assert_eq!(plot.x_axis.position, AxisPosition::Bottom);
        assert_eq!(plot.y_axis.position, AxisPosition::Left);
        assert_eq!(plot.y_range(), (0.0, 100.0));
        assert_eq!(plot.x_range(), None);
        assert_eq!(plot.revision(), 0);
    }

    #[test]
    fn x_axis_follows_the_window() {
        let mut plot = PlotModel::new(Color::BLUE);
        for i in 0..5 {
            plot.series.push(i, 10.0);
        }
        plot.series.evict_oldest();
        assert_eq!(plot.x_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn auto_y_range_includes_baseline() {
        let mut plot = PlotModel::new(Color::BLUE);
        plot.y_axis.range = AxisRange::Auto;
        plot.series.push(0, 30.0);
        plot.series.push(1, 150.0);
        assert_eq!(plot.y_range(), (0.0, 150.0));
    }

    #[test]
    fn invalidate_bumps_revision() {
        let mut plot = PlotModel::new(Color::BLUE);
        assert_eq!(plot.invalidate(), 1);
        assert_eq!(plot.invalidate(), 2);
    }
}

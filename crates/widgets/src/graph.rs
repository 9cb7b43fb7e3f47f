use crate::plot::PlotModel;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{mouse, Point, Rectangle, Renderer, Size};
use monitor_core::Sample;
use monitor_theme::fill_of;

/// Canvas program drawing a [`PlotModel`] as a filled area chart.
#[derive(Debug, Clone, Copy)]
pub struct AreaGraph<'a> {
    plot: &'a PlotModel,
}

impl<'a> AreaGraph<'a> {
    pub fn new(plot: &'a PlotModel) -> Self {
        Self { plot }
    }
}

impl<Message> canvas::Program<Message> for AreaGraph<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let series = &self.plot.series;

        let upper = project(self.plot, series.points(), bounds.size());
        let lower = project(self.plot, series.baseline(), bounds.size());

        if let Some((&start, rest)) = upper.split_first() {
            let area = Path::new(|b| {
                b.move_to(start);
                for p in rest {
                    b.line_to(*p);
                }
                for p in lower.iter().rev() {
                    b.line_to(*p);
                }
                b.close();
            });
            frame.fill(&area, fill_of(series.color).to_iced());

            let line = Path::new(|b| {
                b.move_to(start);
                for p in rest {
                    b.line_to(*p);
                }
            });
            frame.stroke(
                &line,
                Stroke::default()
                    .with_color(series.color.to_iced())
                    .with_width(series.stroke_thickness),
            );
        }

        vec![frame.into_geometry()]
    }
}

/// Map curve samples into a `size` canvas using the plot's axis ranges.
///
/// Values outside the y range are clipped to the canvas edge; the model itself
/// keeps them unchanged.
pub fn project<'s>(
    plot: &PlotModel,
    curve: impl IntoIterator<Item = &'s Sample>,
    size: Size,
) -> Vec<Point> {
    let Some((x_min, x_max)) = plot.x_range() else {
        return Vec::new();
    };
    let (y_min, y_max) = plot.y_range();
    let x_span = (x_max - x_min).max(1.0);
    let y_span = (y_max - y_min).max(f64::EPSILON);

    curve
        .into_iter()
        .map(|s| {
            let x = (s.index as f64 - x_min) / x_span * f64::from(size.width);
            let y = ((s.value - y_min) / y_span).clamp(0.0, 1.0);
            Point::new(x as f32, size.height - y as f32 * size.height)
        })
        .collect()
}

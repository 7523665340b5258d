use crate::signal::PlotSeries;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f64,
    pub color: Color,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

/// Qualitative palette cycled through for overlaid recordings.
pub const PALETTE: [Color; 10] = [
    Color(0x1F77B4),
    Color(0xFF7F0E),
    Color(0x2CA02C),
    Color(0xD62728),
    Color(0x9467BD),
    Color(0x8C564B),
    Color(0xE377C2),
    Color(0x7F7F7F),
    Color(0xBCBD22),
    Color(0x17BECF),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

/// Data extent of a figure as `(min, max)` per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Figure {
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn with_axis_labels(mut self, x: Option<String>, y: Option<String>) -> Self {
        self.x.label = x;
        self.y.label = y;
        self
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Append a conditioned recording, colouring it by its position.
    pub fn add_plot_series(&mut self, plot: &PlotSeries) {
        let color = PALETTE[self.series.len() % PALETTE.len()];
        self.add_series(Series::Line(LineSeries {
            name: plot.label.clone(),
            points: plot.points().map(|(t, v)| [t, v]).collect(),
            style: Style {
                width: plot.line_width,
                color,
            },
        }));
    }

    /// Extent over all finite points; degenerate ranges are widened so the
    /// result can always be used as chart axes.
    pub fn bounds(&self) -> Bounds {
        let mut x = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y = (f64::INFINITY, f64::NEG_INFINITY);
        for series in &self.series {
            match series {
                Series::Line(line) => {
                    let finite = line
                        .points
                        .iter()
                        .filter(|p| p[0].is_finite() && p[1].is_finite());
                    for p in finite {
                        x = (x.0.min(p[0]), x.1.max(p[0]));
                        y = (y.0.min(p[1]), y.1.max(p[1]));
                    }
                }
            }
        }
        Bounds {
            x: widen(x),
            y: widen(y),
        }
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.05 };
        return (lo - pad, hi + pad);
    }
    (lo, hi)
}

pub trait PlotBackend {
    fn draw(&mut self, fig: &Figure) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot(label: &str, values: Vec<f64>) -> PlotSeries {
        PlotSeries::from_samples(values, 1.0, label, 1.5)
    }

    #[test]
    fn series_keep_input_order_and_cycle_colors() {
        let mut fig = Figure::new(None);
        for i in 0..12 {
            fig.add_plot_series(&plot(&format!("rec{}", i), vec![0.0, 1.0]));
        }
        let names: Vec<&str> = fig
            .series
            .iter()
            .map(|s| match s {
                Series::Line(line) => line.name.as_str(),
            })
            .collect();
        assert_eq!(names[0], "rec0");
        assert_eq!(names[11], "rec11");
        let Series::Line(first) = &fig.series[0];
        let Series::Line(eleventh) = &fig.series[10];
        assert_eq!(first.style.color, eleventh.style.color);
        assert_eq!(first.style.width, 1.5);
    }

    #[test]
    fn bounds_cover_all_series() {
        let mut fig = Figure::new(Some("overlay".into()));
        fig.add_plot_series(&plot("a", vec![0.0, 10.0, 20.0]));
        fig.add_plot_series(&plot("b", vec![-5.0, 3.0]));
        let bounds = fig.bounds();
        assert_eq!(bounds.x, (0.0, 2e6));
        assert_eq!(bounds.y, (-5.0, 20.0));
    }

    #[test]
    fn degenerate_bounds_are_widened() {
        let mut fig = Figure::new(None);
        assert_eq!(fig.bounds().x, (0.0, 1.0));
        fig.add_plot_series(&plot("flat", vec![0.0]));
        let bounds = fig.bounds();
        assert_eq!(bounds.x, (-1.0, 1.0));
        assert_eq!(bounds.y, (-1.0, 1.0));
    }

    #[test]
    fn color_splits_into_channels() {
        assert_eq!(Color(0x1F77B4).rgb(), (0x1F, 0x77, 0xB4));
    }
}

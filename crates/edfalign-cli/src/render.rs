use anyhow::Result;
use edfalign_lib::plot::{Figure, PlotBackend, Series};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Renders a [`Figure`] into a PNG file with the plotters bitmap backend.
pub struct PngBackend {
    path: PathBuf,
    size: (u32, u32),
}

impl PngBackend {
    pub fn new(path: &Path, size: (u32, u32)) -> Self {
        Self {
            path: path.to_path_buf(),
            size,
        }
    }
}

fn stroke_width(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

impl PlotBackend for PngBackend {
    fn draw(&mut self, fig: &Figure) -> Result<()> {
        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let bounds = fig.bounds();

        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(70);
        if let Some(title) = &fig.title {
            builder.caption(title, ("sans-serif", 24));
        }
        let mut chart =
            builder.build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)?;
        chart
            .configure_mesh()
            .x_desc(fig.x.label.clone().unwrap_or_default())
            .y_desc(fig.y.label.clone().unwrap_or_default())
            .light_line_style(RGBColor(235, 235, 235))
            .draw()?;

        for series in &fig.series {
            match series {
                Series::Line(line) => {
                    let (r, g, b) = line.style.color.rgb();
                    let color = RGBColor(r, g, b);
                    let style = color.stroke_width(stroke_width(line.style.width));
                    chart
                        .draw_series(LineSeries::new(
                            line.points.iter().map(|p| (p[0], p[1])),
                            style,
                        ))?
                        .label(line.name.clone())
                        .legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                }
            }
        }

        if !fig.series.is_empty() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }
        root.present()?;
        Ok(())
    }
}

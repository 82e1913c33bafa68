//! Rendering of the speed histogram with quantile markers.

use crate::analysis::quantiles::Quantile;
use crate::analysis::speed::SpeedHistogram;
use crate::plotting::error::PlotError;
use crate::plotting::fonts::ensure_font;
use crate::plotting::{title_size, BAR_FILL, FONT};
use crate::settings::PlotSettings;
use plotters::prelude::*;
use std::path::Path;

/// Headroom above the tallest bar.
const Y_MARGIN: f64 = 1.1;

/// How a quantile line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerStyle {
    SolidRed,
    DashedBlack,
}

/// First and last quantile are emphasised when `edge_emphasis` is on.
pub(crate) fn marker_style(index: usize, count: usize, edge_emphasis: bool) -> MarkerStyle {
    let is_edge = index == 0 || index + 1 == count;
    if edge_emphasis && is_edge {
        MarkerStyle::SolidRed
    } else {
        MarkerStyle::DashedBlack
    }
}

/// Labels such as `p5 = 3.21`.
fn quantile_label(quantile: &Quantile) -> String {
    format!("p{} = {:.2}", (quantile.probability * 100.0).round(), quantile.value)
}

/// Draws `histogram` to a PNG at `path`, with a vertical line per quantile.
///
/// `caption` is the chart title, `axis_label` the x axis description.
/// Quantiles outside the visible range (possible with capped binning) are
/// listed in the legend but have no line.
pub fn render_speed(
    path: &Path,
    caption: &str,
    axis_label: &str,
    histogram: &SpeedHistogram,
    quantiles: Option<&[Quantile]>,
    settings: &PlotSettings,
) -> Result<(), PlotError> {
    ensure_font(None)?;

    let (x_lo, x_hi) = histogram.x_range();
    let y_top = (histogram.max_count() as f64 * Y_MARGIN).max(1.0);

    let root = BitMapBackend::new(path, settings.speed_size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            caption,
            (FONT, title_size(settings.speed_size.0, caption).min(30.0)).into_font(),
        )
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_top)?;

    chart
        .configure_mesh()
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .x_desc(axis_label)
        .y_desc("Frequency")
        .axis_desc_style((FONT, 24))
        .draw()?;

    chart.draw_series(histogram.bins().iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BAR_FILL.filled(),
        )
    }))?;
    chart.draw_series(histogram.bins().iter().map(|bin| {
        Rectangle::new(
            [(bin.start, 0.0), (bin.end, bin.count as f64)],
            BLACK.stroke_width(1),
        )
    }))?;

    let Some(quantiles) = quantiles.filter(|q| !q.is_empty()) else {
        root.present()?;
        return Ok(());
    };

    for (i, quantile) in quantiles.iter().enumerate() {
        let x = quantile.value.clamp(x_lo, x_hi);
        let visible = x == quantile.value;
        let points = if visible {
            vec![(x, 0.0), (x, y_top)]
        } else {
            Vec::new()
        };
        let label = quantile_label(quantile);

        match marker_style(i, quantiles.len(), settings.edge_emphasis) {
            MarkerStyle::SolidRed => {
                chart
                    .draw_series(LineSeries::new(points, RED.stroke_width(2)))?
                    .label(label)
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2))
                    });
            }
            MarkerStyle::DashedBlack => {
                chart
                    .draw_series(DashedLineSeries::new(points, 10, 6, BLACK.stroke_width(2)))?
                    .label(label)
                    .legend(|(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2))
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 20))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

//! Rendering of the direction histogram, either as a wind rose or as bars.

use crate::analysis::direction::{bin_edges, DirectionHistogram, COMPASS_16, COMPASS_8};
use crate::plotting::error::PlotError;
use crate::plotting::fonts::ensure_font;
use crate::plotting::{nice_ceil, title_size, BAR_FILL, FONT, GRID};
use crate::settings::{DirectionStyle, PlotSettings};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

/// Concentric rings drawn on the rose.
const RINGS: usize = 4;
/// Line segments used to approximate the arc of one wedge.
const ARC_STEPS: usize = 12;
/// Pixels between the outer ring and the compass labels.
const LABEL_GAP: f64 = 30.0;

/// Pixel position of a compass angle (0° up, clockwise) at `radius` around `center`.
pub(crate) fn polar_to_pixel(center: (i32, i32), radius: f64, degrees: f64) -> (i32, i32) {
    let theta = degrees.to_radians();
    (
        center.0 + (radius * theta.sin()).round() as i32,
        center.1 - (radius * theta.cos()).round() as i32,
    )
}

/// Decimals needed to show multiples of `step` exactly, at most 3.
fn step_decimals(step: f64) -> usize {
    (0..3)
        .find(|&d| {
            let scaled = step * 10f64.powi(d as i32);
            (scaled - scaled.round()).abs() < 1e-9
        })
        .unwrap_or(3)
}

/// Ring label with the precision the ring `step` needs.
fn value_label(value: f64, step: f64, normalize: bool) -> String {
    let decimals = step_decimals(step);
    if normalize {
        format!("{:.*}%", decimals, value)
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Draws `histogram` to a PNG at `path`.
pub fn render_direction(
    path: &Path,
    title: &str,
    histogram: &DirectionHistogram,
    settings: &PlotSettings,
) -> Result<(), PlotError> {
    ensure_font(None)?;
    match settings.direction_style {
        DirectionStyle::Rose => render_rose(path, title, histogram, settings),
        DirectionStyle::Bar => render_bars(path, title, histogram, settings),
    }
}

fn render_rose(
    path: &Path,
    title: &str,
    histogram: &DirectionHistogram,
    settings: &PlotSettings,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, settings.direction_size).into_drawing_area();
    root.fill(&WHITE)?;
    let size = title_size(settings.direction_size.0, title);
    let root = root.titled(title, (FONT, size).into_font())?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = (f64::from(width.min(height)) / 2.0 - 2.0 * LABEL_GAP).max(10.0);

    let heights = histogram.heights(settings.normalize);
    let outer = nice_ceil(heights.iter().copied().fold(0.0, f64::max));

    // grid
    let step = outer / RINGS as f64;
    for ring in 1..=RINGS {
        let r = radius * ring as f64 / RINGS as f64;
        root.draw(&Circle::new(center, r.round() as i32, GRID.stroke_width(1)))?;
        let at = polar_to_pixel(center, r, 22.5);
        root.draw(&Text::new(
            value_label(step * ring as f64, step, settings.normalize),
            at,
            (FONT, 16).into_font().color(&BLACK.mix(0.6)),
        ))?;
    }
    let tick_style = TextStyle::from((FONT, 24).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
    for (i, name) in COMPASS_8.iter().enumerate() {
        let degrees = i as f64 * 45.0;
        root.draw(&PathElement::new(
            vec![center, polar_to_pixel(center, radius, degrees)],
            GRID.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            name.to_string(),
            polar_to_pixel(center, radius + LABEL_GAP, degrees),
            tick_style.clone(),
        ))?;
    }

    // wedges
    for (bin, value) in heights.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let r = radius * value / outer;
        let (start, end) = bin_edges(bin);
        let mut outline = Vec::with_capacity(ARC_STEPS + 3);
        outline.push(center);
        for step in 0..=ARC_STEPS {
            let degrees = start + (end - start) * step as f64 / ARC_STEPS as f64;
            outline.push(polar_to_pixel(center, r, degrees));
        }
        root.draw(&Polygon::new(outline.clone(), BAR_FILL.mix(0.7).filled()))?;
        outline.push(center);
        root.draw(&PathElement::new(outline, BLACK.stroke_width(1)))?;
    }

    root.present()?;
    Ok(())
}

fn compass_label(value: &SegmentValue<u32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => COMPASS_16
            .get(*i as usize)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

fn render_bars(
    path: &Path,
    title: &str,
    histogram: &DirectionHistogram,
    settings: &PlotSettings,
) -> Result<(), PlotError> {
    let heights = histogram.heights(settings.normalize);
    let y_top = nice_ceil(heights.iter().copied().fold(0.0, f64::max));

    let root = BitMapBackend::new(path, settings.direction_size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, title_size(settings.direction_size.0, title)).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..COMPASS_16.len() as u32).into_segmented(), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(COMPASS_16.len())
        .x_label_formatter(&compass_label)
        .x_desc("Direction")
        .y_desc(if settings.normalize {
            "Share of samples (%)"
        } else {
            "Count"
        })
        .axis_desc_style((FONT, 22))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BAR_FILL.mix(0.7).filled())
            .margin(4)
            .data(heights.iter().enumerate().map(|(i, h)| (i as u32, *h))),
    )?;

    root.present()?;
    Ok(())
}

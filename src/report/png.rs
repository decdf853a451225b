use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;

use crate::color::css::parse_color;
use crate::color::palette::Palette;
use crate::color::Rgb;
use crate::geo::{peak_ward, Bounds, WardCollection};

const LEGEND_W: u32 = 60;
const LEGEND_MARGIN: i32 = 16;
const LEGEND_STEPS: i32 = 100;

/// Render the wards as a filled choropleth with a vertical gradient legend.
pub fn render(
    wards: &WardCollection,
    palette: &Palette,
    size: (u32, u32),
    output_path: &Path,
) -> Result<()> {
    let bounds = wards
        .bounds()
        .context("No polygon geometry to draw")?
        .padded(0.05);

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (map_area, legend_area) = root.split_horizontally(size.0.saturating_sub(LEGEND_W) as i32);

    draw_wards(&map_area, wards, palette, &bounds)?;
    draw_legend(&legend_area, palette)?;

    root.present()
        .map_err(|e| anyhow!("{:?}", e))
        .with_context(|| format!("Failed to write PNG to {}", output_path.display()))?;

    println!("PNG map written to: {}", output_path.display());
    Ok(())
}

fn plot_color(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

fn draw_wards<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    wards: &WardCollection,
    palette: &Palette,
    bounds: &Bounds,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .build_cartesian_2d(bounds.min_lon..bounds.max_lon, bounds.min_lat..bounds.max_lat)
        .map_err(|e| anyhow!("{:?}", e))?;

    let peak = peak_ward(wards.wards()).map(|w| w.name.as_str());

    for feature in &wards.features {
        let ward = &feature.properties;
        let is_peak = Some(ward.name.as_str()) == peak;

        let fill = ward
            .precomputed_color()
            .and_then(|c| parse_color(c).ok())
            .unwrap_or_else(|| palette.color_at(ward.flood_probability));
        let fill_opacity = if is_peak { 0.8 } else { 0.7 };
        let (stroke, stroke_width) = if is_peak {
            (RGBColor(255, 0, 0), 3)
        } else {
            (BLACK, 1)
        };

        for ring in feature.rings() {
            if ring.len() < 3 {
                continue;
            }
            chart
                .draw_series(std::iter::once(Polygon::new(
                    ring.clone(),
                    plot_color(fill).mix(fill_opacity).filled(),
                )))
                .map_err(|e| anyhow!("{:?}", e))?;

            let mut outline = ring;
            if outline.first() != outline.last() {
                if let Some(first) = outline.first().copied() {
                    outline.push(first);
                }
            }
            chart
                .draw_series(std::iter::once(PathElement::new(
                    outline,
                    stroke.stroke_width(stroke_width),
                )))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    palette: &Palette,
) -> Result<()> {
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    let top = LEGEND_MARGIN;
    let bottom = h - LEGEND_MARGIN;
    let left = LEGEND_MARGIN;
    let right = (w - LEGEND_MARGIN).max(left + 1);
    let step_h = ((bottom - top) as f64 / LEGEND_STEPS as f64).max(1.0);

    // low risk at the bottom, as on the dashboard
    for i in 0..LEGEND_STEPS {
        let probability = 100.0 * i as f64 / (LEGEND_STEPS - 1) as f64;
        let y1 = bottom - (step_h * (i + 1) as f64).round() as i32;
        let y0 = bottom - (step_h * i as f64).round() as i32;
        area.draw(&Rectangle::new(
            [(left, y1), (right, y0)],
            plot_color(palette.color_at(probability)).filled(),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }

    area.draw(&Rectangle::new(
        [(left, top), (right, bottom)],
        BLACK.stroke_width(1),
    ))
    .map_err(|e| anyhow!("{:?}", e))?;

    Ok(())
}

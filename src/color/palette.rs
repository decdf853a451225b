use thiserror::Error;

use super::Rgb;

/// One stop of the gradient: a fraction in `[0, 1]` and its color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub threshold: f64,
    pub color: Rgb,
}

impl ControlPoint {
    pub const fn new(threshold: f64, color: Rgb) -> Self {
        Self { threshold, color }
    }
}

/// Green → dark red flood-risk gradient used by the map and its legend.
pub const FLOOD_RISK_STOPS: [ControlPoint; 6] = [
    ControlPoint::new(0.00, Rgb::new(0, 128, 0)),    // green
    ControlPoint::new(0.25, Rgb::new(173, 255, 47)), // green-yellow
    ControlPoint::new(0.45, Rgb::new(255, 255, 0)),  // yellow
    ControlPoint::new(0.65, Rgb::new(255, 165, 0)),  // orange
    ControlPoint::new(0.85, Rgb::new(255, 69, 0)),   // orange-red
    ControlPoint::new(1.00, Rgb::new(139, 0, 0)),    // dark red
];

#[derive(Debug, Error, PartialEq)]
pub enum PaletteError {
    #[error("a palette needs at least two control points, got {0}")]
    TooFewPoints(usize),

    #[error("palette must start at 0.0 and end at 1.0 (got {first}..{last})")]
    NotSpanning { first: f64, last: f64 },

    #[error("control point thresholds must be strictly ascending (at index {0})")]
    NotAscending(usize),
}

/// A validated, ascending set of control points spanning `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    points: Vec<ControlPoint>,
}

impl Palette {
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, PaletteError> {
        if points.len() < 2 {
            return Err(PaletteError::TooFewPoints(points.len()));
        }

        let first = points[0].threshold;
        let last = points[points.len() - 1].threshold;
        if first != 0.0 || last != 1.0 {
            return Err(PaletteError::NotSpanning { first, last });
        }

        if let Some(i) = points
            .windows(2)
            .position(|w| !(w[0].threshold < w[1].threshold))
        {
            return Err(PaletteError::NotAscending(i + 1));
        }

        Ok(Self { points })
    }

    pub fn flood_risk() -> Self {
        Self {
            points: FLOOD_RISK_STOPS.to_vec(),
        }
    }

    pub fn stops(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Color for a probability in `[0, 100]`.
    pub fn color_at(&self, probability: f64) -> Rgb {
        interpolate(&self.points, probability)
    }

    /// Same as [`Palette::color_at`], rendered as `rgb(r,g,b)`.
    pub fn css_color(&self, probability: f64) -> String {
        self.color_at(probability).to_string()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::flood_risk()
    }
}

/// Piecewise-linear interpolation over `points`.
///
/// `points` must be ascending and span `[0, 1]`. Values outside the range clamp
/// to the end colors; NaN is treated as 0.
fn interpolate(points: &[ControlPoint], probability: f64) -> Rgb {
    let first = points[0];
    let last = points[points.len() - 1];

    let f = if probability.is_nan() {
        0.0
    } else {
        probability / 100.0
    };

    if f <= first.threshold {
        return first.color;
    }
    if f >= last.threshold {
        return last.color;
    }

    // f > first.threshold, so the first stop at or above f has a predecessor.
    let upper = points
        .iter()
        .position(|p| p.threshold >= f)
        .unwrap_or(points.len() - 1);
    let a = points[upper - 1];
    let b = points[upper];

    let t = (f - a.threshold) / (b.threshold - a.threshold);

    Rgb::new(
        lerp_channel(a.color.r, b.color.r, t),
        lerp_channel(a.color.g, b.color.g, t),
        lerp_channel(a.color.b, b.color.b, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + t * (b - a)).round().clamp(0.0, 255.0) as u8
}

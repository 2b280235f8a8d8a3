//! Parametric polygon sampling and 2D rotation.

use std::f64::consts::PI;

use crate::value::format_number;

const DEG: f64 = PI / 180.0;

/// Sampling parameters for [`polygon`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOptions {
    /// Number of sample points.
    pub split: usize,
    /// Uniform scale applied around the center.
    pub scale: f64,
    /// Start angle in degrees.
    pub start: f64,
    /// Angular step in degrees. Defaults to a full turn divided by `split`.
    pub deg: Option<f64>,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            split: 120,
            scale: 1.0,
            start: 0.0,
            deg: None,
        }
    }
}

impl PolygonOptions {
    /// Options with `split` sample points.
    pub fn split(split: usize) -> Self {
        Self {
            split,
            ..Self::default()
        }
    }

    /// Set the start angle in degrees (builder).
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Set the angular step in degrees (builder).
    pub fn with_deg(mut self, deg: f64) -> Self {
        self.deg = Some(deg);
        self
    }

    /// Set the scale factor (builder).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// The unit circle, the default curve.
pub fn unit_circle(t: f64) -> (f64, f64) {
    (t.cos(), t.sin())
}

/// Sample `curve` and emit a CSS `polygon(...)` expression.
///
/// Each `(x, y)` in roughly `[-1, 1]²` maps to `(x·50·scale + 50)%
/// (y·50·scale + 50)%`.
pub fn polygon(options: &PolygonOptions, curve: impl Fn(f64) -> (f64, f64)) -> String {
    let split = options.split.max(1);
    let start = DEG * options.start;
    let step = match options.deg {
        Some(deg) => deg * DEG,
        None => PI / (split as f64 / 2.0),
    };

    let points: Vec<String> = (0..split)
        .map(|i| {
            let (x, y) = curve(start + step * i as f64);
            format!(
                "{}% {}%",
                format_number(x * 50.0 * options.scale + 50.0),
                format_number(y * 50.0 * options.scale + 50.0)
            )
        })
        .collect();

    format!("polygon({})", points.join(","))
}

/// Rotate `(x, y)` by `deg` degrees.
pub fn rotate(x: f64, y: f64, deg: f64) -> (f64, f64) {
    let rad = DEG * deg;
    let (sin, cos) = rad.sin_cos();
    (x * cos - y * sin, y * cos + x * sin)
}

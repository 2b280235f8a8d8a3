//! The named shape definitions.

use std::f64::consts::{PI, SQRT_2};

use super::polygon::{polygon, rotate, unit_circle, PolygonOptions};

pub fn circle() -> String {
    "circle(49%)".to_owned()
}

pub fn triangle() -> String {
    polygon(&PolygonOptions::split(3).with_start(-90.0), |t| {
        (t.cos() * 1.1, t.sin() * 1.1 + 0.2)
    })
}

pub fn rhombus() -> String {
    polygon(&PolygonOptions::split(4), unit_circle)
}

pub fn pentagon() -> String {
    polygon(&PolygonOptions::split(5).with_start(54.0), unit_circle)
}

pub fn hexagon() -> String {
    polygon(&PolygonOptions::split(6).with_start(30.0), unit_circle)
}

pub fn heptagon() -> String {
    polygon(&PolygonOptions::split(7).with_start(-90.0), unit_circle)
}

pub fn octagon() -> String {
    polygon(&PolygonOptions::split(8).with_start(22.5), unit_circle)
}

pub fn star() -> String {
    polygon(
        &PolygonOptions::split(5).with_start(54.0).with_deg(144.0),
        unit_circle,
    )
}

pub fn diamond() -> String {
    "polygon(50% 5%, 80% 50%, 50% 95%, 20% 50%)".to_owned()
}

pub fn cross() -> String {
    concat!(
        "polygon(5% 35%, 35% 35%, 35% 5%, 65% 5%, ",
        "65% 35%, 95% 35%, 95% 65%, 65% 65%, ",
        "65% 95%, 35% 95%, 35% 65%, 5% 65%)"
    )
    .to_owned()
}

/// Rose curve with `k` petals, clamped to 3..=5; 4 petals uses `k = 2`.
pub fn clover(k: Option<f64>) -> String {
    let mut k = k.unwrap_or(3.0).clamp(3.0, 5.0);
    if k == 4.0 {
        k = 2.0;
    }
    polygon(&PolygonOptions::split(240), |t| {
        let mut x = (k * t).cos() * t.cos();
        let mut y = (k * t).cos() * t.sin();
        if k == 3.0 {
            x -= 0.2;
        }
        if k == 2.0 {
            x /= 1.1;
            y /= 1.1;
        }
        (x, y)
    })
}

/// Hypocycloid with `k` cusps, clamped to 3..=6.
pub fn hypocycloid(k: Option<f64>) -> String {
    let k = k.unwrap_or(3.0).clamp(3.0, 6.0);
    let m = 1.0 - k;
    polygon(&PolygonOptions::default().with_scale(1.0 / k), |t| {
        let mut x = m * t.cos() + (m * (t - PI)).cos();
        let mut y = m * t.sin() + (m * (t - PI)).sin();
        if k == 3.0 {
            x = x * 1.1 - 0.6;
            y *= 1.1;
        }
        (x, y)
    })
}

pub fn astroid() -> String {
    hypocycloid(Some(4.0))
}

pub fn infinity() -> String {
    polygon(&PolygonOptions::default(), |t| {
        let a = 0.7 * SQRT_2 * t.cos();
        let b = t.sin().powi(2) + 1.0;
        (a / b, a * t.sin() / b)
    })
}

pub fn heart() -> String {
    polygon(&PolygonOptions::default(), |t| {
        let x = 0.75 * t.sin().powi(3);
        let y = t.cos() * (13.0 / 18.0)
            - (2.0 * t).cos() * (5.0 / 18.0)
            - (3.0 * t).cos() / 18.0
            - (4.0 * t).cos() / 18.0;
        rotate(x * 1.2, (y + 0.2) * 1.1, 180.0)
    })
}

pub fn bean() -> String {
    polygon(&PolygonOptions::default(), |t| {
        let r = t.sin().powi(3) + t.cos().powi(3);
        rotate(
            r * t.cos() * 1.3 - 0.45,
            r * t.sin() * 1.3 - 0.45,
            -90.0,
        )
    })
}

pub fn bicorn() -> String {
    polygon(&PolygonOptions::default(), |t| {
        rotate(t.cos(), t.sin().powi(2) / (2.0 + t.sin()) - 0.5, 180.0)
    })
}

pub fn pear() -> String {
    polygon(&PolygonOptions::default(), |t| {
        (t.sin(), (1.0 + t.sin()) * t.cos() / 1.4)
    })
}

pub fn fish() -> String {
    polygon(&PolygonOptions::default(), |t| {
        (t.cos() - t.sin().powi(2) / SQRT_2, (2.0 * t).sin() / 2.0)
    })
}

pub fn whale() -> String {
    polygon(&PolygonOptions::split(240), |t| {
        let r = 3.4 * (t.sin().powi(2) - 0.5) * t.cos();
        rotate(t.cos() * r + 0.75, t.sin() * r * 1.2, 180.0)
    })
}

/// Bud with `n` lobes, clamped to 3..=10.
pub fn bud(n: Option<f64>) -> String {
    let n = n.unwrap_or(3.0).clamp(3.0, 10.0);
    polygon(&PolygonOptions::split(240), |t| {
        let r = 1.0 + 0.2 * (n * t).cos();
        (r * t.cos() * 0.8, r * t.sin() * 0.8)
    })
}

//! Numeric library wrappers: `@PI()`, `@sin(x)`, `@max(a, b, c)`, ...
//!
//! These ignore the cell coordinates. Every argument must coerce to a number,
//! either directly or as arithmetic such as `2*8` or `3 + 1`; otherwise the
//! call contributes nothing.

use std::f64::consts;

use ::rand::Rng;

use super::{bound, Registry};
use crate::grid::Coords;
use crate::value::{expr, Value};

const CONSTANTS: [(&str, f64); 8] = [
    ("E", consts::E),
    ("LN10", consts::LN_10),
    ("LN2", consts::LN_2),
    ("LOG10E", consts::LOG10_E),
    ("LOG2E", consts::LOG2_E),
    ("PI", consts::PI),
    ("SQRT1_2", consts::FRAC_1_SQRT_2),
    ("SQRT2", consts::SQRT_2),
];

const UNARY: [(&str, fn(f64) -> f64); 28] = [
    ("abs", f64::abs),
    ("acos", f64::acos),
    ("acosh", f64::acosh),
    ("asin", f64::asin),
    ("asinh", f64::asinh),
    ("atan", f64::atan),
    ("atanh", f64::atanh),
    ("cbrt", f64::cbrt),
    ("ceil", f64::ceil),
    ("clz32", clz32),
    ("cos", f64::cos),
    ("cosh", f64::cosh),
    ("exp", f64::exp),
    ("expm1", f64::exp_m1),
    ("floor", f64::floor),
    ("fround", fround),
    ("log", f64::ln),
    ("log10", f64::log10),
    ("log1p", f64::ln_1p),
    ("log2", f64::log2),
    ("round", round),
    ("sign", sign),
    ("sin", f64::sin),
    ("sinh", f64::sinh),
    ("sqrt", f64::sqrt),
    ("tan", f64::tan),
    ("tanh", f64::tanh),
    ("trunc", f64::trunc),
];

const BINARY: [(&str, fn(f64, f64) -> f64); 3] = [
    ("atan2", f64::atan2),
    ("pow", f64::powf),
    ("imul", imul),
];

const VARIADIC: [(&str, fn(&[f64]) -> f64); 3] = [("hypot", hypot), ("max", max), ("min", min)];

pub(crate) fn register(registry: &mut Registry) {
    for (name, value) in CONSTANTS {
        registry.register_math(name, move |_: Coords| {
            bound(move |_, _| Some(Value::Number(value)))
        });
    }

    for (name, f) in UNARY {
        registry.register_math(name, move |_: Coords| {
            bound(move |args, _| {
                let [x] = numbers::<1>(name, args)?;
                Some(Value::Number(f(x)))
            })
        });
    }

    for (name, f) in BINARY {
        registry.register_math(name, move |_: Coords| {
            bound(move |args, _| {
                let [a, b] = numbers::<2>(name, args)?;
                Some(Value::Number(f(a, b)))
            })
        });
    }

    for (name, f) in VARIADIC {
        registry.register_math(name, move |_: Coords| {
            bound(move |args, _| {
                let xs = all_numbers(name, args)?;
                Some(Value::Number(f(&xs)))
            })
        });
    }

    registry.register_math("random", |_: Coords| {
        bound(|_, scope| Some(Value::Number(scope.rng.gen::<f64>())))
    });
}

/// The first `N` arguments as numbers.
fn numbers<const N: usize>(name: &str, args: &[Value]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        match args.get(i).and_then(number) {
            Some(n) => *slot = n,
            None => {
                tracing::debug!(function = name, argument = i, "non-numeric math argument");
                return None;
            }
        }
    }
    Some(out)
}

/// Coerce one argument, evaluating text as arithmetic.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Text(text) => expr::evaluate(text),
        _ => value.as_number(),
    }
}

fn all_numbers(name: &str, args: &[Value]) -> Option<Vec<f64>> {
    let xs: Option<Vec<f64>> = args.iter().map(number).collect();
    if xs.is_none() {
        tracing::debug!(function = name, "non-numeric math argument");
    }
    xs
}

/// Rounds half toward positive infinity.
fn round(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// `-1`, `0` or `1`; NaN stays NaN.
fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 {
        x
    } else {
        x.signum()
    }
}

fn fround(x: f64) -> f64 {
    f64::from(x as f32)
}

fn to_uint32(x: f64) -> u32 {
    if x.is_finite() {
        x.trunc().rem_euclid(4_294_967_296.0) as u32
    } else {
        0
    }
}

fn clz32(x: f64) -> f64 {
    f64::from(to_uint32(x).leading_zeros())
}

fn imul(a: f64, b: f64) -> f64 {
    let product = (to_uint32(a) as i32).wrapping_mul(to_uint32(b) as i32);
    f64::from(product)
}

fn hypot(xs: &[f64]) -> f64 {
    xs.iter().map(|x| x * x).sum::<f64>().sqrt()
}

fn max(xs: &[f64]) -> f64 {
    if xs.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min(xs: &[f64]) -> f64 {
    if xs.iter().any(|x| x.is_nan()) {
        return f64::NAN;
    }
    xs.iter().copied().fold(f64::INFINITY, f64::min)
}

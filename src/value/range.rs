//! Numeric range expansion behind `@rand(...)`.

use super::{format_number, Unit, Value};

/// Upper bound on the number of elements a single range may expand to.
pub const MAX_RANGE_LEN: usize = 1000;

/// Default start/step for a bound: `0.1` for values strictly between 0 and 1,
/// `1` otherwise.
fn initial(n: f64) -> f64 {
    if n > 0.0 && n < 1.0 {
        0.1
    } else {
        1.0
    }
}

/// Expand 1, 2 or 3 numbers into a list.
///
/// - `[stop]`: from `initial(stop)` up to `stop`
/// - `[start, stop]`: `[start, stop)` with the default step
/// - `[start, stop, step]`: `[start, stop)` by `step` (negative steps count down)
///
/// Any other arity, a zero step, or non-finite input yields an empty list.
pub fn range(args: &[f64]) -> Vec<f64> {
    let (start, stop, step) = match *args {
        [stop] => {
            let start = initial(stop);
            (start, stop, initial(start))
        }
        [start, stop] => (start, stop, initial(start)),
        [start, stop, step, ..] => (start, stop, step),
        [] => return Vec::new(),
    };

    if !(start.is_finite() && stop.is_finite() && step.is_finite()) || step == 0.0 {
        return Vec::new();
    }

    let mut values = Vec::new();
    for i in 0..MAX_RANGE_LEN {
        // Multiply instead of accumulating so 0.1 steps don't drift.
        let value = round_noise(start + step * i as f64);
        let in_range = if step > 0.0 { value < stop } else { value > stop };
        if !in_range {
            break;
        }
        values.push(value);
    }
    values
}

/// Trim floating-point noise such as `0.30000000000000004`.
fn round_noise(n: f64) -> f64 {
    const SCALE: f64 = 1e10;
    let rounded = (n * SCALE).round() / SCALE;
    if rounded.is_finite() {
        rounded
    } else {
        n
    }
}

/// Range over argument values that may carry a unit.
///
/// The unit of the first argument (if any) is stripped from every argument
/// before expansion and re-applied to every element of the result. Arguments
/// that are not numeric make the whole range empty.
pub fn unit_range(args: &[Value]) -> Vec<Value> {
    let unit: Option<Unit> = args.first().and_then(Value::unit);

    let numbers: Option<Vec<f64>> = args
        .iter()
        .map(|arg| arg.as_scalar().map(|scalar| scalar.value))
        .collect();
    let Some(numbers) = numbers else {
        return Vec::new();
    };

    range(&numbers)
        .into_iter()
        .map(|n| match unit {
            Some(unit) => Value::Text(format!("{}{unit}", format_number(n))),
            None => Value::Number(n),
        })
        .collect()
}

//! Coordinate predicates for conditional blocks: `@nth`, `@at`, `@row`,
//! `@col`, `@even`, `@odd`.

use super::{bound, number_arg, Bound, Registry};
use crate::grid::Coords;
use crate::value::Value;

pub(crate) fn register(registry: &mut Registry) {
    registry.register_predicate("nth", nth);
    registry.register_predicate("at", at);
    registry.register_predicate("row", row);
    registry.register_predicate("col", col);
    registry.register_predicate("even", even);
    registry.register_predicate("odd", odd);
}

/// `@nth(n)`: the cell's sequential index is `n`.
pub fn nth(coords: Coords) -> Bound {
    bound(move |args, _| Some(Value::Bool(equals(number_arg(args, 0), coords.index))))
}

/// `@at(row, col)`: the cell sits at exactly `(row, col)`.
pub fn at(coords: Coords) -> Bound {
    bound(move |args, _| {
        Some(Value::Bool(
            equals(number_arg(args, 0), coords.row) && equals(number_arg(args, 1), coords.col),
        ))
    })
}

/// `@row(n)`, `@row(even)`, `@row(odd)`.
pub fn row(coords: Coords) -> Bound {
    bound(move |args, _| Some(Value::Bool(index_or_parity(args.first(), coords.row))))
}

/// `@col(n)`, `@col(even)`, `@col(odd)`.
pub fn col(coords: Coords) -> Bound {
    bound(move |args, _| Some(Value::Bool(index_or_parity(args.first(), coords.col))))
}

/// `@even`: the sequential index is even.
pub fn even(coords: Coords) -> Bound {
    bound(move |_, _| Some(Value::Bool(coords.index % 2 == 0)))
}

/// `@odd`: the sequential index is odd.
pub fn odd(coords: Coords) -> Bound {
    bound(move |_, _| Some(Value::Bool(coords.index % 2 == 1)))
}

fn equals(arg: Option<f64>, n: u32) -> bool {
    arg.is_some_and(|v| v == f64::from(n))
}

fn index_or_parity(arg: Option<&Value>, n: u32) -> bool {
    match arg {
        Some(Value::Text(s)) if s.trim() == "even" => n % 2 == 0,
        Some(Value::Text(s)) if s.trim() == "odd" => n % 2 == 1,
        Some(value) => equals(value.as_number(), n),
        None => false,
    }
}

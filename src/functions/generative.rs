//! Generative functions used inside values: `@index`, `@row`, `@col`,
//! `@any`, `@pick`, `@rand`, `@shape`.

use ::rand::seq::SliceRandom;

use super::{bound, Bound, Registry};
use crate::grid::Coords;
use crate::shapes;
use crate::value::range::unit_range;
use crate::value::{MemoKey, Value};

pub(crate) fn register(registry: &mut Registry) {
    registry.register_function("index", index);
    registry.register_function("row", row);
    registry.register_function("col", col);
    registry.register_function("any", any);
    registry.register_function("pick", any);
    registry.register_function("rand", rand);
    registry.register_function("shape", shape);
}

/// `@index()`: the cell's sequential index.
pub fn index(coords: Coords) -> Bound {
    bound(move |_, _| Some(Value::Number(f64::from(coords.index))))
}

/// `@row()`: the cell's row.
pub fn row(coords: Coords) -> Bound {
    bound(move |_, _| Some(Value::Number(f64::from(coords.row))))
}

/// `@col()`: the cell's column.
pub fn col(coords: Coords) -> Bound {
    bound(move |_, _| Some(Value::Number(f64::from(coords.col))))
}

/// `@any(a, b, ...)` / `@pick(a, b, ...)`: one argument chosen uniformly.
pub fn any(_: Coords) -> Bound {
    bound(|args, scope| args.choose(&mut *scope.rng).cloned())
}

/// `@rand(stop)`, `@rand(start, stop)`, `@rand(start, stop, step)`: one
/// element of the (memoized) range, carrying the first argument's unit.
pub fn rand(_: Coords) -> Bound {
    bound(|args, scope| {
        let values = scope
            .cache
            .get_or_insert_with(MemoKey::new("range", args), || unit_range(args));
        values.choose(&mut *scope.rng).cloned()
    })
}

/// `@shape(name, ...)`: a named clip-path shape, memoized by its arguments.
pub fn shape(_: Coords) -> Bound {
    bound(|args, scope| {
        let (name, rest) = args.split_first()?;
        let name = name.to_string();
        let generated = scope.cache.get_or_insert_with(MemoKey::new("shape", args), || {
            shapes::generate(&name, rest)
                .map(Value::Text)
                .into_iter()
                .collect()
        });
        if generated.is_empty() {
            tracing::debug!(shape = %name.trim(), "unknown shape");
        }
        generated.into_iter().next()
    })
}

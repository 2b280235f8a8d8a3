//! Shape generator library behind `@shape(name, ...)`.
//!
//! Every shape is a pure function of its optional numeric parameter and
//! produces a CSS basic-shape expression usable in `clip-path`.

pub mod curves;
pub mod polygon;

use crate::value::Value;

pub use polygon::{polygon, rotate, PolygonOptions};

/// All shape names, in registration order.
pub const SHAPE_NAMES: [&str; 21] = [
    "circle",
    "triangle",
    "rhombus",
    "pentagon",
    "hexagon",
    "heptagon",
    "octagon",
    "star",
    "diamond",
    "cross",
    "clover",
    "hypocycloid",
    "astroid",
    "infinity",
    "heart",
    "bean",
    "bicorn",
    "pear",
    "fish",
    "whale",
    "bud",
];

/// Generate the shape called `name` (surrounding whitespace ignored).
///
/// `args` are the arguments following the name; only `clover`,
/// `hypocycloid` and `bud` read the first of them. Returns `None` for an
/// unknown name.
pub fn generate(name: &str, args: &[Value]) -> Option<String> {
    let param = args.first().and_then(Value::as_number).filter(|n| n.is_finite());

    let shape = match name.trim() {
        "circle" => curves::circle(),
        "triangle" => curves::triangle(),
        "rhombus" => curves::rhombus(),
        "pentagon" => curves::pentagon(),
        "hexagon" => curves::hexagon(),
        "heptagon" => curves::heptagon(),
        "octagon" => curves::octagon(),
        "star" => curves::star(),
        "diamond" => curves::diamond(),
        "cross" => curves::cross(),
        "clover" => curves::clover(param),
        "hypocycloid" => curves::hypocycloid(param),
        "astroid" => curves::astroid(),
        "infinity" => curves::infinity(),
        "heart" => curves::heart(),
        "bean" => curves::bean(),
        "bicorn" => curves::bicorn(),
        "pear" => curves::pear(),
        "fish" => curves::fish(),
        "whale" => curves::whale(),
        "bud" => curves::bud(param),
        _ => return None,
    };
    Some(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_is_fixed() {
        assert_eq!(generate("circle", &[]).as_deref(), Some("circle(49%)"));
        assert_eq!(
            generate(" circle ", &[Value::Number(9.0)]).as_deref(),
            Some("circle(49%)")
        );
    }

    #[test]
    fn test_unknown_shape() {
        assert_eq!(generate("blob", &[]), None);
        assert_eq!(generate("", &[]), None);
    }

    #[test]
    fn test_every_name_generates() {
        for name in SHAPE_NAMES {
            let shape = generate(name, &[]).unwrap_or_else(|| panic!("{name} missing"));
            assert!(
                shape.starts_with("polygon(") || shape.starts_with("circle("),
                "{name}: {shape}"
            );
            assert!(!shape.contains("NaN"), "{name}: {shape}");
        }
    }

    #[test]
    fn test_point_counts() {
        let points = |s: String| s.matches(',').count() + 1;
        assert_eq!(points(generate("triangle", &[]).unwrap()), 3);
        assert_eq!(points(generate("hexagon", &[]).unwrap()), 6);
        assert_eq!(points(generate("star", &[]).unwrap()), 5);
        assert_eq!(points(generate("heart", &[]).unwrap()), 120);
        assert_eq!(points(generate("whale", &[]).unwrap()), 240);
    }

    #[test]
    fn test_parameter_is_clamped() {
        let low = generate("bud", &[Value::Number(1.0)]);
        let min = generate("bud", &[Value::Number(3.0)]);
        assert_eq!(low, min);
        assert_ne!(generate("bud", &[Value::Number(5.0)]), min);
    }

    #[test]
    fn test_clover_four_petals_differs() {
        let four = generate("clover", &[Value::Number(4.0)]);
        assert_ne!(four, generate("clover", &[Value::Number(3.0)]));
        assert_ne!(four, generate("clover", &[Value::Number(5.0)]));
    }

    #[test]
    fn test_astroid_is_four_cusp_hypocycloid() {
        assert_eq!(
            generate("astroid", &[]),
            generate("hypocycloid", &[Value::text("4")])
        );
    }

    #[test]
    fn test_shapes_are_deterministic() {
        assert_eq!(generate("heart", &[]), generate("heart", &[]));
    }
}

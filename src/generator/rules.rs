//! Property-specific rewrites applied to a compiled declaration.

/// Properties that reference keyframes by name.
pub fn is_animation(property: &str) -> bool {
    matches!(property, "animation" | "animation-name")
}

/// Build the final rule text for `property: value`.
///
/// `rename` is `Some(index)` when animation names must be namespaced per
/// cell; `keyframes` lists the declared keyframes names.
pub fn rule(property: &str, value: &str, rename: Option<u32>, keyframes: &[String]) -> String {
    match property {
        "clip-path" => {
            format!("-webkit-clip-path: {value}; clip-path: {value}; overflow: hidden;")
        }
        "animation-name" => match rename {
            Some(index) => format!("{property}: {};", rename_names(value, index)),
            None => format!("{property}: {value};"),
        },
        "animation" => match rename {
            Some(index) => format!("{property}: {};", rename_shorthand(value, index, keyframes)),
            None => format!("{property}: {value};"),
        },
        "size" => size("width", "height", value),
        "min-size" => size("min-width", "min-height", value),
        "max-size" => size("max-width", "max-height", value),
        _ => format!("{property}: {value};"),
    }
}

/// `name-index`
pub fn namespaced(name: &str, index: u32) -> String {
    format!("{name}-{index}")
}

/// `spin, fade` → `spin-2, fade-2`
fn rename_names(value: &str, index: u32) -> String {
    value
        .split(',')
        .map(|name| namespaced(name.trim(), index))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rename the keyframes reference in each comma-separated `animation`
/// layer: the word naming a declared keyframes block, else the first word.
fn rename_shorthand(value: &str, index: u32, keyframes: &[String]) -> String {
    value
        .split(',')
        .map(|layer| {
            let mut words: Vec<String> = layer.split_whitespace().map(str::to_owned).collect();
            let target = words
                .iter()
                .position(|word| keyframes.iter().any(|name| name == word))
                .unwrap_or(0);
            if let Some(word) = words.get_mut(target) {
                *word = namespaced(word, index);
            }
            words.join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `size: 1em 2em` → `width: 1em; height: 2em;`. One value sets both.
fn size(width: &str, height: &str, value: &str) -> String {
    let mut parts = value
        .split(|c: char| c == ',' || c == '，' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let w = parts.next().unwrap_or_default();
    let h = parts.next().unwrap_or(w);
    format!("{width}: {w}; {height}: {h};")
}

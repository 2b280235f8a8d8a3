//! Compile results.

use serde::Serialize;

/// Features the compiled styles use. A host applying cell styles with
/// transitions or animations should defer them (see
/// [`crate::document::DEFER_DELAY`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Flags {
    pub has_transition: bool,
    pub has_animation: bool,
}

impl Flags {
    /// Cell styles should be applied after the first paint.
    pub fn defers_cells(&self) -> bool {
        self.has_transition || self.has_animation
    }
}

/// The three stylesheet fragments a compile produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheets {
    /// Groups whose selector starts with `:host`.
    pub host: String,
    /// Per-cell groups.
    pub cells: String,
    /// `@keyframes` blocks.
    pub keyframes: String,
}

/// Everything one compile produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledOutput {
    pub flags: Flags,
    pub stylesheets: Stylesheets,
}

impl CompiledOutput {
    /// All three fragments as a single stylesheet: keyframes, host, cells.
    pub fn to_css(&self) -> String {
        let Stylesheets {
            host,
            cells,
            keyframes,
        } = &self.stylesheets;
        [keyframes, host, cells]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defers_cells() {
        assert!(!Flags::default().defers_cells());
        let flags = Flags {
            has_transition: true,
            ..Flags::default()
        };
        assert!(flags.defers_cells());
    }

    #[test]
    fn test_to_css_skips_empty_parts() {
        let output = CompiledOutput {
            flags: Flags::default(),
            stylesheets: Stylesheets {
                host: ":host { a: 1; }".into(),
                cells: String::new(),
                keyframes: "@keyframes k { }".into(),
            },
        };
        assert_eq!(output.to_css(), "@keyframes k { }\n:host { a: 1; }");
    }

    #[test]
    fn test_serializes_to_json() {
        let json = serde_json::to_value(CompiledOutput::default()).unwrap();
        assert_eq!(json["flags"]["has_animation"], false);
        assert_eq!(json["stylesheets"]["cells"], "");
    }
}

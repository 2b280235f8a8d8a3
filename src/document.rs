//! Host markup assembly.
//!
//! Turns a [`CompiledOutput`] into the text a host element places in its
//! shadow root: base styles, keyframes, container and cell styles, and one
//! `<div class="cell">` per grid cell. Nothing is rendered or scheduled
//! here; when cell styles use transitions or animations the document
//! reports them as deferred and the host applies them after
//! [`DEFER_DELAY`].

use std::time::Duration;

use crate::generator::CompiledOutput;
use crate::grid::GridSize;

/// How long a host should wait before applying deferred cell styles.
pub const DEFER_DELAY: Duration = Duration::from_millis(50);

/// Styles every doodle starts from.
pub const BASE_STYLE: &str = "\
:host { display: block; visibility: visible; width: 1em; height: 1em; }
.container { position: relative; width: 100%; height: 100%; display: grid; }
.cell { position: relative; line-height: 1; box-sizing: border-box; display: flex; justify-content: center; align-items: center; }";

const CELL_HTML: &str = r#"<div class="cell"></div>"#;

/// The assembled pieces of a host's shadow markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    grid: GridSize,
    keyframes: String,
    host: String,
    cells: String,
    deferred: bool,
}

/// Assemble the document for `output` compiled on `grid`.
pub fn render(output: &CompiledOutput, grid: GridSize) -> Document {
    let stylesheets = &output.stylesheets;
    Document {
        grid,
        keyframes: stylesheets.keyframes.clone(),
        host: stylesheets.host.clone(),
        cells: stylesheets.cells.clone(),
        deferred: output.flags.defers_cells(),
    }
}

impl Document {
    /// Grid template followed by the `:host` rules.
    pub fn container_style(&self) -> String {
        let template = format!(
            ".container {{ grid-template-rows: repeat({}, 1fr); grid-template-columns: repeat({}, 1fr); }}",
            self.grid.rows, self.grid.cols
        );
        if self.host.is_empty() {
            template
        } else {
            format!("{template}\n{}", self.host)
        }
    }

    /// Cell styles to include immediately: empty when deferred.
    pub fn initial_cells(&self) -> &str {
        if self.deferred {
            ""
        } else {
            &self.cells
        }
    }

    /// Cell styles the host applies after [`DEFER_DELAY`], if any.
    pub fn deferred_cells(&self) -> Option<&str> {
        self.deferred.then_some(self.cells.as_str())
    }

    /// `count` cell elements.
    pub fn cells_html(&self) -> String {
        CELL_HTML.repeat(self.grid.count() as usize)
    }

    /// The full shadow markup with the initial (possibly empty) cell styles.
    pub fn to_html(&self) -> String {
        [
            format!("<style>\n{BASE_STYLE}\n</style>"),
            format!("<style class=\"style-keyframes\">\n{}\n</style>", self.keyframes),
            format!("<style class=\"style-container\">\n{}\n</style>", self.container_style()),
            format!("<style class=\"style-cells\">\n{}\n</style>", self.initial_cells()),
            format!("<div class=\"container\">{}</div>", self.cells_html()),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::generator::{Flags, Stylesheets};

    fn output(flags: Flags) -> CompiledOutput {
        CompiledOutput {
            flags,
            stylesheets: Stylesheets {
                host: ":host { width: 8em; }".into(),
                cells: ".cell:nth-of-type(1) { color: red; }".into(),
                keyframes: String::new(),
            },
        }
    }

    #[test]
    fn test_container_style() {
        let doc = render(&output(Flags::default()), GridSize::new(2, 3));
        assert_eq!(
            doc.container_style(),
            ".container { grid-template-rows: repeat(2, 1fr); grid-template-columns: repeat(3, 1fr); }\n:host { width: 8em; }"
        );
    }

    #[test]
    fn test_cells_html_count() {
        let doc = render(&output(Flags::default()), GridSize::new(2, 3));
        assert_eq!(doc.cells_html().matches(CELL_HTML).count(), 6);
    }

    #[test]
    fn test_cells_applied_immediately() {
        let doc = render(&output(Flags::default()), GridSize::new(1, 1));
        assert_eq!(doc.initial_cells(), ".cell:nth-of-type(1) { color: red; }");
        assert_eq!(doc.deferred_cells(), None);
        assert!(doc.to_html().contains("{ color: red; }"));
    }

    #[test]
    fn test_animated_cells_deferred() {
        let flags = Flags {
            has_animation: true,
            ..Flags::default()
        };
        let doc = render(&output(flags), GridSize::new(1, 1));
        assert_eq!(doc.initial_cells(), "");
        assert_eq!(doc.deferred_cells(), Some(".cell:nth-of-type(1) { color: red; }"));
        assert!(!doc.to_html().contains("{ color: red; }"));
        assert_eq!(DEFER_DELAY, Duration::from_millis(50));
    }
}

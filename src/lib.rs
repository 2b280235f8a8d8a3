//! # cell-doodle
//!
//! A compiler for a small CSS superset that styles every cell of a grid
//! independently.
//!
//! A doodle source is ordinary CSS declarations mixed with embedded
//! `@function(...)` calls, `@predicate(...) { }` blocks that apply only to
//! some cells, `:pseudo { }` blocks and `@keyframes`. It is parsed once into
//! a token tree, then evaluated once per cell of a 1..16 × 1..16 grid into
//! selector-scoped stylesheet text.
//!
//! ```
//! use cell_doodle::{compile, GridSize};
//!
//! let output = compile("@odd { background: red; } width: @index()px;", GridSize::new(1, 2)).unwrap();
//! assert_eq!(
//!     output.stylesheets.cells,
//!     ".cell:nth-of-type(1) { background: red; width: 1px; }\n.cell:nth-of-type(2) { width: 2px; }"
//! );
//! ```
//!
//! ## Core Systems
//!
//! - **[`parser`]**: source text to an immutable token tree
//! - **[`functions`]**: predicates, generative functions and math wrappers
//! - **[`generator`]**: per-cell evaluation and stylesheet assembly
//! - **[`shapes`]**: parametric `clip-path` polygons for `@shape`
//! - **[`value`]**: evaluated values, units, argument arithmetic, ranges and the memo cache
//! - **[`grid`]**: grid size and cell coordinates
//! - **[`compiler`]**: configuration and the [`Compiler`] facade
//! - **[`document`]**: host markup assembly

// Foundation
pub mod error;
pub mod grid;
pub mod value;

// Language
pub mod functions;
pub mod parser;
pub mod shapes;

// Compilation
pub mod compiler;
pub mod document;
pub mod generator;

pub use compiler::{Compiler, CompilerConfig};
pub use error::{Error, Result};
pub use generator::{CompiledOutput, Flags, Stylesheets};
pub use grid::{Coords, GridSize};
pub use parser::{ParseError, ParseErrorKind};
pub use value::Value;

/// Compile `source` for `grid` with a default [`Compiler`].
pub fn compile(source: &str, grid: GridSize) -> Result<CompiledOutput> {
    Compiler::default().compile(source, grid)
}

//! Compiler facade: configuration plus the state that outlives one compile.
//!
//! A [`Compiler`] owns its function [`Registry`], the memo cache for pure
//! functions and the seed policy. Every [`Compiler::compile`] call draws a
//! fresh random source: seeded from [`CompilerConfig::seed`] when set, so
//! random output is reproducible, otherwise from entropy.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::functions::Registry;
use crate::generator::{CompiledOutput, Generator, CELL_SELECTOR};
use crate::grid::GridSize;
use crate::parser::{self, ParseError, Token};
use crate::value::MemoCache;

// ---------------------------------------------------------------------------
// CompilerConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`Compiler`].
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Seed for the per-compile random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Stop caching new results once the memo cache holds this many entries.
    pub cache_capacity: Option<usize>,
    /// Selector of a grid cell element.
    pub cell_selector: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cache_capacity: None,
            cell_selector: CELL_SELECTOR.to_owned(),
        }
    }
}

impl CompilerConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed (builder).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the memo cache capacity (builder).
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Set the cell selector (builder).
    pub fn with_cell_selector(mut self, selector: impl Into<String>) -> Self {
        self.cell_selector = selector.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Compiler
// ---------------------------------------------------------------------------

/// Compiles doodle sources for a grid.
#[derive(Debug)]
pub struct Compiler {
    config: CompilerConfig,
    registry: Registry,
    cache: MemoCache,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        let cache = match config.cache_capacity {
            Some(capacity) => MemoCache::with_capacity(capacity),
            None => MemoCache::new(),
        };
        Self {
            config,
            registry: Registry::new(),
            cache,
        }
    }

    /// Parse and compile `source` for every cell of `grid`.
    pub fn compile(&mut self, source: &str, grid: GridSize) -> Result<CompiledOutput> {
        let tokens = Self::parse(source)?;
        Ok(self.generate(&tokens, grid))
    }

    /// Parse `source` without compiling it.
    pub fn parse(source: &str) -> std::result::Result<Vec<Token>, ParseError> {
        parser::parse(source)
    }

    /// Compile an already parsed token tree.
    pub fn generate(&mut self, tokens: &[Token], grid: GridSize) -> CompiledOutput {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::debug!(%grid, tokens = tokens.len(), seed = ?self.config.seed, "compiling doodle");

        Generator::new(&self.registry, &mut self.cache, &mut rng, grid)
            .with_cell_selector(&self.config.cell_selector)
            .run(tokens)
    }

    /// The function registry, for adding custom functions and predicates.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::functions::bound;
    use crate::value::Value;

    #[test]
    fn test_config_builders() {
        let config = CompilerConfig::new()
            .with_seed(3)
            .with_cache_capacity(10)
            .with_cell_selector("i");
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.cache_capacity, Some(10));
        assert_eq!(config.cell_selector, "i");
        assert_eq!(CompilerConfig::default().cell_selector, ".cell");
    }

    #[test]
    fn test_seeded_compiles_repeat() {
        let source = "color: @pick(red, green, blue); width: @rand(1, 100)px;";
        let mut a = Compiler::new(CompilerConfig::new().with_seed(9));
        let mut b = Compiler::new(CompilerConfig::new().with_seed(9));
        let grid = GridSize::new(4, 4);
        let first = a.compile(source, grid).unwrap();
        assert_eq!(first, b.compile(source, grid).unwrap());
        assert_eq!(first, a.compile(source, grid).unwrap());
    }

    #[test]
    fn test_cache_persists_between_compiles() {
        let mut compiler = Compiler::default();
        compiler.compile("clip-path: @shape(heart);", GridSize::new(2, 2)).unwrap();
        assert_eq!(compiler.cache().len(), 1);
        compiler.compile("clip-path: @shape(heart);", GridSize::new(1, 1)).unwrap();
        assert_eq!(compiler.cache().len(), 1);
        compiler.clear_cache();
        assert!(compiler.cache().is_empty());
    }

    #[test]
    fn test_cache_capacity_is_respected() {
        let mut compiler = Compiler::new(CompilerConfig::new().with_cache_capacity(1));
        let out = compiler
            .compile("a: @shape(heart); b: @shape(star);", GridSize::new(1, 1))
            .unwrap();
        assert_eq!(compiler.cache().len(), 1);
        assert!(out.stylesheets.cells.contains("b: polygon("));
    }

    #[test]
    fn test_custom_function() {
        let mut compiler = Compiler::default();
        compiler.registry_mut().register_function("double", |_| {
            bound(|args, _| {
                let n = args.first()?.as_number()?;
                Some(Value::Number(n * 2.0))
            })
        });
        let out = compiler.compile("width: @double(21)px;", GridSize::new(1, 1)).unwrap();
        assert_eq!(out.stylesheets.cells, ".cell:nth-of-type(1) { width: 42px; }");
    }

    #[test]
    fn test_parse_error_propagates() {
        let err = Compiler::default().compile("wid th: 1px;", GridSize::new(1, 1)).unwrap_err();
        assert!(matches!(err, crate::Error::Parse(_)));
    }
}

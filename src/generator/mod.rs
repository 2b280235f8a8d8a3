//! Cell-wise compilation of a token tree into stylesheet text.
//!
//! The tree is walked once per grid cell in row-major order. Declarations
//! are filed under the cell's `:nth-of-type` selector, `:host` blocks once
//! per compile, and keyframes once per name plus one namespaced clone per
//! animated cell.

pub mod output;
pub mod rules;
pub mod sheet;

use std::collections::HashSet;
use std::fmt::Write as _;

use rand::rngs::StdRng;

use crate::functions::{Registry, Scope};
use crate::grid::{Coords, GridSize};
use crate::parser::{
    keyframes_names, ArgumentGroup, ArgumentNode, BlockId, ConditionalBlock, Declaration,
    FunctionCall, KeyframesBlock, PseudoBlock, Token, ValueNode,
};
use crate::value::{MemoCache, Value};

pub use output::{CompiledOutput, Flags, Stylesheets};
pub use sheet::RuleSheet;

/// Default selector of a grid cell element.
pub const CELL_SELECTOR: &str = ".cell";

/// A keyframes block as first reached, with the cell that reached it.
struct KeyframesEntry<'a> {
    block: &'a KeyframesBlock,
    coords: Coords,
}

/// Per-compile state. Build one with [`Generator::new`] and consume it with
/// [`Generator::run`].
pub struct Generator<'a> {
    registry: &'a Registry,
    cache: &'a mut MemoCache,
    rng: &'a mut StdRng,
    cell_selector: &'a str,
    grid: GridSize,
    declared_keyframes: Vec<String>,

    sheet: RuleSheet,
    flags: Flags,
    emitted_hosts: HashSet<BlockId>,
    keyframes: Vec<KeyframesEntry<'a>>,
    animated_cells: Vec<Coords>,
}

impl<'a> Generator<'a> {
    pub fn new(
        registry: &'a Registry,
        cache: &'a mut MemoCache,
        rng: &'a mut StdRng,
        grid: GridSize,
    ) -> Self {
        Self {
            registry,
            cache,
            rng,
            cell_selector: CELL_SELECTOR,
            grid,
            declared_keyframes: Vec::new(),
            sheet: RuleSheet::new(),
            flags: Flags::default(),
            emitted_hosts: HashSet::new(),
            keyframes: Vec::new(),
            animated_cells: Vec::new(),
        }
    }

    /// Use `selector` instead of `.cell` for cell elements (builder).
    pub fn with_cell_selector(mut self, selector: &'a str) -> Self {
        self.cell_selector = selector;
        self
    }

    /// Compile `tokens` for every cell of the grid.
    pub fn run(mut self, tokens: &'a [Token]) -> CompiledOutput {
        self.declared_keyframes = keyframes_names(tokens)
            .into_iter()
            .map(str::to_owned)
            .collect();

        let grid = self.grid;
        for coords in grid.cells() {
            tracing::trace!(
                row = coords.row,
                col = coords.col,
                index = coords.index,
                "compiling cell"
            );
            self.walk(tokens, coords);
        }

        let keyframes = self.render_keyframes();
        CompiledOutput {
            flags: self.flags,
            stylesheets: Stylesheets {
                host: self.sheet.render(is_host_selector),
                cells: self.sheet.render(|selector| !is_host_selector(selector)),
                keyframes,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Tree walk
    // -----------------------------------------------------------------------

    fn walk(&mut self, tokens: &'a [Token], coords: Coords) {
        for token in tokens {
            match token {
                Token::Declaration(declaration) => {
                    let rule = self.cell_declaration(declaration, coords);
                    let selector = self.selector_for(coords, "");
                    self.sheet.push(&selector, rule);
                }
                Token::Pseudo(block) => self.pseudo(block, coords),
                Token::Conditional(block) => {
                    if self.test(block, coords) {
                        self.walk(&block.tokens, coords);
                    }
                }
                Token::Keyframes(block) => {
                    if !self.keyframes.iter().any(|k| k.block.name == block.name) {
                        self.keyframes.push(KeyframesEntry { block, coords });
                    }
                }
                Token::Comment(_) => {}
            }
        }
    }

    fn pseudo(&mut self, block: &PseudoBlock, coords: Coords) {
        let selector = host_selector(&block.selector);
        let is_host = is_host_selector(&selector);
        if is_host && !self.emitted_hosts.insert(block.id) {
            return;
        }

        let rules: Vec<String> = block
            .declarations
            .iter()
            .map(|declaration| self.cell_declaration(declaration, coords))
            .collect();

        let selector = if is_host {
            selector
        } else {
            self.selector_for(coords, &selector)
        };
        self.sheet.extend(&selector, rules);
    }

    fn test(&mut self, block: &ConditionalBlock, coords: Coords) -> bool {
        let registry = self.registry;
        let Some(predicate) = registry.predicate(&block.name) else {
            tracing::debug!(name = %block.name, "unknown predicate, block skipped");
            return false;
        };
        let args = self.arguments(&block.arguments, coords);
        predicate(coords)(&args, &mut self.scope()).is_some_and(|v| v.is_truthy())
    }

    fn selector_for(&self, coords: Coords, pseudo: &str) -> String {
        format!("{}:nth-of-type({}){pseudo}", self.cell_selector, coords.index)
    }

    // -----------------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------------

    /// Compile a declaration reached by a cell, remembering animated cells
    /// for keyframe cloning.
    fn cell_declaration(&mut self, declaration: &Declaration, coords: Coords) -> String {
        if rules::is_animation(&declaration.property) && self.animated_cells.last() != Some(&coords)
        {
            self.animated_cells.push(coords);
        }
        self.declaration(declaration, coords)
    }

    fn declaration(&mut self, declaration: &Declaration, coords: Coords) -> String {
        let property = declaration.property.as_str();
        let value = self.value(&declaration.value, coords);

        match property {
            "transition" => self.flags.has_transition = true,
            p if rules::is_animation(p) => self.flags.has_animation = true,
            _ => {}
        }
        let rename = (self.grid.count() > 1).then_some(coords.index);
        rules::rule(property, &value, rename, &self.declared_keyframes)
    }

    // -----------------------------------------------------------------------
    // Evaluation
    // -----------------------------------------------------------------------

    fn scope(&mut self) -> Scope<'_> {
        Scope {
            cache: &mut *self.cache,
            rng: &mut *self.rng,
        }
    }

    fn value(&mut self, nodes: &[ValueNode], coords: Coords) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                ValueNode::Text(text) => out.push_str(text),
                ValueNode::Call(call) => {
                    if let Some(value) = self.call(call, coords) {
                        let _ = write!(out, "{value}");
                    }
                }
            }
        }
        out
    }

    /// Evaluate a value-position call. `None` is "no substitution".
    fn call(&mut self, call: &FunctionCall, coords: Coords) -> Option<Value> {
        let registry = self.registry;
        let Some(function) = registry.function(&call.name) else {
            tracing::debug!(name = %call.name, "unknown function");
            return None;
        };
        let args = self.arguments(&call.arguments, coords);
        function(coords)(&args, &mut self.scope())
    }

    fn arguments(&mut self, groups: &[ArgumentGroup], coords: Coords) -> Vec<Value> {
        groups
            .iter()
            .map(|group| self.argument(group, coords))
            .collect()
    }

    /// A lone node keeps its type; several nodes are joined as text.
    fn argument(&mut self, group: &[ArgumentNode], coords: Coords) -> Value {
        match group {
            [] => Value::text(""),
            [node] => self
                .argument_node(node, coords)
                .unwrap_or_else(|| Value::text("")),
            nodes => {
                let mut joined = String::new();
                for node in nodes {
                    if let Some(value) = self.argument_node(node, coords) {
                        let _ = write!(joined, "{value}");
                    }
                }
                Value::Text(joined)
            }
        }
    }

    fn argument_node(&mut self, node: &ArgumentNode, coords: Coords) -> Option<Value> {
        match node {
            ArgumentNode::Text(text) => Some(Value::text(text.as_str())),
            ArgumentNode::Number(n) => Some(Value::Number(*n)),
            ArgumentNode::Call(call) => self.call(call, coords),
        }
    }

    // -----------------------------------------------------------------------
    // Keyframes
    // -----------------------------------------------------------------------

    /// Base block per name, then one clone per animated cell when the grid
    /// has more than one cell.
    fn render_keyframes(&mut self) -> String {
        let entries = std::mem::take(&mut self.keyframes);
        let animated = std::mem::take(&mut self.animated_cells);
        let mut blocks = Vec::new();

        for entry in &entries {
            blocks.push(self.keyframes_block(&entry.block.name, entry.block, entry.coords));
            if self.grid.count() > 1 {
                for &coords in &animated {
                    let name = rules::namespaced(&entry.block.name, coords.index);
                    blocks.push(self.keyframes_block(&name, entry.block, coords));
                }
            }
        }
        blocks.join("\n")
    }

    fn keyframes_block(&mut self, name: &str, block: &KeyframesBlock, coords: Coords) -> String {
        let steps: Vec<String> = block
            .steps
            .iter()
            .map(|step| {
                let rules: Vec<String> = step
                    .declarations
                    .iter()
                    .map(|declaration| self.declaration(declaration, coords))
                    .collect();
                sheet::block(&step.selector, &rules)
            })
            .collect();
        format!("@keyframes {name} {{ {} }}", steps.join(" "))
    }
}

/// Rewrite a leading `:doodle` (any number of colons) to `:host`.
fn host_selector(selector: &str) -> String {
    match selector.trim_start_matches(':').strip_prefix("doodle") {
        Some(rest) if selector.starts_with(':') => format!(":host{rest}"),
        _ => selector.to_owned(),
    }
}

fn is_host_selector(selector: &str) -> bool {
    selector.starts_with(":host")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    use super::*;
    use crate::parser::parse;

    fn generate(source: &str, grid: GridSize) -> CompiledOutput {
        let tokens = parse(source).unwrap();
        let registry = Registry::new();
        let mut cache = MemoCache::new();
        let mut rng = StdRng::seed_from_u64(42);
        Generator::new(&registry, &mut cache, &mut rng, grid).run(&tokens)
    }

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn test_declaration_per_cell() {
        let out = generate("width: 1px;", GridSize::new(1, 2));
        assert_eq!(
            out.stylesheets.cells,
            ".cell:nth-of-type(1) { width: 1px; }\n.cell:nth-of-type(2) { width: 1px; }"
        );
        assert_eq!(out.stylesheets.host, "");
        assert_eq!(out.stylesheets.keyframes, "");
        assert_eq!(out.flags, Flags::default());
    }

    #[test]
    fn test_coordinates_substituted() {
        let out = generate("order: @index(); z: @row()-@col();", GridSize::new(2, 2));
        assert!(out
            .stylesheets
            .cells
            .contains(".cell:nth-of-type(3) { order: 3; z: 2-1; }"));
    }

    #[test]
    fn test_nested_call_arguments() {
        let out = generate("width: @abs(@index())px;", GridSize::new(1, 1));
        assert_eq!(out.stylesheets.cells, ".cell:nth-of-type(1) { width: 1px; }");
    }

    #[test]
    fn test_unknown_function_is_empty() {
        let out = generate("width: @nope(1)px;", GridSize::new(1, 1));
        assert_eq!(out.stylesheets.cells, ".cell:nth-of-type(1) { width: px; }");
    }

    #[test]
    fn test_transition_flag() {
        let out = generate("transition: all 1s;", GridSize::new(1, 1));
        assert!(out.flags.has_transition);
        assert!(!out.flags.has_animation);
    }

    #[test]
    fn test_custom_cell_selector() {
        let tokens = parse("width: 1px;").unwrap();
        let registry = Registry::new();
        let mut cache = MemoCache::new();
        let mut rng = StdRng::seed_from_u64(1);
        let out = Generator::new(&registry, &mut cache, &mut rng, GridSize::new(1, 1))
            .with_cell_selector("div")
            .run(&tokens);
        assert_eq!(out.stylesheets.cells, "div:nth-of-type(1) { width: 1px; }");
    }

    // ── Pseudo blocks ────────────────────────────────────────────────

    #[test]
    fn test_host_block_emitted_once() {
        let out = generate(":doodle { width: 8em; } :after { content: ''; }", GridSize::new(1, 2));
        assert_eq!(out.stylesheets.host, ":host { width: 8em; }");
        assert_eq!(
            out.stylesheets.cells,
            ".cell:nth-of-type(1):after { content: ''; }\n.cell:nth-of-type(2):after { content: ''; }"
        );
    }

    #[test]
    fn test_host_selector_rewrite() {
        assert_eq!(host_selector(":doodle:hover"), ":host:hover");
        assert_eq!(host_selector("::doodle"), ":host");
        assert_eq!(host_selector(":host"), ":host");
        assert_eq!(host_selector(":after"), ":after");
    }

    // ── Conditionals ─────────────────────────────────────────────────

    #[test]
    fn test_conditional_applies_to_matching_cells() {
        let out = generate("@nth(2) { color: red; }", GridSize::new(1, 3));
        assert_eq!(out.stylesheets.cells, ".cell:nth-of-type(2) { color: red; }");
    }

    #[test]
    fn test_nested_conditionals() {
        let out = generate("@row(2) { @col(odd) { color: red; } }", GridSize::new(2, 3));
        assert_eq!(
            out.stylesheets.cells,
            ".cell:nth-of-type(4) { color: red; }\n.cell:nth-of-type(6) { color: red; }"
        );
    }

    #[test]
    fn test_unknown_predicate_is_false() {
        let out = generate("@sometimes { color: red; }", GridSize::new(2, 2));
        assert_eq!(out.stylesheets.cells, "");
    }

    // ── Keyframes ────────────────────────────────────────────────────

    #[test]
    fn test_keyframes_single_cell() {
        let out = generate(
            "animation: spin 1s; @keyframes spin { to { transform: rotate(1turn); } }",
            GridSize::new(1, 1),
        );
        assert!(out.flags.has_animation);
        assert_eq!(out.stylesheets.cells, ".cell:nth-of-type(1) { animation: spin 1s; }");
        assert_eq!(
            out.stylesheets.keyframes,
            "@keyframes spin { to { transform: rotate(1turn); } }"
        );
    }

    #[test]
    fn test_keyframes_cloned_per_animated_cell() {
        let out = generate(
            "@keyframes spin { to { opacity: @index(); } }\n@even { animation: 1s spin; }",
            GridSize::new(1, 4),
        );
        assert_eq!(
            out.stylesheets.keyframes,
            [
                "@keyframes spin { to { opacity: 1; } }",
                "@keyframes spin-2 { to { opacity: 2; } }",
                "@keyframes spin-4 { to { opacity: 4; } }",
            ]
            .join("\n")
        );
        assert!(out.stylesheets.cells.contains("animation: 1s spin-4;"));
    }

    #[test]
    fn test_keyframes_first_name_wins() {
        let out = generate(
            "@keyframes k { to { a: 1; } } @keyframes k { to { a: 2; } }",
            GridSize::new(1, 1),
        );
        assert_eq!(out.stylesheets.keyframes, "@keyframes k { to { a: 1; } }");
    }
}

//! Token tree: Declaration, PseudoBlock, ConditionalBlock, KeyframesBlock.

/// Identity of a pseudo block, assigned by the parser in document order.
///
/// The generator keys per-compile bookkeeping (such as "this `:host` block
/// was already emitted") on it, so the tree itself never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// One top-level or nested item of a doodle source.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `property: value;`
    Declaration(Declaration),
    /// `:selector { declarations }`
    Pseudo(PseudoBlock),
    /// `@name(args) { tokens }`
    Conditional(ConditionalBlock),
    /// `@keyframes name { steps }`
    Keyframes(KeyframesBlock),
    /// Block or line comment text. Never compiled.
    Comment(String),
}

/// A `property: value;` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: Vec<ValueNode>,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: Vec<ValueNode>) -> Self {
        Self {
            property: property.into(),
            value,
        }
    }
}

/// A piece of a declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Literal text, whitespace already collapsed.
    Text(String),
    /// An embedded `@name(...)` call.
    Call(FunctionCall),
}

/// `@name(group, group, ...)`. The name is stored without the `@`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: Vec<ArgumentGroup>,
}

/// One comma-separated argument, possibly mixing text and calls
/// (`10px @rand(3)` is a group of two nodes).
pub type ArgumentGroup = Vec<ArgumentNode>;

/// A piece of an argument group.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentNode {
    Text(String),
    /// A lone numeric-looking literal.
    Number(f64),
    Call(FunctionCall),
}

/// `:selector { ... }`. Selectors have their whitespace removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoBlock {
    pub id: BlockId,
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// `@name(args) { ... }`, applied to cells for which the predicate holds.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalBlock {
    pub name: String,
    pub arguments: Vec<ArgumentGroup>,
    pub tokens: Vec<Token>,
}

/// `@keyframes name { step { ... } ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesBlock {
    pub name: String,
    pub steps: Vec<KeyframeStep>,
}

/// One step of a keyframes block: `from`, `50%`, `0%,100%`.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeStep {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

/// Names of every keyframes block in `tokens`, nested ones included, in
/// document order.
pub fn keyframes_names(tokens: &[Token]) -> Vec<&str> {
    let mut names = Vec::new();
    collect_keyframes_names(tokens, &mut names);
    names
}

fn collect_keyframes_names<'a>(tokens: &'a [Token], names: &mut Vec<&'a str>) {
    for token in tokens {
        match token {
            Token::Keyframes(block) => {
                if !names.contains(&block.name.as_str()) {
                    names.push(&block.name);
                }
            }
            Token::Conditional(block) => collect_keyframes_names(&block.tokens, names),
            _ => {}
        }
    }
}

//! Recursive descent reader.
//!
//! Works directly on characters through [`Cursor`]: the DSL mixes CSS text,
//! embedded calls and free-form arguments, so there is no separate
//! tokenization pass.

use super::cursor::{Cursor, Position};
use super::error::{ParseError, ParseErrorKind};
use super::model::*;
use crate::value::unit;

pub(super) struct Reader {
    cursor: Cursor,
    next_id: u32,
}

impl Reader {
    pub(super) fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
            next_id: 0,
        }
    }

    /// Read the whole source.
    pub(super) fn read(mut self) -> Result<Vec<Token>, ParseError> {
        self.tokens(false)
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        Self::error_at(kind, self.cursor.position())
    }

    fn error_at(kind: ParseErrorKind, at: Position) -> ParseError {
        ParseError::new(kind, at.line, at.column)
    }

    fn block_id(&mut self) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        id
    }

    // -----------------------------------------------------------------------
    // Token lists
    // -----------------------------------------------------------------------

    /// Read tokens until end of input, or until the closing `}` when
    /// `nested` (the brace is consumed).
    fn tokens(&mut self, nested: bool) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            let Some(c) = self.cursor.peek() else {
                if nested {
                    return Err(self.error(ParseErrorKind::UnexpectedEnd));
                }
                return Ok(tokens);
            };

            if nested && c == '}' {
                self.cursor.bump();
                return Ok(tokens);
            }
            // Stray separators, as in `a: 1;;` or `@even { };`.
            if self.cursor.eat(';') {
                continue;
            }
            if let Some(comment) = self.comment() {
                tokens.push(Token::Comment(comment));
                continue;
            }

            let token = match c {
                ':' => Token::Pseudo(self.pseudo()?),
                '@' if self.at_keyframes() => Token::Keyframes(self.keyframes()?),
                '@' => Token::Conditional(self.conditional()?),
                _ => Token::Declaration(self.declaration()?),
            };
            tokens.push(token);
        }
    }

    /// Read a comment if one starts here.
    ///
    /// `/* ... */` runs to the closing marker or end of input; `# ...` and
    /// `// ...` run to the end of the line.
    fn comment(&mut self) -> Option<String> {
        let mut text = String::new();
        if self.cursor.starts_with("/*") {
            self.cursor.bump();
            self.cursor.bump();
            while !self.cursor.is_eof() {
                if self.cursor.starts_with("*/") {
                    self.cursor.bump();
                    self.cursor.bump();
                    break;
                }
                text.extend(self.cursor.bump());
            }
            return Some(text);
        }

        if self.cursor.starts_with("//") {
            self.cursor.bump();
            self.cursor.bump();
        } else if !self.cursor.eat('#') {
            return None;
        }
        while let Some(c) = self.cursor.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.cursor.bump();
        }
        Some(text)
    }

    // -----------------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------------

    /// Read declarations (and comments) up to and including the closing `}`.
    fn declaration_block(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some('}') => {
                    self.cursor.bump();
                    return Ok(declarations);
                }
                Some(';') => {
                    self.cursor.bump();
                }
                Some(_) => {
                    if self.comment().is_none() {
                        declarations.push(self.declaration()?);
                    }
                }
            }
        }
    }

    fn declaration(&mut self) -> Result<Declaration, ParseError> {
        let property = self.property()?;
        let value = self.value()?;
        Ok(Declaration::new(property, value))
    }

    /// Read a property name and the `:` after it.
    ///
    /// A name split by whitespace is reported where the whitespace starts.
    fn property(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        let mut space_at: Option<Position> = None;
        loop {
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(':') if !name.is_empty() => {
                    self.cursor.bump();
                    return Ok(name);
                }
                Some(c) if c.is_whitespace() => {
                    space_at.get_or_insert(self.cursor.position());
                }
                Some(c) if is_name_char(c) => match space_at {
                    Some(at) => return Err(Self::error_at(ParseErrorKind::BadPropertyName, at)),
                    None => name.push(c),
                },
                Some(_) => return Err(self.error(ParseErrorKind::BadPropertyName)),
            }
            self.cursor.bump();
        }
    }

    /// Read a value up to `;` (consumed), `}` (left for the caller) or end
    /// of input.
    fn value(&mut self) -> Result<Vec<ValueNode>, ParseError> {
        let mut nodes = Vec::new();
        let mut text = String::new();
        let mut in_space = false;

        loop {
            match self.cursor.peek() {
                None | Some('}') => break,
                Some(';') => {
                    self.cursor.bump();
                    break;
                }
                Some('@') if self.at_call() => {
                    if !text.is_empty() {
                        nodes.push(ValueNode::Text(std::mem::take(&mut text)));
                    }
                    nodes.push(ValueNode::Call(self.call()?));
                    in_space = false;
                    continue;
                }
                Some(':') => return Err(self.error(ParseErrorKind::UnexpectedColon)),
                Some(c) if c.is_whitespace() => {
                    if !in_space {
                        text.push(' ');
                        in_space = true;
                    }
                }
                Some(c) => {
                    text.push(c);
                    in_space = false;
                }
            }
            self.cursor.bump();
        }
        if !text.is_empty() {
            nodes.push(ValueNode::Text(text));
        }

        trim_edges(&mut nodes);
        Ok(nodes)
    }

    // -----------------------------------------------------------------------
    // Calls and arguments
    // -----------------------------------------------------------------------

    /// `@name(` starts here.
    fn at_call(&self) -> bool {
        if self.cursor.peek() != Some('@') {
            return false;
        }
        let mut i = 1;
        while self.cursor.peek_at(i).is_some_and(is_name_char) {
            i += 1;
        }
        i > 1 && self.cursor.peek_at(i) == Some('(')
    }

    /// Read `@name(args)`. Assumes [`Self::at_call`].
    fn call(&mut self) -> Result<FunctionCall, ParseError> {
        self.cursor.bump();
        let name = self.name();
        self.cursor.bump();
        let arguments = self.arguments()?;
        Ok(FunctionCall { name, arguments })
    }

    fn name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.cursor.peek().filter(|&c| is_name_char(c)) {
            name.push(c);
            self.cursor.bump();
        }
        name
    }

    /// Read comma-separated argument groups up to and including `)`. The
    /// opening `(` has already been consumed.
    fn arguments(&mut self) -> Result<Vec<ArgumentGroup>, ParseError> {
        let mut groups = Vec::new();
        let mut group = ArgumentGroup::new();
        let mut literal = String::new();

        loop {
            let Some(c) = self.cursor.peek() else {
                return Err(self.error(ParseErrorKind::UnexpectedEnd));
            };
            match c {
                '(' | '[' | '{' => {
                    literal.push_str(&self.bracketed()?);
                    continue;
                }
                '\'' | '"' => {
                    literal.push_str(&self.quoted(c)?);
                    continue;
                }
                '@' if self.at_call() => {
                    if group.is_empty() {
                        literal = literal.trim_start().to_owned();
                    }
                    if !literal.is_empty() {
                        group.push(ArgumentNode::Text(std::mem::take(&mut literal)));
                    }
                    group.push(ArgumentNode::Call(self.call()?));
                    continue;
                }
                ',' | ')' => {
                    self.cursor.bump();
                    let last = c == ')';
                    let finished = finish_group(std::mem::take(&mut group), &mut literal);
                    // `()` has no arguments at all.
                    if !(last && groups.is_empty() && finished.is_empty()) {
                        groups.push(finished);
                    }
                    if last {
                        return Ok(groups);
                    }
                }
                _ => {
                    literal.push(c);
                    self.cursor.bump();
                }
            }
        }
    }

    /// Copy a balanced `()`, `[]` or `{}` group verbatim, nested groups
    /// included.
    fn bracketed(&mut self) -> Result<String, ParseError> {
        let mut out = String::new();
        let Some(open) = self.cursor.bump() else {
            return Err(self.error(ParseErrorKind::UnexpectedEnd));
        };
        let close = match open {
            '(' => ')',
            '[' => ']',
            _ => '}',
        };
        out.push(open);

        loop {
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(c) if c == close => {
                    out.push(c);
                    self.cursor.bump();
                    return Ok(out);
                }
                Some('(' | '[' | '{') => out.push_str(&self.bracketed()?),
                Some(c) => {
                    out.push(c);
                    self.cursor.bump();
                }
            }
        }
    }

    /// Contents of a quoted string without the outer quotes. Escaped quotes
    /// are kept as written.
    fn quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let mut out = String::new();
        self.cursor.bump();
        loop {
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some(c) if c == quote && self.cursor.prev() != Some('\\') => {
                    self.cursor.bump();
                    return Ok(out);
                }
                Some(c) => {
                    out.push(c);
                    self.cursor.bump();
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Blocks
    // -----------------------------------------------------------------------

    /// Read text up to `{` with whitespace removed, then consume the `{`.
    fn selector(&mut self) -> Result<String, ParseError> {
        let mut selector = String::new();
        loop {
            match self.cursor.bump() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some('{') => return Ok(selector),
                Some(c) if c.is_whitespace() => {}
                Some(c) => selector.push(c),
            }
        }
    }

    fn pseudo(&mut self) -> Result<PseudoBlock, ParseError> {
        let id = self.block_id();
        let selector = self.selector()?;
        let declarations = self.declaration_block()?;
        Ok(PseudoBlock {
            id,
            selector,
            declarations,
        })
    }

    fn conditional(&mut self) -> Result<ConditionalBlock, ParseError> {
        self.cursor.bump();
        let name = self.name();
        self.cursor.skip_whitespace();

        let arguments = if self.cursor.eat('(') {
            self.arguments()?
        } else {
            Vec::new()
        };

        self.open_block()?;
        let tokens = self.tokens(true)?;
        Ok(ConditionalBlock {
            name,
            arguments,
            tokens,
        })
    }

    fn at_keyframes(&self) -> bool {
        self.cursor.starts_with("@keyframes")
            && !self
                .cursor
                .peek_at("@keyframes".len())
                .is_some_and(is_name_char)
    }

    fn keyframes(&mut self) -> Result<KeyframesBlock, ParseError> {
        for _ in 0.."@keyframes".len() {
            self.cursor.bump();
        }
        self.cursor.skip_whitespace();

        let mut name = String::new();
        while let Some(c) = self.cursor.peek() {
            if c.is_whitespace() || c == '{' {
                break;
            }
            name.push(c);
            self.cursor.bump();
        }
        if name.is_empty() {
            return Err(self.error(ParseErrorKind::MissingKeyframesName));
        }

        self.open_block()?;
        let mut steps = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            match self.cursor.peek() {
                None => return Err(self.error(ParseErrorKind::UnexpectedEnd)),
                Some('}') => {
                    self.cursor.bump();
                    break;
                }
                Some(';') => {
                    self.cursor.bump();
                }
                Some(_) => {
                    if self.comment().is_some() {
                        continue;
                    }
                    let selector = self.selector()?;
                    let declarations = self.declaration_block()?;
                    steps.push(KeyframeStep {
                        selector,
                        declarations,
                    });
                }
            }
        }
        Ok(KeyframesBlock { name, steps })
    }

    /// Skip whitespace and consume the `{` that opens a block.
    fn open_block(&mut self) -> Result<(), ParseError> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('{') => {
                self.cursor.bump();
                Ok(())
            }
            Some(_) => Err(self.error(ParseErrorKind::ExpectedBlock)),
            None => Err(self.error(ParseErrorKind::UnexpectedEnd)),
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Close an argument group. A lone literal becomes a number or trimmed
/// text; literals after a call are right-trimmed.
fn finish_group(mut group: ArgumentGroup, literal: &mut String) -> ArgumentGroup {
    let text = std::mem::take(literal);
    if group.is_empty() {
        let trimmed = text.trim();
        if let Some(n) = unit::parse_number(trimmed) {
            group.push(ArgumentNode::Number(n));
        } else if !trimmed.is_empty() {
            group.push(ArgumentNode::Text(trimmed.to_owned()));
        }
    } else {
        let trimmed = text.trim_end();
        if !trimmed.is_empty() {
            group.push(ArgumentNode::Text(trimmed.to_owned()));
        }
    }
    group
}

/// Left-trim the first text node, right-trim the last, drop any that end up
/// empty.
fn trim_edges(nodes: &mut Vec<ValueNode>) {
    if let Some(ValueNode::Text(first)) = nodes.first_mut() {
        *first = first.trim_start().to_owned();
    }
    if let Some(ValueNode::Text(last)) = nodes.last_mut() {
        *last = last.trim_end().to_owned();
    }
    nodes.retain(|node| !matches!(node, ValueNode::Text(text) if text.is_empty()));
}

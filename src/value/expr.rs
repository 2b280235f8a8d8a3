//! Arithmetic over argument text.
//!
//! Math functions accept arguments such as `2*8` or `@index() + 2`, which
//! reach them as text once embedded calls have been substituted. This module
//! lexes that text with logos and evaluates it by recursive descent:
//!
//! ```text
//! expr    = term (("+" | "-") term)*
//! term    = unary (("*" | "/" | "%") unary)*
//! unary   = ("+" | "-") unary | primary
//! primary = number | "(" expr ")"
//! ```

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")]
enum ExprToken {
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("(")]
    Open,
    #[token(")")]
    Close,
}

/// Evaluate `text` as an arithmetic expression.
///
/// Returns `None` when the text does not lex, is empty, or has tokens left
/// over after a complete expression.
pub fn evaluate(text: &str) -> Option<f64> {
    let tokens = ExprToken::lexer(text)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let mut eval = Evaluator { tokens, pos: 0 };
    let value = eval.expr()?;
    (eval.pos == eval.tokens.len()).then_some(value)
}

struct Evaluator {
    tokens: Vec<ExprToken>,
    pos: usize,
}

impl Evaluator {
    fn peek(&self) -> Option<ExprToken> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<ExprToken> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(ExprToken::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(ExprToken::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(ExprToken::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(ExprToken::Slash) => {
                    self.pos += 1;
                    value /= self.unary()?;
                }
                // Remainder keeps the sign of the dividend.
                Some(ExprToken::Percent) => {
                    self.pos += 1;
                    value %= self.unary()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn unary(&mut self) -> Option<f64> {
        match self.peek()? {
            ExprToken::Minus => {
                self.pos += 1;
                Some(-self.unary()?)
            }
            ExprToken::Plus => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Option<f64> {
        match self.bump()? {
            ExprToken::Number(n) => Some(n),
            ExprToken::Open => {
                let value = self.expr()?;
                (self.bump()? == ExprToken::Close).then_some(value)
            }
            _ => None,
        }
    }
}

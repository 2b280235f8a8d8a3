//! Doodle source → token tree.
//!
//! The tree is built once per source and never mutated; see [`model`].

pub mod cursor;
pub mod error;
pub mod model;
mod reader;

pub use error::{ParseError, ParseErrorKind};
pub use model::*;

/// Parse a doodle source into its token tree.
///
/// Aborts on the first syntax error.
pub fn parse(source: &str) -> Result<Vec<Token>, ParseError> {
    reader::Reader::new(source).read()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn text(s: &str) -> ValueNode {
        ValueNode::Text(s.into())
    }

    fn call(name: &str, arguments: Vec<ArgumentGroup>) -> FunctionCall {
        FunctionCall {
            name: name.into(),
            arguments,
        }
    }

    fn only_declaration(source: &str) -> Declaration {
        let tokens = parse(source).unwrap();
        assert_eq!(tokens.len(), 1, "{tokens:?}");
        match tokens.into_iter().next() {
            Some(Token::Declaration(d)) => d,
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    fn error_kind(source: &str) -> ParseErrorKind {
        parse(source).unwrap_err().kind
    }

    // ── Declarations ─────────────────────────────────────────────────

    #[test]
    fn test_plain_declaration() {
        let d = only_declaration("width: 1px;");
        assert_eq!(d, Declaration::new("width", vec![text("1px")]));
    }

    #[test]
    fn test_multiple_declarations() {
        let tokens = parse("width: 1px; height: 2px;\ncolor: red").unwrap();
        let props: Vec<_> = tokens
            .iter()
            .map(|t| match t {
                Token::Declaration(d) => d.property.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(props, ["width", "height", "color"]);
    }

    #[test]
    fn test_whitespace_collapses() {
        let d = only_declaration("margin:   1px \n\t 2px  ;");
        assert_eq!(d.value, vec![text("1px 2px")]);
    }

    #[test]
    fn test_property_space_before_colon() {
        let d = only_declaration("width : 1px;");
        assert_eq!(d.property, "width");
    }

    #[test]
    fn test_value_with_call() {
        let d = only_declaration("transform: rotate(@rand(360)deg);");
        assert_eq!(
            d.value,
            vec![
                text("rotate("),
                ValueNode::Call(call("rand", vec![vec![ArgumentNode::Number(360.0)]])),
                text("deg)"),
            ]
        );
    }

    #[test]
    fn test_space_between_calls_kept() {
        let d = only_declaration("margin: @index() @row();");
        assert_eq!(
            d.value,
            vec![
                ValueNode::Call(call("index", vec![])),
                text(" "),
                ValueNode::Call(call("row", vec![])),
            ]
        );
    }

    #[test]
    fn test_lone_at_is_text() {
        let d = only_declaration("content: a @ b;");
        assert_eq!(d.value, vec![text("a @ b")]);
    }

    // ── Arguments ────────────────────────────────────────────────────

    fn args_of(source: &str) -> Vec<ArgumentGroup> {
        match only_declaration(source).value.into_iter().next() {
            Some(ValueNode::Call(c)) => c.arguments,
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn test_arguments_split_and_typed() {
        let args = args_of("color: @pick( red , 2, #fff );");
        assert_eq!(
            args,
            vec![
                vec![ArgumentNode::Text("red".into())],
                vec![ArgumentNode::Number(2.0)],
                vec![ArgumentNode::Text("#fff".into())],
            ]
        );
    }

    #[test]
    fn test_empty_parens_have_no_arguments() {
        assert!(args_of("x: @index();").is_empty());
    }

    #[test]
    fn test_nested_brackets_copied() {
        let args = args_of("color: @pick(rgb(1, 2, 3), hsl(0 [a, b] 1));");
        assert_eq!(
            args,
            vec![
                vec![ArgumentNode::Text("rgb(1, 2, 3)".into())],
                vec![ArgumentNode::Text("hsl(0 [a, b] 1)".into())],
            ]
        );
    }

    #[test]
    fn test_quoted_arguments() {
        let args = args_of(r#"content: @pick('a,b', "it\"s");"#);
        assert_eq!(
            args,
            vec![
                vec![ArgumentNode::Text("a,b".into())],
                vec![ArgumentNode::Text(r#"it\"s"#.into())],
            ]
        );
    }

    #[test]
    fn test_mixed_group() {
        let args = args_of("x: @pick(  10px @rand(3) em , 1);");
        assert_eq!(
            args[0],
            vec![
                ArgumentNode::Text("10px ".into()),
                ArgumentNode::Call(call("rand", vec![vec![ArgumentNode::Number(3.0)]])),
                ArgumentNode::Text(" em".into()),
            ]
        );
        assert_eq!(args[1], vec![ArgumentNode::Number(1.0)]);
    }

    // ── Blocks ───────────────────────────────────────────────────────

    #[test]
    fn test_pseudo_block() {
        let tokens = parse(":doodle { width: 8em; }\n:after { content: ''; }").unwrap();
        let [Token::Pseudo(first), Token::Pseudo(second)] = tokens.as_slice() else {
            panic!("{tokens:?}");
        };
        assert_eq!(first.selector, ":doodle");
        assert_eq!(first.id, BlockId(0));
        assert_eq!(second.selector, ":after");
        assert_eq!(second.id, BlockId(1));
        assert_eq!(first.declarations[0].property, "width");
    }

    #[test]
    fn test_conditional_block() {
        let tokens = parse("@nth(1, 3) { color: red; :after { content: ''; } @even { x: 1; } }").unwrap();
        let [Token::Conditional(block)] = tokens.as_slice() else {
            panic!("{tokens:?}");
        };
        assert_eq!(block.name, "nth");
        assert_eq!(block.arguments.len(), 2);
        assert_eq!(block.tokens.len(), 3);
        assert!(matches!(&block.tokens[2], Token::Conditional(inner) if inner.name == "even"));
    }

    #[test]
    fn test_keyframes_block() {
        let tokens = parse("@keyframes spin {\n from { transform: rotate(0); }\n 0%, 100% { opacity: 1; }\n}").unwrap();
        let [Token::Keyframes(block)] = tokens.as_slice() else {
            panic!("{tokens:?}");
        };
        assert_eq!(block.name, "spin");
        assert_eq!(block.steps.len(), 2);
        assert_eq!(block.steps[0].selector, "from");
        assert_eq!(block.steps[1].selector, "0%,100%");
        assert_eq!(keyframes_names(&tokens), ["spin"]);
    }

    #[test]
    fn test_comments() {
        let tokens = parse("/* a */ width: 1px; # b\n// c\n").unwrap();
        assert!(matches!(&tokens[0], Token::Comment(c) if c == " a "));
        assert!(matches!(&tokens[2], Token::Comment(c) if c == " b"));
        assert!(matches!(&tokens[3], Token::Comment(c) if c == " c"));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = parse("width: 1px; /* never closed").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_stray_semicolons_skipped() {
        let tokens = parse(";width: 1px;; @even { ; color: red;; }; :after { ;x: 1; };").unwrap();
        let [Token::Declaration(d), Token::Conditional(block), Token::Pseudo(pseudo)] =
            tokens.as_slice()
        else {
            panic!("{tokens:?}");
        };
        assert_eq!(d.property, "width");
        assert_eq!(block.tokens.len(), 1);
        assert_eq!(pseudo.declarations.len(), 1);

        let tokens = parse("@keyframes k { ; to { opacity: 0;; }; }").unwrap();
        let [Token::Keyframes(k)] = tokens.as_slice() else {
            panic!("{tokens:?}");
        };
        assert_eq!(k.steps.len(), 1);
        assert_eq!(k.steps[0].declarations.len(), 1);
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn test_space_inside_property_name() {
        let err = parse("wid th: 1px;").unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::BadPropertyName, 1, 4));

        let err = parse("a: 1;\n  wid \t th: 1px;").unwrap_err();
        assert_eq!((err.line, err.column), (2, 6));
    }

    #[test]
    fn test_error_position_on_later_line() {
        let err = parse("width: 1px;\n  co!or: red;").unwrap_err();
        assert_eq!((err.line, err.column), (2, 5));
    }

    #[test]
    fn test_colon_in_value() {
        assert_eq!(error_kind("color: a:b;"), ParseErrorKind::UnexpectedColon);
    }

    #[test]
    fn test_missing_keyframes_name() {
        assert_eq!(error_kind("@keyframes { from {} }"), ParseErrorKind::MissingKeyframesName);
    }

    #[test]
    fn test_unclosed_inputs() {
        assert_eq!(error_kind("@even { color: red;"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(error_kind("x: @rand(1, 2;"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(error_kind(":after { x: 1"), ParseErrorKind::UnexpectedEnd);
        assert_eq!(error_kind("width"), ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn test_conditional_without_block() {
        assert_eq!(error_kind("@even color: red;"), ParseErrorKind::ExpectedBlock);
    }
}

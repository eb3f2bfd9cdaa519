//! Rule-level parsing: the stylesheet walk that builds [`AstNode`] trees.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#parsing>

use crate::value::parse_value;
use crate::{AstNode, strip_quotes};
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;

/// What the body being parsed may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ctx {
    /// Style rules and at-rules (top level, `@media`/`@supports` bodies).
    Rules,
    /// Keyframe rules (`@keyframes` bodies).
    Keyframes,
    /// Declarations only (style rule, `@font-face`, margin box bodies).
    Declarations,
    /// Declarations plus margin-box at-rules (`@page` bodies).
    Page,
}

/// One parser for every body kind; `ctx` selects what a prelude means.
struct NodeParser {
    ctx: Ctx,
}

/// Parse a full stylesheet into its node tree.
///
/// Rule-level syntax errors do not abort the sheet: the offending slice is
/// kept as [`AstNode::Unknown`] and parsing continues with the next rule.
#[must_use]
pub fn parse_stylesheet(css: &str) -> Vec<AstNode> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = NodeParser { ctx: Ctx::Rules };
    let mut nodes = Vec::new();
    for rule in StyleSheetParser::new(&mut parser, &mut top) {
        match rule {
            Ok(node) => nodes.push(node),
            Err((_, slice)) => push_unknown(&mut nodes, slice),
        }
    }
    nodes
}

/// Parse a rule body in the given context.
fn parse_nodes(input: &mut Parser<'_, '_>, ctx: Ctx) -> Vec<AstNode> {
    let mut nested = NodeParser { ctx };
    let mut nodes = Vec::new();
    for item in CssRuleBodyParser::new(input, &mut nested) {
        match item {
            Ok(node) => nodes.push(node),
            Err((_, slice)) => push_unknown(&mut nodes, slice),
        }
    }
    nodes
}

fn push_unknown(nodes: &mut Vec<AstNode>, slice: &str) {
    let trimmed = slice.trim();
    if !trimmed.is_empty() {
        nodes.push(AstNode::Unknown(trimmed.to_owned()));
    }
}

/// Consume the rest of the current input, returning its raw text.
fn consume_raw(input: &mut Parser<'_, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Parse `!important` at the end of a value, returning the value text
/// without it and the flag.
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(pos) = trimmed.rfind('!')
        && let Some(tail) = trimmed.get(pos + 1..)
        && tail.trim().eq_ignore_ascii_case("important")
        && let Some(head) = trimmed.get(..pos)
    {
        return (head.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// Split a media query prelude on commas into trimmed query strings.
fn split_queries(prelude: &str) -> Vec<String> {
    prelude
        .split(',')
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Pull the target and trailing query list out of an `@import` prelude.
fn parse_import_prelude(text: &str) -> (String, Vec<String>) {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let Ok(uri) = parser.expect_url_or_string().map(|url| url.to_string()) else {
        return (text.trim().to_owned(), Vec::new());
    };
    let rest = consume_raw(&mut parser);
    (uri, split_queries(&rest))
}

impl<'i> CssQualifiedRuleParser<'i> for NodeParser {
    type Prelude = String;
    type QualifiedRule = AstNode;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        match self.ctx {
            Ctx::Rules | Ctx::Keyframes => Ok(consume_raw(input)),
            Ctx::Declarations | Ctx::Page => {
                Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
            }
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        match self.ctx {
            Ctx::Rules => Ok(AstNode::Rule {
                selectors: css_selectors::parse_selector_list(&prelude),
                children: parse_nodes(input, Ctx::Declarations),
            }),
            Ctx::Keyframes => Ok(AstNode::KeyframeRule {
                offsets: prelude,
                children: parse_nodes(input, Ctx::Declarations),
            }),
            Ctx::Declarations | Ctx::Page => {
                Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
            }
        }
    }
}

impl<'i> CssAtRuleParser<'i> for NodeParser {
    type Prelude = (String, String);
    type AtRule = AstNode;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok((name.to_ascii_lowercase(), consume_raw(input)))
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        let (name, text) = prelude;
        Ok(match name.as_str() {
            "charset" => AstNode::Charset(strip_quotes(&text).to_owned()),
            "import" => {
                let (uri, query) = parse_import_prelude(&text);
                AstNode::Import { uri, query }
            }
            "namespace" => AstNode::Directive {
                name,
                value: text,
                children: Vec::new(),
            },
            _ => AstNode::Unknown(format!("@{name} {text}")),
        })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let (name, text) = prelude;
        // Inside @page, every block at-rule is a margin box.
        if self.ctx == Ctx::Page {
            return Ok(AstNode::Directive {
                name,
                value: text,
                children: parse_nodes(input, Ctx::Declarations),
            });
        }
        Ok(match name.as_str() {
            "media" => AstNode::Media {
                queries: split_queries(&text),
                children: parse_nodes(input, Ctx::Rules),
            },
            "supports" => AstNode::Supports {
                condition: text,
                children: parse_nodes(input, Ctx::Rules),
            },
            "keyframes" => AstNode::Directive {
                name,
                value: text,
                children: parse_nodes(input, Ctx::Keyframes),
            },
            "font-face" => AstNode::Directive {
                name,
                value: text,
                children: parse_nodes(input, Ctx::Declarations),
            },
            "page" => AstNode::Directive {
                name,
                value: text,
                children: parse_nodes(input, Ctx::Page),
            },
            _ => {
                // Consume the body so parsing can continue past it.
                consume_raw(input);
                AstNode::Unknown(format!("@{name} {text}"))
            }
        })
    }
}

impl<'i> CssDeclarationParser<'i> for NodeParser {
    type Declaration = AstNode;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let raw = consume_raw(input);
        let (value, important) = split_important_tail(&raw);
        let parsed = parse_value(&value);
        Ok(AstNode::Property {
            name: name.to_ascii_lowercase(),
            value,
            important,
            parsed,
        })
    }
}

impl<'i> CssRuleBodyItemParser<'i, AstNode, ()> for NodeParser {
    fn parse_declarations(&self) -> bool {
        matches!(self.ctx, Ctx::Declarations | Ctx::Page)
    }

    fn parse_qualified(&self) -> bool {
        matches!(self.ctx, Ctx::Rules | Ctx::Keyframes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueNode;

    #[test]
    fn style_rule_with_declarations() {
        let nodes = parse_stylesheet("a { color: red; margin: 0 }");
        assert_eq!(nodes.len(), 1);
        let AstNode::Rule {
            selectors,
            children,
        } = &nodes[0]
        else {
            panic!("expected rule");
        };
        assert_eq!(selectors.len(), 1);
        assert_eq!(children.len(), 2);
        let AstNode::Property {
            name,
            value,
            important,
            ..
        } = &children[0]
        else {
            panic!("expected property");
        };
        assert_eq!(name, "color");
        assert_eq!(value, "red");
        assert!(!important);
    }

    #[test]
    fn important_tail_is_split_off() {
        let nodes = parse_stylesheet("a { color: red !important }");
        let AstNode::Rule { children, .. } = &nodes[0] else {
            panic!("expected rule");
        };
        let AstNode::Property {
            value, important, ..
        } = &children[0]
        else {
            panic!("expected property");
        };
        assert_eq!(value, "red");
        assert!(*important);
    }

    #[test]
    fn media_splits_queries_and_nests() {
        let nodes = parse_stylesheet("@media screen, print { a { x: 1 } }");
        let AstNode::Media { queries, children } = &nodes[0] else {
            panic!("expected media");
        };
        assert_eq!(queries, &["screen".to_owned(), "print".to_owned()]);
        assert!(matches!(children[0], AstNode::Rule { .. }));
    }

    #[test]
    fn keyframes_become_directive_with_keyframe_rules() {
        let nodes = parse_stylesheet("@keyframes slide { from { top: 0 } 50% { top: 5px } }");
        let AstNode::Directive {
            name,
            value,
            children,
        } = &nodes[0]
        else {
            panic!("expected directive");
        };
        assert_eq!(name, "keyframes");
        assert_eq!(value, "slide");
        assert_eq!(children.len(), 2);
        assert!(matches!(
            &children[0],
            AstNode::KeyframeRule { offsets, .. } if offsets == "from"
        ));
    }

    #[test]
    fn charset_and_import_without_blocks() {
        let nodes = parse_stylesheet("@charset \"UTF-8\"; @import url(\"base.css\") screen;");
        assert_eq!(nodes[0], AstNode::Charset("UTF-8".to_owned()));
        let AstNode::Import { uri, query } = &nodes[1] else {
            panic!("expected import");
        };
        assert_eq!(uri, "base.css");
        assert_eq!(query, &["screen".to_owned()]);
    }

    #[test]
    fn page_margin_boxes_are_directives() {
        let nodes =
            parse_stylesheet("@page wide { size: a4; @top-left-corner { content: \"x\" } }");
        let AstNode::Directive {
            name,
            value,
            children,
        } = &nodes[0]
        else {
            panic!("expected directive");
        };
        assert_eq!(name, "page");
        assert_eq!(value, "wide");
        assert!(matches!(children[0], AstNode::Property { .. }));
        assert!(matches!(
            &children[1],
            AstNode::Directive { name, .. } if name == "top-left-corner"
        ));
    }

    #[test]
    fn unknown_at_rules_are_kept_as_raw_text() {
        let nodes = parse_stylesheet("@layer base { a { x: 1 } } a { y: 2 }");
        assert!(matches!(&nodes[0], AstNode::Unknown(text) if text.starts_with("@layer")));
        assert!(matches!(nodes[1], AstNode::Rule { .. }));
    }

    #[test]
    fn supports_keeps_condition_text() {
        let nodes = parse_stylesheet("@supports (display: grid) { a { x: 1 } }");
        let AstNode::Supports {
            condition,
            children,
        } = &nodes[0]
        else {
            panic!("expected supports");
        };
        assert_eq!(condition, "(display: grid)");
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn value_tree_rides_on_properties() {
        let nodes = parse_stylesheet("a { background: url(a.png) }");
        let AstNode::Rule { children, .. } = &nodes[0] else {
            panic!("expected rule");
        };
        let AstNode::Property { parsed, .. } = &children[0] else {
            panic!("expected property");
        };
        assert_eq!(parsed, &Some(ValueNode::Url("a.png".to_owned())));
    }
}

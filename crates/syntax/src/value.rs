//! Declaration value parsing into a small value tree.
//! Spec: <https://www.w3.org/TR/css-values-3/>

use cssparser::{ParseError, Parser, ParserInput, Token};

/// A parsed declaration value.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueNode {
    /// A single component kept as raw text (`10px`, `red`, `"Open Sans"`).
    Literal(String),
    /// Two or more components; space- and comma-separated alike.
    List(Vec<ValueNode>),
    /// A function call with comma-separated arguments.
    Function { name: String, args: Vec<ValueNode> },
    /// A `url(...)` reference; the inner text, quotes preserved as written.
    Url(String),
}

/// Parse a declaration value string. Returns `None` when the text contains
/// no components at all.
#[must_use]
pub fn parse_value(text: &str) -> Option<ValueNode> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut components = Vec::new();
    for group in collect_comma_groups(&mut parser) {
        components.extend(group);
    }
    match components.len() {
        0 => None,
        1 => components.pop(),
        _ => Some(ValueNode::List(components)),
    }
}

/// Collect value components grouped by top-level commas.
fn collect_comma_groups(parser: &mut Parser<'_, '_>) -> Vec<Vec<ValueNode>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    loop {
        parser.skip_whitespace();
        let start = parser.position();
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Comma => {
                groups.push(core::mem::take(&mut current));
            }
            Token::Function(name) => {
                let name = name.to_string();
                let args: Vec<ValueNode> = parser
                    .parse_nested_block(|block| {
                        Ok::<_, ParseError<'_, ()>>(
                            collect_comma_groups(block)
                                .into_iter()
                                .filter_map(group_to_node)
                                .collect(),
                        )
                    })
                    .unwrap_or_default();
                if name.eq_ignore_ascii_case("url") {
                    // `url("x")` tokenizes as a function with one string arg.
                    let inner = match args.first() {
                        Some(ValueNode::Literal(text)) => text.clone(),
                        _ => String::new(),
                    };
                    current.push(ValueNode::Url(inner));
                } else {
                    current.push(ValueNode::Function { name, args });
                }
            }
            Token::UnquotedUrl(target) => {
                current.push(ValueNode::Url(target.to_string()));
            }
            _ => {
                let raw = parser.slice_from(start).trim();
                if !raw.is_empty() {
                    current.push(ValueNode::Literal(raw.to_owned()));
                }
            }
        }
    }
    groups.push(current);
    groups
}

/// Reduce one comma group to a node: none for empty, the sole component,
/// or a list.
fn group_to_node(mut group: Vec<ValueNode>) -> Option<ValueNode> {
    match group.len() {
        0 => None,
        1 => group.pop(),
        _ => Some(ValueNode::List(group)),
    }
}

//! CSS Syntax Module Level 3 — parsing into the evaluation tree.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Built on `cssparser`. The output is a tree of [`AstNode`] values with one
//! arm per construct the evaluation engine handles; anything else survives
//! as [`AstNode::Unknown`] so a sheet with exotic rules still parses.

#![forbid(unsafe_code)]

mod rules;
mod value;

pub use rules::parse_stylesheet;
pub use value::{ValueNode, parse_value};

use css_selectors::ComplexSelector;

/// A parsed stylesheet node.
#[derive(Clone, Debug, PartialEq)]
pub enum AstNode {
    /// A style rule: comma-separated complex selectors and a declaration
    /// body.
    Rule {
        selectors: Vec<ComplexSelector>,
        children: Vec<AstNode>,
    },
    /// A declaration. `value` is the raw text with any `!important` tail
    /// removed; `parsed` is its value tree, absent when the text had no
    /// components.
    Property {
        name: String,
        value: String,
        important: bool,
        parsed: Option<ValueNode>,
    },
    /// `@media` with its resolved query list.
    Media {
        queries: Vec<String>,
        children: Vec<AstNode>,
    },
    /// `@supports` with the raw condition text.
    Supports {
        condition: String,
        children: Vec<AstNode>,
    },
    /// A named at-rule the engine dispatches on (`keyframes`, `namespace`,
    /// `page`, `font-face`, and `@page` margin boxes).
    Directive {
        name: String,
        value: String,
        children: Vec<AstNode>,
    },
    /// One rule inside `@keyframes`: the raw offset list and declarations.
    KeyframeRule {
        offsets: String,
        children: Vec<AstNode>,
    },
    /// `@charset`, unquoted.
    Charset(String),
    /// `@import` with its target and optional media query list.
    Import { uri: String, query: Vec<String> },
    /// Anything unrecognized, kept as raw text.
    Unknown(String),
}

/// Strip one layer of matching single or double quotes.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    let trimmed = text.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed.strip_prefix(quote)
            && let Some(inner) = inner.strip_suffix(quote)
        {
            return inner;
        }
    }
    trimmed
}

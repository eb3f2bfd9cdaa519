//! The comparable value model.
//!
//! A [`Value`] wraps one parsed declaration value together with its
//! `!important` flag. Equality is semantic: colors compare by their RGBA
//! channels whatever notation spelled them, strings compare after quote
//! normalization, and URLs compare after quote and `./` stripping.

use css_syntax::{ValueNode, strip_quotes};
use css_values::{Rgba, color_from_function, color_from_literal, is_color_function};

/// A declaration value bound to one condition.
#[derive(Clone, Debug)]
pub enum Value {
    Literal {
        text: String,
        important: bool,
    },
    List {
        items: Vec<Value>,
        important: bool,
    },
    Function {
        name: String,
        args: Vec<Value>,
        important: bool,
    },
    Url {
        target: String,
        important: bool,
    },
}

impl Value {
    /// Build a value from its parsed tree. The flag applies to the whole
    /// declaration; nested items never carry it individually.
    #[must_use]
    pub fn from_node(node: &ValueNode, important: bool) -> Self {
        match node {
            ValueNode::Literal(text) => Self::Literal {
                text: text.clone(),
                important,
            },
            ValueNode::List(items) => Self::List {
                items: items.iter().map(|item| Self::from_node(item, false)).collect(),
                important,
            },
            ValueNode::Function { name, args } => Self::Function {
                name: name.clone(),
                args: args.iter().map(|arg| Self::from_node(arg, false)).collect(),
                important,
            },
            ValueNode::Url(target) => Self::Url {
                target: target.clone(),
                important,
            },
        }
    }

    /// The `!important` flag of this binding.
    #[must_use]
    pub const fn important(&self) -> bool {
        match self {
            Self::Literal { important, .. }
            | Self::List { important, .. }
            | Self::Function { important, .. }
            | Self::Url { important, .. } => *important,
        }
    }

    /// The color this value denotes, when it is color-recognizable: a named
    /// keyword, a hex pattern, or an `rgb`/`rgba`/`hsl`/`hsla` call.
    #[must_use]
    pub fn color(&self) -> Option<Rgba> {
        match self {
            Self::Literal { text, .. } => color_from_literal(text),
            Self::Function { name, args, .. } if is_color_function(name) => {
                color_from_function(name, &flatten_components(args)?)
            }
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.important() != other.important() {
            return false;
        }
        // Colors compare across notations, including literal vs function.
        if let (Some(a), Some(b)) = (self.color(), other.color()) {
            return a == b;
        }
        match (self, other) {
            (Self::Literal { text: a, .. }, Self::Literal { text: b, .. }) => {
                normalize_literal(a) == normalize_literal(b)
            }
            (Self::List { items: a, .. }, Self::List { items: b, .. }) => {
                a.len() == b.len() && a.iter().zip(b).all(|(lhs, rhs)| lhs == rhs)
            }
            (
                Self::Function {
                    name: name_a,
                    args: args_a,
                    ..
                },
                Self::Function {
                    name: name_b,
                    args: args_b,
                    ..
                },
            ) => {
                name_a.eq_ignore_ascii_case(name_b)
                    && args_a.len() == args_b.len()
                    && args_a.iter().zip(args_b).all(|(lhs, rhs)| lhs == rhs)
            }
            (Self::Url { target: a, .. }, Self::Url { target: b, .. }) => {
                normalize_url(a) == normalize_url(b)
            }
            _ => false,
        }
    }
}

/// Strip wrapping quotes and unify inner quote characters.
fn normalize_literal(text: &str) -> String {
    strip_quotes(text).replace('\'', "\"")
}

/// Strip quotes and a leading `./` from a URL target.
fn normalize_url(target: &str) -> &str {
    let stripped = strip_quotes(target);
    stripped.strip_prefix("./").unwrap_or(stripped)
}

/// Collect the plain component strings of a color function's arguments;
/// a single space-separated argument group contributes its members.
fn flatten_components(args: &[Value]) -> Option<Vec<String>> {
    let mut out = Vec::new();
    for arg in args {
        match arg {
            Value::Literal { text, .. } => out.push(text.clone()),
            Value::List { items, .. } => {
                for item in items {
                    let Value::Literal { text, .. } = item else {
                        return None;
                    };
                    out.push(text.clone());
                }
            }
            _ => return None,
        }
    }
    Some(out)
}

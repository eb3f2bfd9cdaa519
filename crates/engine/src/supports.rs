//! `@supports` entries.
//! Spec: <https://www.w3.org/TR/css-conditional-3/#at-supports>

use crate::engine::Engine;
use crate::maps::map_eq;
use std::collections::HashMap;

/// A group of `@supports` rules sharing a grouping name. Each canonicalized
/// condition owns a nested engine model built from the rule bodies seen
/// under it.
#[derive(Clone, Debug)]
pub struct Supports {
    pub name: String,
    pub rules: HashMap<String, Engine>,
}

impl Supports {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            rules: HashMap::new(),
        }
    }

    /// Record a nested model under its condition, merging entity-wise with
    /// any model already stored for the same condition.
    pub fn add_rule(&mut self, condition: String, nested: Engine) {
        if let Some(existing) = self.rules.get_mut(&condition) {
            existing.absorb(&nested);
        } else {
            self.rules.insert(condition, nested);
        }
    }

    /// Absorb another group with the same name.
    pub fn merge(&mut self, other: &Self) {
        for (condition, nested) in &other.rules {
            self.add_rule(condition.clone(), nested.clone());
        }
    }
}

impl PartialEq for Supports {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && map_eq(&self.rules, &other.rules)
    }
}

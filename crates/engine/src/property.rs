//! Properties and the per-condition cascade.

use crate::conditions::ALL;
use crate::maps::map_eq;
use crate::value::Value;
use std::collections::HashMap;

/// One property of a selector: a name and its value bindings, at most one
/// per condition.
#[derive(Clone, Debug)]
pub struct Property {
    pub name: String,
    pub bindings: HashMap<String, Value>,
}

impl Property {
    /// Bind `value` under every condition in the list; the default
    /// condition list is `[all]`.
    #[must_use]
    pub fn new(name: &str, conditions: &[String], value: &Value) -> Self {
        let mut bindings = HashMap::new();
        if conditions.is_empty() {
            bindings.insert(ALL.to_owned(), value.clone());
        }
        for condition in conditions {
            bindings.insert(condition.clone(), value.clone());
        }
        Self {
            name: name.to_owned(),
            bindings,
        }
    }

    /// Apply a later declaration of the same property.
    ///
    /// For each incoming binding, in order: a fresh condition stores
    /// directly unless an important `all` binding guards it; an important
    /// `all` binding wins over non-important incoming values (the global is
    /// cloned into the condition) but yields to important ones; an existing
    /// binding is replaced when the incoming one is important or the
    /// existing one is not — equal priority means later wins.
    pub fn merge(&mut self, other: &Self) {
        for (condition, value) in &other.bindings {
            let has_binding = self.bindings.contains_key(condition);
            let important_global = self.bindings.get(ALL).is_some_and(Value::important);
            if !has_binding && !important_global {
                self.bindings.insert(condition.clone(), value.clone());
                continue;
            }
            if important_global && condition != ALL {
                let winner = if value.important() {
                    value.clone()
                } else if let Some(global) = self.bindings.get(ALL) {
                    global.clone()
                } else {
                    continue;
                };
                self.bindings.insert(condition.clone(), winner);
                continue;
            }
            if let Some(old) = self.bindings.get(condition)
                && (value.important() || !old.important())
            {
                self.bindings.insert(condition.clone(), value.clone());
            }
        }
    }

    /// Merge `incoming` into a property map, growing the entry for its name.
    pub(crate) fn merge_into(map: &mut HashMap<String, Self>, incoming: Self) {
        if let Some(existing) = map.get_mut(&incoming.name) {
            existing.merge(&incoming);
        } else {
            map.insert(incoming.name.clone(), incoming);
        }
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && map_eq(&self.bindings, &other.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_value;

    fn value(text: &str, important: bool) -> Value {
        Value::from_node(&parse_value(text).expect("value"), important)
    }

    fn all() -> Vec<String> {
        vec![ALL.to_owned()]
    }

    #[test]
    fn later_plain_declaration_wins() {
        let mut prop = Property::new("color", &all(), &value("red", false));
        prop.merge(&Property::new("color", &all(), &value("blue", false)));
        assert_eq!(prop.bindings[ALL], value("blue", false));
    }

    #[test]
    fn important_resists_plain_override() {
        let mut prop = Property::new("color", &all(), &value("red", true));
        prop.merge(&Property::new("color", &all(), &value("blue", false)));
        assert_eq!(prop.bindings[ALL], value("red", true));
    }

    #[test]
    fn later_important_beats_earlier_important() {
        let mut prop = Property::new("color", &all(), &value("red", true));
        prop.merge(&Property::new("color", &all(), &value("blue", true)));
        assert_eq!(prop.bindings[ALL], value("blue", true));
    }

    #[test]
    fn important_global_clones_into_new_condition() {
        let mut prop = Property::new("color", &all(), &value("red", true));
        let conditional = vec!["screen".to_owned()];
        prop.merge(&Property::new("color", &conditional, &value("blue", false)));
        assert_eq!(prop.bindings["screen"], value("red", true));
    }

    #[test]
    fn important_conditional_overrides_important_global_for_its_condition() {
        let mut prop = Property::new("color", &all(), &value("red", true));
        let conditional = vec!["screen".to_owned()];
        prop.merge(&Property::new("color", &conditional, &value("blue", true)));
        assert_eq!(prop.bindings["screen"], value("blue", true));
        assert_eq!(prop.bindings[ALL], value("red", true));
    }

    #[test]
    fn distinct_conditions_accumulate() {
        let mut prop = Property::new("color", &vec!["screen".to_owned()], &value("red", false));
        prop.merge(&Property::new(
            "color",
            &vec!["print".to_owned()],
            &value("blue", false),
        ));
        assert_eq!(prop.bindings.len(), 2);
    }
}

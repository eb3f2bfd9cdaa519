//! `@keyframes` entries.
//! Spec: <https://www.w3.org/TR/css-animations-1/#keyframes>

use crate::maps::map_eq;
use crate::property::Property;
use crate::value::Value;
use std::collections::HashMap;

/// Normalize a keyframe offset: `from` is `0%`, `to` is `100%`.
#[must_use]
pub fn normalize_offset(raw: &str) -> String {
    let lowered = raw.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "from" => "0%".to_owned(),
        "to" => "100%".to_owned(),
        _ => lowered,
    }
}

/// One keyframe: a normalized offset and its properties.
#[derive(Clone, Debug)]
pub struct KeyframesSelector {
    pub offset: String,
    pub properties: HashMap<String, Property>,
}

impl KeyframesSelector {
    #[must_use]
    pub fn new(raw_offset: &str) -> Self {
        Self {
            offset: normalize_offset(raw_offset),
            properties: HashMap::new(),
        }
    }

    pub fn add_property(&mut self, name: &str, conditions: &[String], value: &Value) {
        Property::merge_into(&mut self.properties, Property::new(name, conditions, value));
    }
}

impl PartialEq for KeyframesSelector {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && map_eq(&self.properties, &other.properties)
    }
}

/// A named animation: per condition, a map from offset to keyframe.
#[derive(Clone, Debug)]
pub struct Keyframes {
    pub name: String,
    pub rules: HashMap<String, HashMap<String, KeyframesSelector>>,
}

impl Keyframes {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            rules: HashMap::new(),
        }
    }

    /// Absorb a later `@keyframes` declaration for the same name. Within
    /// one condition the later declaration replaces the earlier wholesale;
    /// keyframes never merge across declarations.
    pub fn merge(&mut self, other: &Self) {
        for (condition, offsets) in &other.rules {
            self.rules.insert(condition.clone(), offsets.clone());
        }
    }
}

impl PartialEq for Keyframes {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.rules.len() == other.rules.len()
            && self.rules.iter().all(|(condition, offsets)| {
                other
                    .rules
                    .get(condition)
                    .is_some_and(|theirs| map_eq(offsets, theirs))
            })
    }
}

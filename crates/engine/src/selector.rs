//! Selector entries in the component store.

use crate::maps::map_eq;
use crate::property::Property;
use crate::value::Value;
use std::collections::HashMap;

/// One selector entry, identified by its canonical name.
#[derive(Clone, Debug)]
pub struct Selector {
    pub canonical_name: String,
    pub properties: HashMap<String, Property>,
}

impl Selector {
    #[must_use]
    pub fn new(canonical_name: String) -> Self {
        Self {
            canonical_name,
            properties: HashMap::new(),
        }
    }

    /// Add one declaration under the given conditions, cascading against
    /// anything already stored.
    pub fn add_property(&mut self, name: &str, conditions: &[String], value: &Value) {
        Property::merge_into(&mut self.properties, Property::new(name, conditions, value));
    }

    /// Absorb another entry with the same canonical name.
    pub fn merge(&mut self, other: &Self) {
        for property in other.properties.values() {
            Property::merge_into(&mut self.properties, property.clone());
        }
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.canonical_name == other.canonical_name && map_eq(&self.properties, &other.properties)
    }
}

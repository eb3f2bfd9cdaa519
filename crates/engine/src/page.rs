//! `@page` selectors and margin boxes.
//! Spec: <https://www.w3.org/TR/css-page-3/>

use crate::maps::map_eq;
use crate::property::Property;
use crate::value::Value;
use std::collections::HashMap;

/// The synthetic margin symbol for declarations outside any margin box.
pub const ALL_MARGIN: &str = "@all";

/// Media terms that make a `size` declaration layout-dependent; `size`
/// bindings under such conditions are ignored.
/// Spec: <https://www.w3.org/TR/css-page-3/#page-size-prop>
const LAYOUT_TERMS: [&str; 4] = ["width", "height", "aspect-ratio", "orientation"];

/// A margin box: a named bag of properties, like a selector entry, except
/// that layout-qualified `size` bindings are dropped on the way in.
#[derive(Clone, Debug)]
pub struct MarginBox {
    pub name: String,
    pub properties: HashMap<String, Property>,
}

impl MarginBox {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name,
            properties: HashMap::new(),
        }
    }

    pub fn add_property(&mut self, name: &str, conditions: &[String], value: &Value) {
        let conditions = if name == "size" {
            let kept: Vec<String> = conditions
                .iter()
                .filter(|condition| !mentions_layout_term(condition))
                .cloned()
                .collect();
            if kept.is_empty() {
                return;
            }
            kept
        } else {
            conditions.to_vec()
        };
        Property::merge_into(&mut self.properties, Property::new(name, &conditions, value));
    }

    pub fn merge(&mut self, other: &Self) {
        for property in other.properties.values() {
            Property::merge_into(&mut self.properties, property.clone());
        }
    }
}

impl PartialEq for MarginBox {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && map_eq(&self.properties, &other.properties)
    }
}

fn mentions_layout_term(condition: &str) -> bool {
    LAYOUT_TERMS.iter().any(|term| condition.contains(term))
}

/// One `@page` rule instance for a single page selector.
#[derive(Clone, Debug)]
pub struct PageSelector {
    pub page_selector: String,
    pub margin_boxes: HashMap<String, MarginBox>,
}

impl PageSelector {
    #[must_use]
    pub fn new(page_selector: String) -> Self {
        Self {
            page_selector,
            margin_boxes: HashMap::new(),
        }
    }

    /// Add a declaration outside any margin box; it lands on the synthetic
    /// `@all` margin. A declaration dropped entirely by the margin-box
    /// filter leaves no empty `@all` box behind.
    pub fn add_property(&mut self, name: &str, conditions: &[String], value: &Value) {
        let entry = self
            .margin_boxes
            .entry(ALL_MARGIN.to_owned())
            .or_insert_with(|| MarginBox::new(ALL_MARGIN.to_owned()));
        entry.add_property(name, conditions, value);
        if entry.properties.is_empty() {
            self.margin_boxes.remove(ALL_MARGIN);
        }
    }

    /// Attach or grow a margin box.
    pub fn add_margin_box(&mut self, margin_box: MarginBox) {
        if let Some(existing) = self.margin_boxes.get_mut(&margin_box.name) {
            existing.merge(&margin_box);
        } else {
            self.margin_boxes.insert(margin_box.name.clone(), margin_box);
        }
    }

    /// Absorb another instance for the same page selector.
    pub fn merge(&mut self, other: &Self) {
        for margin_box in other.margin_boxes.values() {
            self.add_margin_box(margin_box.clone());
        }
    }
}

impl PartialEq for PageSelector {
    fn eq(&self, other: &Self) -> bool {
        self.page_selector == other.page_selector
            && map_eq(&self.margin_boxes, &other.margin_boxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::ALL;
    use css_syntax::parse_value;

    fn value(text: &str) -> Value {
        Value::from_node(&parse_value(text).expect("value"), false)
    }

    #[test]
    fn loose_declarations_land_on_the_all_margin() {
        let mut page = PageSelector::new("wide".to_owned());
        page.add_property("margin", &[ALL.to_owned()], &value("1cm"));
        assert!(page.margin_boxes.contains_key(ALL_MARGIN));
    }

    #[test]
    fn size_under_layout_condition_is_dropped() {
        let mut margin_box = MarginBox::new(ALL_MARGIN.to_owned());
        margin_box.add_property(
            "size",
            &["(orientation:landscape)".to_owned()],
            &value("a4"),
        );
        assert!(margin_box.properties.is_empty());
    }

    #[test]
    fn size_keeps_only_layout_free_conditions() {
        let mut margin_box = MarginBox::new(ALL_MARGIN.to_owned());
        margin_box.add_property(
            "size",
            &["screen".to_owned(), "(min-width:10px)".to_owned()],
            &value("a4"),
        );
        let bindings = &margin_box.properties["size"].bindings;
        assert!(bindings.contains_key("screen"));
        assert!(!bindings.contains_key("(min-width:10px)"));
    }

    #[test]
    fn other_properties_are_unfiltered() {
        let mut margin_box = MarginBox::new(ALL_MARGIN.to_owned());
        margin_box.add_property("margin", &["(min-width:10px)".to_owned()], &value("0"));
        assert!(margin_box.properties.contains_key("margin"));
    }
}

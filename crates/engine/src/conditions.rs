//! Condition strings and the condition stack.
//!
//! A condition is the textual media/supports context under which a
//! declaration is active. Conditions are compared after canonicalization
//! but their boolean logic is never evaluated; nesting is encoded with a
//! `>` separator instead.

/// The default condition when none applies.
pub const ALL: &str = "all";

/// Canonicalize a condition: collapse whitespace runs, drop `!important`
/// noise, and tighten spacing around `:` so `(min-width: 100px)` and
/// `(min-width:100px)` read the same.
#[must_use]
pub fn canonical_condition(text: &str) -> String {
    let mut collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    loop {
        let lowered = collapsed.to_ascii_lowercase();
        let Some(pos) = lowered.find("!important") else {
            break;
        };
        collapsed.replace_range(pos..pos + "!important".len(), "");
    }
    let tightened = collapsed.replace(" :", ":").replace(": ", ":");
    tightened.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonicalize a media query: conditions plus ASCII lowercasing, since
/// media types and features are case-insensitive.
#[must_use]
pub fn canonical_query(text: &str) -> String {
    canonical_condition(&text.to_ascii_lowercase())
}

/// Compose a parent condition stack with the query list of a nested
/// conditional group rule.
///
/// Every parent/child pair yields a product joined with ` > `; the literal
/// `all` is elided from products, and an empty child list behaves as
/// `all`. Duplicate products are dropped, preserving first appearance.
#[must_use]
pub fn compose(parents: &[String], children: &[String]) -> Vec<String> {
    let children: Vec<String> = if children.is_empty() {
        vec![ALL.to_owned()]
    } else {
        children.iter().map(|child| canonical_query(child)).collect()
    };
    let mut out: Vec<String> = Vec::new();
    for parent in parents {
        for child in &children {
            let product = if child == ALL {
                parent.clone()
            } else if parent == ALL {
                child.clone()
            } else {
                format!("{parent} > {child}")
            };
            if !out.contains(&product) {
                out.push(product);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|&item| item.to_owned()).collect()
    }

    #[test]
    fn whitespace_and_colon_spacing_collapse() {
        assert_eq!(
            canonical_condition("( min-width :  100px )"),
            canonical_condition("(min-width:100px)")
        );
    }

    #[test]
    fn important_noise_is_dropped() {
        assert_eq!(
            canonical_condition("(display: grid) !important"),
            "(display:grid)"
        );
    }

    #[test]
    fn queries_lowercase() {
        assert_eq!(canonical_query("SCREEN"), "screen");
    }

    #[test]
    fn all_is_elided_from_products() {
        assert_eq!(compose(&owned(&["all"]), &owned(&["screen"])), owned(&["screen"]));
        assert_eq!(compose(&owned(&["screen"]), &owned(&["all"])), owned(&["screen"]));
        assert_eq!(compose(&owned(&["all"]), &owned(&[])), owned(&["all"]));
    }

    #[test]
    fn nesting_uses_angle_separator() {
        assert_eq!(
            compose(&owned(&["screen"]), &owned(&["print", "(min-width: 10px)"])),
            owned(&["screen > print", "screen > (min-width:10px)"])
        );
    }

    #[test]
    fn products_deduplicate() {
        assert_eq!(
            compose(&owned(&["screen"]), &owned(&["all", "screen"])),
            owned(&["screen", "screen > screen"])
        );
        assert_eq!(
            compose(&owned(&["screen", "screen"]), &owned(&["all"])),
            owned(&["screen"])
        );
    }
}

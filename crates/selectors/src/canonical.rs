//! Canonical selector naming.
//!
//! Two selector texts that match the same elements for structural reasons
//! (duplicate simple selectors, reordering within one sequence) map to the
//! same canonical name. Combinators and the order of sequences are
//! preserved verbatim.

use crate::{ComplexSelector, SimpleMember, SimpleSequence};

/// Bucket order within a canonicalized sequence.
const UNIVERSAL: usize = 0;
const ELEMENT: usize = 1;
const ID: usize = 2;
const CLASS: usize = 3;
const PLACEHOLDER: usize = 4;
const PSEUDO: usize = 5;
const BUCKETS: usize = 6;

/// Produce the canonical name of a complex selector.
///
/// The result is deterministic and idempotent: feeding a canonical name back
/// through the selector parser and this function reproduces it unchanged.
#[must_use]
pub fn canonicalize(sel: &ComplexSelector) -> String {
    let mut parts: Vec<String> = Vec::new();
    let head = canonicalize_sequence(&sel.first);
    if !head.is_empty() {
        parts.push(head);
    }
    for (comb, seq) in &sel.rest {
        if let Some(token) = comb.as_token() {
            parts.push(token.to_owned());
        }
        let emitted = canonicalize_sequence(seq);
        if !emitted.is_empty() {
            parts.push(emitted);
        }
    }
    parts.join(" ")
}

/// Canonicalize one simple-selector sequence: bucketize members, glue
/// attribute members onto the member they follow, dedup and sort within
/// each bucket, then concatenate the buckets in fixed order.
fn canonicalize_sequence(seq: &SimpleSequence) -> String {
    let mut buckets: [Vec<String>; BUCKETS] = Default::default();
    let mut last_slot: Option<usize> = None;

    for member in &seq.members {
        let (bucket, token) = match member {
            SimpleMember::Universal => (UNIVERSAL, "*".to_owned()),
            SimpleMember::Element(name) => (ELEMENT, name.clone()),
            SimpleMember::Id(name) => (ID, format!("#{name}")),
            SimpleMember::Class(name) => (CLASS, format!(".{name}")),
            SimpleMember::Placeholder(name) => (PLACEHOLDER, format!("%{name}")),
            SimpleMember::Pseudo(text) => (PSEUDO, text.clone()),
            SimpleMember::Attribute(text) => {
                // Glue onto the preceding member's token so `div[a=b]` stays
                // one unit through dedup and sorting.
                if let Some(slot) = last_slot
                    && let Some(prev) = buckets[slot].last_mut()
                {
                    prev.push_str(text);
                } else {
                    buckets[ELEMENT].push(text.clone());
                    last_slot = Some(ELEMENT);
                }
                continue;
            }
        };
        buckets[bucket].push(token);
        last_slot = Some(bucket);
    }

    let mut out = String::new();
    for bucket in &mut buckets {
        bucket.sort();
        bucket.dedup();
        for token in bucket.iter() {
            out.push_str(token);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_complex_selector;

    fn canon(text: &str) -> String {
        canonicalize(&parse_complex_selector(text))
    }

    #[test]
    fn duplicate_members_collapse() {
        assert_eq!(canon(".a.b.a"), canon(".a.b"));
        assert_eq!(canon(".a.b.a"), ".a.b");
    }

    #[test]
    fn intra_sequence_order_is_erased() {
        assert_eq!(canon("div#id.x"), canon("div.x#id"));
        assert_eq!(canon("div#id.x"), "div#id.x");
    }

    #[test]
    fn descendant_order_is_preserved() {
        assert_ne!(canon(".a .b"), canon(".b .a"));
    }

    #[test]
    fn combinators_survive_verbatim() {
        assert_eq!(canon(".a  >  .b"), ".a > .b");
        assert_eq!(canon("li + li"), "li + li");
        assert_eq!(canon("h1 ~ p"), "h1 ~ p");
    }

    #[test]
    fn attribute_glues_to_preceding_member() {
        assert_eq!(canon("input[type='text']"), "input[type=\"text\"]");
        assert_eq!(canon("input[type=text].a.a"), "input[type=text].a");
    }

    #[test]
    fn idempotence() {
        for text in [".b.a.b", "div.x#id", "a > b c", "*[lang|=\"en\"]:hover"] {
            let once = canon(text);
            assert_eq!(canon(&once), once);
        }
    }

    #[test]
    fn class_ordering_is_lexicographic() {
        assert_eq!(canon(".z.a.m"), ".a.m.z");
    }
}

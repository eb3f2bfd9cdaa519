//! End-to-end equivalence over stylesheet sources.

use css_engine::compare_sources;

fn equal(a: &str, b: &str) -> bool {
    compare_sources(a, b).expect("comparison should succeed")
}

#[test]
fn reflexivity() {
    let sheet = "@charset \"UTF-8\";\n\
                 @namespace svg url(http://www.w3.org/2000/svg);\n\
                 a.link:hover { color: red !important }\n\
                 @media screen { .a .b { margin: 0 auto } }\n\
                 @keyframes k { from { top: 0 } to { top: 10px } }\n\
                 @font-face { font-family: Arial; src: url(a.woff) }\n\
                 @page wide { size: a4; @top-left-corner { content: \"x\" } }\n\
                 @supports (display: grid) { main { display: grid } }";
    assert!(equal(sheet, sheet));
}

#[test]
fn symmetry() {
    let a = "a { color: red } @media print { a { color: blue } }";
    let b = "a { color: #f00 }";
    assert_eq!(equal(a, b), equal(b, a));
    let c = "a { color: #ff0000 } @media print { a { color: blue } }";
    assert_eq!(equal(a, c), equal(c, a));
    assert!(equal(a, c));
}

#[test]
fn color_notation_is_erased() {
    assert!(equal("a { color: red }", "a { color: #ff0000 }"));
    assert!(equal("a { color: #FF0000 }", "a { color: #f00 }"));
    assert!(equal("a { color: red }", "a { color: rgb(255, 0, 0) }"));
    assert!(equal("a { color: rgb(255,0,0) }", "a { color: hsl(0, 100%, 50%) }"));
    assert!(!equal("a { color: red }", "a { color: blue }"));
}

#[test]
fn duplicate_selector_tokens_collapse() {
    assert!(equal(".a.b.a { x: 1 }", ".b.a { x: 1 }"));
}

#[test]
fn intra_sequence_order_is_erased_but_descendant_order_is_not() {
    assert!(equal("div#id.x { x: 1 }", "div.x#id { x: 1 }"));
    assert!(!equal(".a .b { x: 1 }", ".b .a { x: 1 }"));
}

#[test]
fn important_survives_a_later_plain_override() {
    assert!(equal(
        "p { c: red !important } p { c: blue }",
        "p { c: red !important }"
    ));
}

#[test]
fn later_important_overrides_earlier_important() {
    assert!(equal(
        "p { c: red !important } p { c: blue !important }",
        "p { c: blue !important }"
    ));
}

#[test]
fn later_plain_declaration_wins() {
    assert!(equal("p { c: red } p { c: blue }", "p { c: blue }"));
}

#[test]
fn an_extra_condition_binding_differs() {
    assert!(!equal(
        "@media screen { a { x: 1 } }",
        "@media screen { a { x: 1 } } @media print { a { x: 1 } }"
    ));
}

#[test]
fn keyframe_keywords_normalize_to_percentages() {
    assert!(equal(
        "@keyframes k { from { top: 0 } to { top: 10px } }",
        "@keyframes k { 0% { top: 0 } 100% { top: 10px } }"
    ));
}

#[test]
fn url_notation_is_erased() {
    assert!(equal(
        "a { background: url(\"./a.png\") }",
        "a { background: url('a.png') }"
    ));
    assert!(equal(
        "a { background: url(a.png) }",
        "a { background: url(\"a.png\") }"
    ));
    assert!(!equal(
        "a { background: url(a.png) }",
        "a { background: url(b.png) }"
    ));
}

#[test]
fn media_all_is_elided() {
    assert!(equal("@media all { a { x: 1 } }", "a { x: 1 }"));
}

#[test]
fn selector_grouping_matches_separate_rules() {
    assert!(equal("h1, h2 { margin: 0 }", "h1 { margin: 0 } h2 { margin: 0 }"));
}

#[test]
fn string_quote_styles_are_erased() {
    assert!(equal(
        "q { quotes: '\u{ab}' '\u{bb}' }",
        "q { quotes: \"\u{ab}\" \"\u{bb}\" }"
    ));
}

#[test]
fn missing_declaration_differs() {
    assert!(!equal("a { color: red; margin: 0 }", "a { color: red }"));
}

#[test]
fn unknown_at_rules_do_not_affect_the_verdict() {
    assert!(equal(
        "@layer base { a { x: 1 } } b { y: 2 }",
        "b { y: 2 }"
    ));
}

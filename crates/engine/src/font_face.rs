//! `@font-face` entries and the descriptor table.
//! Spec: <https://www.w3.org/TR/css-fonts-3/#font-face-rule>

use std::collections::HashMap;

/// One descriptor: its default, an optional closed value set, and synonym
/// collapses applied to accepted values.
struct DescriptorSpec {
    name: &'static str,
    default: &'static str,
    allowed: Option<&'static [&'static str]>,
    synonyms: &'static [(&'static str, &'static str)],
}

/// The fixed descriptor table. Names outside it are ignored. Defaults are
/// stored with synonyms already collapsed (`font-weight` defaults to `400`,
/// not `normal`).
const DESCRIPTORS: &[DescriptorSpec] = &[
    DescriptorSpec {
        name: "font-family",
        default: "",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "src",
        default: "",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-style",
        default: "normal",
        allowed: Some(&["normal", "italic", "oblique"]),
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-weight",
        default: "400",
        allowed: Some(&[
            "normal", "bold", "bolder", "lighter", "100", "200", "300", "400", "500", "600",
            "700", "800", "900",
        ]),
        synonyms: &[("normal", "400"), ("bold", "600")],
    },
    DescriptorSpec {
        name: "font-stretch",
        default: "normal",
        allowed: Some(&[
            "normal",
            "ultra-condensed",
            "extra-condensed",
            "condensed",
            "semi-condensed",
            "semi-expanded",
            "expanded",
            "extra-expanded",
            "ultra-expanded",
        ]),
        synonyms: &[],
    },
    DescriptorSpec {
        name: "unicode-range",
        default: "u+0-10ffff",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-feature-settings",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-kerning",
        default: "auto",
        allowed: Some(&["auto", "normal", "none"]),
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-ligatures",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-position",
        default: "normal",
        allowed: Some(&["normal", "sub", "super"]),
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-caps",
        default: "normal",
        allowed: Some(&[
            "normal",
            "small-caps",
            "all-small-caps",
            "petite-caps",
            "all-petite-caps",
            "unicase",
            "titling-caps",
        ]),
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-numeric",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-alternates",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-variant-east-asian",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
    DescriptorSpec {
        name: "font-language-override",
        default: "normal",
        allowed: None,
        synonyms: &[],
    },
];

fn lookup(name: &str) -> Option<&'static DescriptorSpec> {
    DESCRIPTORS.iter().find(|spec| spec.name == name)
}

/// One `@font-face` rule with every descriptor resolved to a value or its
/// default.
#[derive(Clone, Debug, PartialEq)]
pub struct FontFace {
    descriptors: HashMap<String, String>,
}

impl Default for FontFace {
    fn default() -> Self {
        Self::new()
    }
}

impl FontFace {
    /// A font-face with all descriptors at their defaults.
    #[must_use]
    pub fn new() -> Self {
        let descriptors = DESCRIPTORS
            .iter()
            .map(|spec| (spec.name.to_owned(), spec.default.to_owned()))
            .collect();
        Self { descriptors }
    }

    /// Apply one declaration. Unknown descriptor names are ignored; values
    /// outside a descriptor's allowed set revert to its default.
    pub fn set(&mut self, name: &str, raw_value: &str) {
        let Some(spec) = lookup(name) else {
            return;
        };
        let mut value = raw_value.trim().to_owned();
        match spec.name {
            "font-family" => {
                value = css_syntax::strip_quotes(&value).to_lowercase();
            }
            "src" => {
                value = value.replace(['"', '\''], "");
            }
            _ => {}
        }
        if let Some(allowed) = spec.allowed {
            let lowered = value.to_ascii_lowercase();
            if allowed.contains(&lowered.as_str()) {
                value = spec
                    .synonyms
                    .iter()
                    .find(|(from, _)| *from == lowered)
                    .map_or(lowered, |(_, to)| (*to).to_owned());
            } else {
                value = spec.default.to_owned();
            }
        }
        self.descriptors.insert(spec.name.to_owned(), value);
    }

    /// A font-face needs both a family and a source to count.
    #[must_use]
    pub fn valid(&self) -> bool {
        !self.family().is_empty() && !self.src().is_empty()
    }

    #[must_use]
    pub fn family(&self) -> &str {
        self.descriptors.get("font-family").map_or("", String::as_str)
    }

    #[must_use]
    pub fn src(&self) -> &str {
        self.descriptors.get("src").map_or("", String::as_str)
    }
}

//! The canonical stylesheet model and the evaluation walk that builds it.

use crate::conditions::{ALL, canonical_condition, compose};
use crate::error::EngineError;
use crate::font_face::FontFace;
use crate::import::{ImportLoader, MAX_IMPORT_DEPTH};
use crate::keyframes::{Keyframes, KeyframesSelector};
use crate::maps::map_eq;
use crate::page::{MarginBox, PageSelector};
use crate::selector::Selector;
use crate::supports::Supports;
use crate::value::Value;
use css_syntax::{AstNode, strip_quotes};
use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Prefix for namespace declarations that carry no explicit prefix.
const DEFAULT_NAMESPACE: &str = "default";

/// Grouping key for `@supports` entries.
const SUPPORTS_NAME: &str = "supports";

/// The fully evaluated model of one stylesheet: what each selector binds,
/// which animations, namespaces, pages, support groups, and font faces are
/// live, and under which conditions.
///
/// `unsupported` collects constructs the evaluator does not understand; it
/// is diagnostic only and takes no part in equivalence.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    pub selectors: HashMap<String, Selector>,
    pub keyframes: HashMap<String, Keyframes>,
    pub namespaces: HashMap<String, String>,
    pub pages: HashMap<String, PageSelector>,
    pub supports: HashMap<String, Supports>,
    pub font_faces: HashMap<String, HashMap<String, HashMap<String, FontFace>>>,
    pub charset: String,
    pub unsupported: Vec<String>,
}

impl Engine {
    /// Merge another model into this one entity-wise: selectors merge by
    /// canonical name, keyframes replace per condition, namespaces
    /// overwrite by prefix, pages merge margin boxes, support groups merge
    /// recursively, and font faces overwrite by their full key.
    pub fn absorb(&mut self, other: &Self) {
        for (name, selector) in &other.selectors {
            if let Some(existing) = self.selectors.get_mut(name) {
                existing.merge(selector);
            } else {
                self.selectors.insert(name.clone(), selector.clone());
            }
        }
        for (name, keyframes) in &other.keyframes {
            if let Some(existing) = self.keyframes.get_mut(name) {
                existing.merge(keyframes);
            } else {
                self.keyframes.insert(name.clone(), keyframes.clone());
            }
        }
        for (prefix, uri) in &other.namespaces {
            self.namespaces.insert(prefix.clone(), uri.clone());
        }
        for (name, page) in &other.pages {
            if let Some(existing) = self.pages.get_mut(name) {
                existing.merge(page);
            } else {
                self.pages.insert(name.clone(), page.clone());
            }
        }
        for (name, supports) in &other.supports {
            if let Some(existing) = self.supports.get_mut(name) {
                existing.merge(supports);
            } else {
                self.supports.insert(name.clone(), supports.clone());
            }
        }
        for (condition, families) in &other.font_faces {
            let by_family = self.font_faces.entry(condition.clone()).or_default();
            for (family, sources) in families {
                let by_src = by_family.entry(family.clone()).or_default();
                for (src, face) in sources {
                    by_src.insert(src.clone(), face.clone());
                }
            }
        }
        if !other.charset.is_empty() {
            self.charset = other.charset.clone();
        }
        self.unsupported.extend(other.unsupported.iter().cloned());
    }
}

impl PartialEq for Engine {
    fn eq(&self, other: &Self) -> bool {
        map_eq(&self.selectors, &other.selectors)
            && map_eq(&self.keyframes, &other.keyframes)
            && map_eq(&self.namespaces, &other.namespaces)
            && map_eq(&self.pages, &other.pages)
            && map_eq(&self.supports, &other.supports)
            && map_eq(&self.font_faces, &other.font_faces)
            && self.charset == other.charset
    }
}

/// The single-pass evaluator. Parent conditions are threaded through the
/// recursive walk explicitly; imports re-enter the walk with an adjusted
/// base directory and depth.
pub struct Evaluator<'ld> {
    loader: &'ld dyn ImportLoader,
    base_dir: PathBuf,
    depth: usize,
}

impl<'ld> Evaluator<'ld> {
    #[must_use]
    pub fn new(loader: &'ld dyn ImportLoader, base_dir: &Path) -> Self {
        Self {
            loader,
            base_dir: base_dir.to_path_buf(),
            depth: 0,
        }
    }

    fn nested(&self, base_dir: PathBuf) -> Self {
        Self {
            loader: self.loader,
            base_dir,
            depth: self.depth + 1,
        }
    }

    /// Evaluate a node list under the given conditions into `model`.
    ///
    /// # Errors
    /// Fails only on a value the factory cannot represent or on I/O errors
    /// surfaced by the loader contract; unrecognized constructs land in
    /// `model.unsupported` instead.
    pub fn evaluate(
        &self,
        nodes: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        for node in nodes {
            self.evaluate_node(node, conditions, model)?;
        }
        Ok(())
    }

    fn evaluate_node(
        &self,
        node: &AstNode,
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        match node {
            AstNode::Rule {
                selectors,
                children,
            } => self.process_rule(selectors, children, conditions, model),
            AstNode::Media { queries, children } => {
                let composed = compose(conditions, queries);
                self.evaluate(children, &composed, model)
            }
            AstNode::Supports {
                condition,
                children,
            } => self.process_supports(condition, children, conditions, model),
            AstNode::Charset(value) => {
                model.charset = value.clone();
                Ok(())
            }
            AstNode::Import { uri, query } => self.process_import(uri, query, conditions, model),
            AstNode::Directive {
                name,
                value,
                children,
            } => match name.as_str() {
                "keyframes" => self.process_keyframes(value, children, conditions, model),
                "namespace" => {
                    process_namespace(value, model);
                    Ok(())
                }
                "page" => self.process_page(value, children, conditions, model),
                "font-face" => self.process_font_face(children, conditions, model),
                _ => {
                    model.unsupported.push(describe(node));
                    Ok(())
                }
            },
            AstNode::Property { .. } | AstNode::KeyframeRule { .. } | AstNode::Unknown(_) => {
                model.unsupported.push(describe(node));
                Ok(())
            }
        }
    }

    fn process_rule(
        &self,
        selectors: &[css_selectors::ComplexSelector],
        children: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        let declarations = collect_declarations(children, model)?;
        for selector in selectors {
            let canonical = css_selectors::canonicalize(selector);
            if canonical.is_empty() {
                continue;
            }
            let entry = model
                .selectors
                .entry(canonical.clone())
                .or_insert_with(|| Selector::new(canonical));
            for (name, value) in &declarations {
                entry.add_property(name, conditions, value);
            }
        }
        Ok(())
    }

    fn process_supports(
        &self,
        condition: &str,
        children: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        let key = canonical_condition(condition);
        let mut nested = Engine::default();
        self.evaluate(children, conditions, &mut nested)?;
        model
            .supports
            .entry(SUPPORTS_NAME.to_owned())
            .or_insert_with(|| Supports::new(SUPPORTS_NAME.to_owned()))
            .add_rule(key, nested);
        Ok(())
    }

    fn process_keyframes(
        &self,
        name: &str,
        children: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        let animation = name.trim();
        if animation.is_empty() {
            model.unsupported.push("@keyframes".to_owned());
            return Ok(());
        }
        let mut built = Keyframes::new(animation.to_owned());
        for condition in conditions {
            let mut offsets: HashMap<String, KeyframesSelector> = HashMap::new();
            for child in children {
                let AstNode::KeyframeRule {
                    offsets: offset_list,
                    children: body,
                } = child
                else {
                    model.unsupported.push(describe(child));
                    continue;
                };
                let declarations = collect_declarations(body, model)?;
                for raw_offset in offset_list.split(',') {
                    let mut frame = KeyframesSelector::new(raw_offset);
                    for (property, value) in &declarations {
                        frame.add_property(property, std::slice::from_ref(condition), value);
                    }
                    offsets.insert(frame.offset.clone(), frame);
                }
            }
            built.rules.insert(condition.clone(), offsets);
        }
        if let Some(existing) = model.keyframes.get_mut(animation) {
            existing.merge(&built);
        } else {
            model.keyframes.insert(animation.to_owned(), built);
        }
        Ok(())
    }

    fn process_page(
        &self,
        selector_text: &str,
        children: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        let mut names: Vec<String> = selector_text
            .split(',')
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .collect();
        if names.is_empty() {
            names.push(String::new());
        }

        // Build one instance, then deep-copy it for the remaining names.
        let mut base = PageSelector::new(names[0].clone());
        for child in children {
            match child {
                AstNode::Property {
                    name,
                    important,
                    parsed,
                    ..
                } => {
                    let value = make_value(name, parsed.as_ref(), *important)?;
                    base.add_property(name, conditions, &value);
                }
                AstNode::Directive {
                    name,
                    children: body,
                    ..
                } => {
                    let mut margin_box = MarginBox::new(format!("@{name}"));
                    for (property, value) in collect_declarations(body, model)? {
                        margin_box.add_property(&property, conditions, &value);
                    }
                    base.add_margin_box(margin_box);
                }
                other => model.unsupported.push(describe(other)),
            }
        }

        for name in names {
            let mut instance = base.clone();
            instance.page_selector = name.clone();
            if let Some(existing) = model.pages.get_mut(&name) {
                existing.merge(&instance);
            } else {
                model.pages.insert(name, instance);
            }
        }
        Ok(())
    }

    fn process_font_face(
        &self,
        children: &[AstNode],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        let mut face = FontFace::new();
        for child in children {
            match child {
                AstNode::Property { name, value, .. } => face.set(name, value),
                other => model.unsupported.push(describe(other)),
            }
        }
        if !face.valid() {
            debug!("discarding @font-face without family or src");
            return Ok(());
        }
        for condition in conditions {
            model
                .font_faces
                .entry(condition.clone())
                .or_default()
                .entry(face.family().to_owned())
                .or_default()
                .insert(face.src().to_owned(), face.clone());
        }
        Ok(())
    }

    fn process_import(
        &self,
        uri: &str,
        query: &[String],
        conditions: &[String],
        model: &mut Engine,
    ) -> Result<(), EngineError> {
        if self.depth >= MAX_IMPORT_DEPTH {
            model.unsupported.push(format!("@import {uri}"));
            return Ok(());
        }
        let target = strip_quotes(uri);
        if target.is_empty() {
            debug!("skipping @import with empty target");
            return Ok(());
        }
        let path = self.base_dir.join(target);
        let Some(source) = self.loader.load(&path) else {
            debug!("skipping unreadable @import target {}", path.display());
            return Ok(());
        };
        let nodes = css_syntax::parse_stylesheet(&source);
        let next_base = path
            .parent()
            .map_or_else(|| self.base_dir.clone(), Path::to_path_buf);
        let nested = self.nested(next_base);
        if query.is_empty() {
            nested.evaluate(&nodes, conditions, model)
        } else {
            // An import with a media query behaves as if its sheet were
            // wrapped in @media of that query.
            let wrapped = AstNode::Media {
                queries: query.to_vec(),
                children: nodes,
            };
            nested.evaluate(std::slice::from_ref(&wrapped), conditions, model)
        }
    }
}

/// Parse `prefix value` from a `@namespace` prelude. A single token is the
/// default-prefix form; `url(...)` wrapping and quotes are stripped.
fn process_namespace(value: &str, model: &mut Engine) {
    let mut parts = value.split_whitespace();
    let Some(head) = parts.next() else {
        model.unsupported.push("@namespace".to_owned());
        return;
    };
    let tail = parts.collect::<Vec<_>>().join(" ");
    let (prefix, target) = if tail.is_empty() {
        (DEFAULT_NAMESPACE.to_owned(), head.to_owned())
    } else {
        (head.to_owned(), tail)
    };
    model.namespaces.insert(prefix, unwrap_namespace_target(&target));
}

/// Strip a `url(...)` wrapper and its quotes; bare strings pass through.
fn unwrap_namespace_target(target: &str) -> String {
    let trimmed = target.trim();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("url(") && trimmed.ends_with(')') {
        let inner = &trimmed["url(".len()..trimmed.len() - 1];
        return strip_quotes(inner).to_owned();
    }
    trimmed.to_owned()
}

/// Build the comparable value for one declaration.
fn make_value(
    property: &str,
    parsed: Option<&css_syntax::ValueNode>,
    important: bool,
) -> Result<Value, EngineError> {
    let node = parsed.ok_or_else(|| EngineError::UnsupportedValue {
        property: property.to_owned(),
    })?;
    Ok(Value::from_node(node, important))
}

/// Collect the declarations of a rule body; anything that is not a
/// property is recorded as unsupported.
fn collect_declarations(
    children: &[AstNode],
    model: &mut Engine,
) -> Result<Vec<(String, Value)>, EngineError> {
    let mut out = Vec::new();
    for child in children {
        match child {
            AstNode::Property {
                name,
                important,
                parsed,
                ..
            } => {
                out.push((name.clone(), make_value(name, parsed.as_ref(), *important)?));
            }
            other => model.unsupported.push(describe(other)),
        }
    }
    Ok(out)
}

/// A short description of a node for the unsupported list.
fn describe(node: &AstNode) -> String {
    match node {
        AstNode::Unknown(text) => text.clone(),
        AstNode::Directive { name, value, .. } => format!("@{name} {value}").trim_end().to_owned(),
        AstNode::Property { name, .. } => format!("property {name}"),
        AstNode::Media { queries, .. } => format!("@media {}", queries.join(", ")),
        AstNode::Supports { condition, .. } => format!("@supports {condition}"),
        AstNode::KeyframeRule { offsets, .. } => format!("keyframe {offsets}"),
        AstNode::Charset(value) => format!("@charset {value}"),
        AstNode::Import { uri, .. } => format!("@import {uri}"),
        AstNode::Rule { .. } => "rule".to_owned(),
    }
}

/// Evaluate stylesheet source into a model, resolving imports relative to
/// `base_dir` through `loader`.
///
/// # Errors
/// Propagates value-factory failures; see [`Evaluator::evaluate`].
pub fn evaluate_source(
    source: &str,
    loader: &dyn ImportLoader,
    base_dir: &Path,
) -> Result<Engine, EngineError> {
    let nodes = css_syntax::parse_stylesheet(source);
    let mut model = Engine::default();
    Evaluator::new(loader, base_dir).evaluate(&nodes, &[ALL.to_owned()], &mut model)?;
    Ok(model)
}

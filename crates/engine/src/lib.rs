//! Stylesheet evaluation and equivalence.
//!
//! Two stylesheets are semantically equivalent when, after parsing and
//! normalization, they declare the same at-rules and rulesets with the same
//! effective property bindings under the same conditions. This crate builds
//! the canonical model for one sheet ([`Engine`]) and compares two of them
//! structurally.

#![forbid(unsafe_code)]

mod conditions;
mod engine;
mod error;
mod font_face;
mod import;
mod keyframes;
mod maps;
mod page;
mod property;
mod selector;
mod supports;
mod value;

pub use conditions::{ALL, canonical_condition, canonical_query, compose};
pub use engine::{Engine, Evaluator, evaluate_source};
pub use error::EngineError;
pub use font_face::FontFace;
pub use import::{FsLoader, ImportLoader, MAX_IMPORT_DEPTH, MemoryLoader};
pub use keyframes::{Keyframes, KeyframesSelector, normalize_offset};
pub use page::{ALL_MARGIN, MarginBox, PageSelector};
pub use property::Property;
pub use selector::Selector;
pub use supports::Supports;
pub use value::Value;

use std::fs;
use std::path::Path;

/// Compare two stylesheet sources. Imports resolve relative to the current
/// directory.
///
/// # Errors
/// Fails when either sheet contains a value the engine cannot represent.
pub fn compare_sources(a: &str, b: &str) -> Result<bool, EngineError> {
    let loader = FsLoader;
    let current = Path::new(".");
    let model_a = evaluate_source(a, &loader, current)?;
    let model_b = evaluate_source(b, &loader, current)?;
    Ok(model_a == model_b)
}

/// Compare two stylesheet files. Each sheet's imports resolve relative to
/// its own location.
///
/// # Errors
/// Fails when a primary operand cannot be read or on evaluation failure;
/// unreadable import targets are skipped, not errors.
pub fn compare_files(a: &Path, b: &Path) -> Result<bool, EngineError> {
    let loader = FsLoader;
    let source_a = read_operand(a)?;
    let source_b = read_operand(b)?;
    let model_a = evaluate_source(&source_a, &loader, base_dir(a))?;
    let model_b = evaluate_source(&source_b, &loader, base_dir(b))?;
    Ok(model_a == model_b)
}

fn read_operand(path: &Path) -> Result<String, EngineError> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn base_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

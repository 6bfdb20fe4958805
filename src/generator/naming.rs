use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::design::{Action, Resource, Version};
use crate::error::GenError;

const CONTEXT_SUFFIX: &str = "Context";
const CONTROLLER_SUFFIX: &str = "Controller";

const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while", "async", "await", "dyn", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Stem of names without a single ASCII letter or digit (`-`, `日本`).
const UNNAMED: &str = "unnamed";

/// Splits a design-level name into lowercase words.
///
/// Any non-alphanumeric ASCII character separates words, as does a lower-to-upper
/// transition (`reviewID` → `review`, `id`) and the end of an acronym
/// (`HTTPServer` → `http`, `server`).
pub fn words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a design-level name into an exported (PascalCase) Rust type name.
///
/// # Example
///
/// ```rust
/// use appgen::generator::export_name;
/// assert_eq!(export_name("show"), "Show");
/// assert_eq!(export_name("bottle-reviews"), "BottleReviews");
/// assert_eq!(export_name("reviewID"), "ReviewId");
/// assert_eq!(export_name("-"), "Unnamed");
/// ```
pub fn export_name(name: &str) -> String {
    let mut out: String = stem(name)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    if out == "Self" {
        out.push('_');
    }
    out
}

/// Converts a design-level name into a snake_case Rust identifier for fields,
/// functions and methods.
pub fn snake_name(name: &str) -> String {
    let mut out = stem(name).join("_");
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    sanitize_keyword(out)
}

/// Converts a design-level name into a SCREAMING_SNAKE_CASE constant name.
pub fn screaming_name(name: &str) -> String {
    let mut out = stem(name).join("_").to_ascii_uppercase();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Words of `name`, never empty.
fn stem(name: &str) -> Vec<String> {
    let words = words(name);
    if words.is_empty() {
        vec![UNNAMED.to_string()]
    } else {
        words
    }
}

pub(crate) fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

fn sanitize_keyword(name: String) -> String {
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name.as_str()) {
        format!("r#{name}")
    } else {
        name
    }
}

/// Returns `name`, or `name` with the first free numeric suffix when it was already
/// handed out, and records the result in `seen`.
///
/// snake_case names get an underscore before the counter (`id_1`), PascalCase names
/// do not (`Bottle1`).
pub(crate) fn unique_name(seen: &mut HashSet<String>, name: &str) -> String {
    unique_with(seen, name, "")
}

/// Like [`unique_name`] but places the counter between `base` and `suffix`
/// (`ShowBottle` + `Context` → `ShowBottle1Context`).
fn unique_with(seen: &mut HashSet<String>, base: &str, suffix: &str) -> String {
    let candidate = format!("{base}{suffix}");
    if seen.insert(candidate.clone()) {
        return candidate;
    }
    let separator = if base.chars().any(|c| c.is_ascii_uppercase()) {
        ""
    } else {
        "_"
    };
    let mut counter = 1;
    loop {
        let numbered = format!("{base}{separator}{counter}{suffix}");
        if seen.insert(numbered.clone()) {
            warn!(name = %candidate, resolved = %numbered, "Duplicate generated name");
            return numbered;
        }
        counter += 1;
    }
}

/// Generated names of one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    /// Exported type name, e.g. `Bottle`
    pub type_name: String,
    /// Function name stem, e.g. `bottle`
    pub fn_name: String,
    /// Constant name stem, e.g. `BOTTLE`
    pub const_name: String,
}

impl ResourceNames {
    pub fn controller(&self) -> String {
        format!("{}{CONTROLLER_SUFFIX}", self.type_name)
    }
}

/// Collision-free identifiers for every resource and (action, resource) pair of a
/// version.
///
/// Names are computed once, in traversal order, so every writer that refers to the
/// same element reads the same string.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    resources: HashMap<String, ResourceNames>,
    contexts: HashMap<(String, String), String>,
}

impl NameResolver {
    pub fn for_version(version: &Version) -> Self {
        let mut type_names = HashSet::new();
        let mut fn_names = HashSet::new();
        let mut const_names = HashSet::new();
        let mut context_names = HashSet::new();
        let mut resolver = NameResolver::default();

        for resource in &version.resources {
            let type_name = unique_name(&mut type_names, &export_name(&resource.name));
            let names = ResourceNames {
                fn_name: unique_name(&mut fn_names, &snake_name(&type_name)),
                const_name: unique_name(&mut const_names, &screaming_name(&type_name)),
                type_name,
            };
            resolver.resources.insert(resource.name.clone(), names);

            for action in &resource.actions {
                let base = format!("{}{}", export_name(&action.name), export_name(&resource.name));
                let name = unique_with(&mut context_names, &base, CONTEXT_SUFFIX);
                resolver
                    .contexts
                    .insert((resource.name.clone(), action.name.clone()), name);
            }
        }
        resolver
    }

    /// Context type name of `action`, e.g. `ShowBottleContext`.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::Internal`] if the pair does not belong to the resolved version.
    pub fn context_name(&self, resource: &Resource, action: &Action) -> Result<&str, GenError> {
        self.contexts
            .get(&(resource.name.clone(), action.name.clone()))
            .map(String::as_str)
            .ok_or_else(|| {
                GenError::Internal(format!(
                    "no context name resolved for action {:?} of resource {:?}",
                    action.name, resource.name
                ))
            })
    }

    /// # Errors
    ///
    /// Returns [`GenError::Internal`] if the resource does not belong to the resolved version.
    pub fn resource(&self, resource: &Resource) -> Result<&ResourceNames, GenError> {
        self.resources.get(&resource.name).ok_or_else(|| {
            GenError::Internal(format!("no names resolved for resource {:?}", resource.name))
        })
    }
}

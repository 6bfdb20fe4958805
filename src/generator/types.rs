use std::collections::BTreeMap;

use crate::design::{Api, DataType};
use crate::error::GenError;

use super::naming::export_name;

/// Maps design type names (user types and media types) to generated Rust types.
///
/// User types and media types with a definition resolve to their generated type
/// name. Any other media type resolves to the Rust type of its shape, since no
/// definition is emitted for it.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    names: BTreeMap<String, String>,
    inline: BTreeMap<String, DataType>,
}

impl TypeIndex {
    pub fn new(api: &Api) -> Self {
        let mut names = BTreeMap::new();
        let mut inline = BTreeMap::new();
        for media_type in &api.media_types {
            if media_type.has_definition() {
                names.insert(media_type.type_name.clone(), export_name(&media_type.type_name));
            } else {
                inline.insert(media_type.type_name.clone(), media_type.shape.clone());
            }
        }
        for user_type in &api.user_types {
            inline.remove(&user_type.type_name);
            names.insert(user_type.type_name.clone(), export_name(&user_type.type_name));
        }
        Self { names, inline }
    }

    /// Rust type for a design type name.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnknownType`] if no user type or media type has that name,
    /// or if inline media types refer to each other in a cycle.
    pub fn resolve(&self, name: &str, referrer: &str) -> Result<String, GenError> {
        self.resolve_at(name, referrer, 0)
    }

    fn resolve_at(&self, name: &str, referrer: &str, depth: usize) -> Result<String, GenError> {
        if let Some(type_name) = self.names.get(name) {
            return Ok(type_name.clone());
        }
        match self.inline.get(name) {
            Some(shape) if depth < self.inline.len() => self.type_at(shape, referrer, depth + 1),
            _ => Err(GenError::UnknownType {
                name: name.to_string(),
                referrer: referrer.to_string(),
            }),
        }
    }

    /// Rust type expression for a design data type.
    ///
    /// Anonymous nested objects are kept as untyped JSON values; only named types
    /// become structs. Hash keys that are not integers or booleans are strings.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnknownType`] for unresolved named references.
    pub fn rust_type(&self, ty: &DataType, referrer: &str) -> Result<String, GenError> {
        self.type_at(ty, referrer, 0)
    }

    fn type_at(&self, ty: &DataType, referrer: &str, depth: usize) -> Result<String, GenError> {
        Ok(match ty {
            DataType::Boolean => "bool".to_string(),
            DataType::Integer => "i64".to_string(),
            DataType::Number => "f64".to_string(),
            DataType::String => "String".to_string(),
            DataType::Any | DataType::Object { .. } => "serde_json::Value".to_string(),
            DataType::Array { of } => format!("Vec<{}>", self.type_at(of, referrer, depth)?),
            DataType::Hash { key, value } => format!(
                "BTreeMap<{}, {}>",
                map_key_type(key),
                self.type_at(value, referrer, depth)?
            ),
            DataType::Named { name } => self.resolve_at(name, referrer, depth)?,
        })
    }
}

fn map_key_type(key: &DataType) -> &'static str {
    match key {
        DataType::Integer => "i64",
        DataType::Boolean => "bool",
        _ => "String",
    }
}

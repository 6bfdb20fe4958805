//! Structural checks run before generation touches the filesystem.
//!
//! These are not API design rules: they only reject graphs the generator cannot
//! traverse deterministically (duplicate names, dangling references it relies on,
//! version strings that cannot be used as directory names).

use std::collections::{HashMap, HashSet};

use http::Method;

use super::types::{invalid_capture, Api};
use crate::error::GenError;
use crate::generator::export_name;

impl Api {
    /// Validates the structure of the design graph.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::InvalidDesign`] describing the first problem found.
    pub fn validate(&self) -> Result<(), GenError> {
        if self.name.trim().is_empty() {
            return Err(invalid("API name is empty"));
        }

        let mut versions = HashSet::new();
        for version in &self.versions {
            if !versions.insert(version.version.as_str()) {
                return Err(invalid(format!(
                    "version {:?} is declared more than once",
                    version.version
                )));
            }
            if version.is_versioned() && !is_safe_dir_name(&version.version) {
                return Err(invalid(format!(
                    "version {:?} cannot be used as a directory name",
                    version.version
                )));
            }
            if let Some(base_path) = &version.base_path {
                check_captures(base_path, &version.label(self))?;
            }

            let mut resources = HashSet::new();
            for resource in &version.resources {
                if resource.name.trim().is_empty() {
                    return Err(invalid(format!(
                        "{} declares a resource with an empty name",
                        version.label(self)
                    )));
                }
                if !resources.insert(resource.name.as_str()) {
                    return Err(invalid(format!(
                        "resource {:?} is declared more than once in {}",
                        resource.name,
                        version.label(self)
                    )));
                }

                if let Some(base_path) = &resource.base_path {
                    check_captures(base_path, &format!("resource {:?}", resource.name))?;
                }

                let mut actions = HashSet::new();
                for action in &resource.actions {
                    if action.name.trim().is_empty() {
                        return Err(invalid(format!(
                            "resource {:?} declares an action with an empty name",
                            resource.name
                        )));
                    }
                    if !actions.insert(action.name.as_str()) {
                        return Err(invalid(format!(
                            "action {:?} is declared more than once in resource {:?}",
                            action.name, resource.name
                        )));
                    }
                    for route in &action.routes {
                        if Method::from_bytes(route.method_upper().as_bytes()).is_err() {
                            return Err(invalid(format!(
                                "action {:?} of resource {:?} has an invalid HTTP method {:?}",
                                action.name, resource.name, route.method
                            )));
                        }
                        if !route.path.is_empty() && !route.path.starts_with('/') {
                            return Err(invalid(format!(
                                "route {:?} of action {:?} must be empty or start with '/'",
                                route.path, action.name
                            )));
                        }
                        check_captures(
                            &route.path,
                            &format!("action {:?} of resource {:?}", action.name, resource.name),
                        )?;
                    }
                }

                if let Some(canonical) = &resource.canonical_action {
                    if resource.action(canonical).is_none() {
                        return Err(invalid(format!(
                            "canonical action {:?} of resource {:?} does not exist",
                            canonical, resource.name
                        )));
                    }
                }
            }
        }

        self.validate_type_names()
    }

    /// Media types and user types share one namespace in the generated code and are
    /// referenced by name, so their Rust names must not collide.
    fn validate_type_names(&self) -> Result<(), GenError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        let names = self
            .user_types
            .iter()
            .map(|t| t.type_name.as_str())
            .chain(self.media_types.iter().map(|t| t.type_name.as_str()));
        for name in names {
            if name.trim().is_empty() {
                return Err(invalid("a type is declared with an empty name"));
            }
            if let Some(previous) = seen.insert(export_name(name), name) {
                return Err(invalid(format!(
                    "type names {previous:?} and {name:?} map to the same generated type"
                )));
            }
        }
        Ok(())
    }
}

fn check_captures(path: &str, owner: &str) -> Result<(), GenError> {
    match invalid_capture(path) {
        Some(segment) => Err(invalid(format!(
            "capture {segment:?} in path {path:?} of {owner} must be named with ASCII letters, digits or '_'"
        ))),
        None => Ok(()),
    }
}

fn is_safe_dir_name(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(&['/', '\\'][..]) && !name.contains('\0')
}

fn invalid(message: impl Into<String>) -> GenError {
    GenError::InvalidDesign(message.into())
}

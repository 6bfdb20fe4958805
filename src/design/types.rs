use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Matches a wildcard capture in a route path, e.g. `/:id` or `/*filepath`.
pub static WILDCARD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(?::|\*)([a-zA-Z0-9_]+)").expect("valid wildcard regex"));

/// Header specifications keyed by header name.
pub type Headers = BTreeMap<String, HeaderSpec>;

/// Response specifications keyed by response name (e.g. `OK`, `NotFound`).
pub type Responses = BTreeMap<String, ResponseSpec>;

/// Root of the design graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Api {
    /// API name, used in generated titles and doc comments
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Versions in declaration order; the empty version string is the unversioned API
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub media_types: Vec<MediaType>,
    #[serde(default)]
    pub user_types: Vec<UserType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Identifier of the media type used to render the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    /// Name of the action used to build canonical hrefs (defaults to `show`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the user type or media type carried by the request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Responses>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// Path template, e.g. `/bottles/:id`
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    #[default]
    Path,
    Query,
    Header,
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamLocation::Path => write!(f, "path"),
            ParamLocation::Query => write!(f, "query"),
            ParamLocation::Header => write!(f, "header"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default, rename = "in")]
    pub location: ParamLocation,
    #[serde(flatten)]
    pub shape: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSpec {
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub status: u16,
    /// Identifier of the media type rendered in the response body, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub identifier: String,
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub shape: DataType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserType {
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub shape: DataType,
}

/// Shape of a design type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataType {
    Boolean,
    Integer,
    Number,
    String,
    Any,
    Array { of: Box<DataType> },
    Hash { key: Box<DataType>, value: Box<DataType> },
    Object { fields: Vec<Field> },
    /// Reference to a user type or media type by type name, written `ref`
    Named {
        #[serde(rename = "ref")]
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub shape: DataType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DataType {
    pub fn is_object(&self) -> bool {
        matches!(self, DataType::Object { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, DataType::Array { .. })
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            DataType::Boolean | DataType::Integer | DataType::Number | DataType::String | DataType::Any
        )
    }
}

impl MediaType {
    /// Whether the media type is emitted as its own type definition. Other shapes are
    /// used inline wherever the media type is referenced.
    pub fn has_definition(&self) -> bool {
        self.shape.is_object() || self.shape.is_array()
    }
}

impl Api {
    /// Human readable label used in generated titles, e.g. `API "cellar"`.
    pub fn label(&self) -> String {
        format!("API {:?}", self.name)
    }

    /// Looks up a media type by identifier.
    ///
    /// Matching ignores case and media type parameters, so
    /// `application/vnd.bottle+json; view=default` finds `application/vnd.bottle+json`.
    pub fn media_type_with_identifier(&self, identifier: &str) -> Option<&MediaType> {
        let wanted = canonical_identifier(identifier);
        self.media_types
            .iter()
            .find(|mt| canonical_identifier(&mt.identifier) == wanted)
    }

    pub fn version(&self, version: &str) -> Option<&Version> {
        self.versions.iter().find(|v| v.version == version)
    }
}

fn canonical_identifier(identifier: &str) -> String {
    identifier
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

impl Version {
    pub fn is_versioned(&self) -> bool {
        !self.version.is_empty()
    }

    /// Label used in generated titles, e.g. `API "cellar" version "v1"`.
    pub fn label(&self, api: &Api) -> String {
        if self.is_versioned() {
            format!("{} version {:?}", api.label(), self.version)
        } else {
            api.label()
        }
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

impl Resource {
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// The action used to build canonical hrefs: the declared canonical action, or
    /// the action named `show` when none is declared.
    pub fn canonical_action(&self) -> Option<&Action> {
        match &self.canonical_action {
            Some(name) => self.action(name),
            None => self.action("show"),
        }
    }

    /// First route of the canonical action.
    pub fn canonical_route(&self) -> Option<&Route> {
        self.canonical_action().and_then(|a| a.routes.first())
    }
}

impl Action {
    /// Full parameter set: path captures in route order, then query parameters, then
    /// header parameters, each group in declaration order.
    ///
    /// Captures come from the full route paths, base paths included. Captures without a
    /// matching declared path parameter are strings. A capture is required only when
    /// every route of the action carries it.
    pub fn all_params(&self, version: &Version, resource: &Resource) -> Vec<Param> {
        let route_captures: Vec<Vec<String>> = self
            .routes
            .iter()
            .map(|r| path_captures(&r.full_path(version, resource)))
            .collect();
        let mut params: Vec<Param> = Vec::new();
        for capture in route_captures.iter().flatten() {
            if params.iter().any(|p| p.name == *capture) {
                continue;
            }
            let in_every_route = route_captures.iter().all(|c| c.contains(capture));
            let declared = self
                .params
                .iter()
                .find(|p| p.location == ParamLocation::Path && p.name == *capture);
            params.push(Param {
                name: capture.clone(),
                location: ParamLocation::Path,
                shape: declared.map_or(DataType::String, |p| p.shape.clone()),
                required: in_every_route,
                description: declared.and_then(|p| p.description.clone()),
            });
        }
        for location in [ParamLocation::Query, ParamLocation::Header] {
            params.extend(
                self.params
                    .iter()
                    .filter(|p| p.location == location)
                    .cloned(),
            );
        }
        params
    }
}

/// Names of the wildcard captures of a path template in declaration order.
pub fn path_captures(path: &str) -> Vec<String> {
    WILDCARD_REGEX
        .captures_iter(path)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// First capture segment of `path` (`:name` or `*name`) whose name is not made of
/// ASCII letters, digits and `_` only, e.g. `:bottle-id` or a bare `*`.
///
/// Such a segment would be captured under a different name than
/// [`path_captures`] reports.
pub fn invalid_capture(path: &str) -> Option<&str> {
    path.split('/').find(|segment| {
        segment
            .strip_prefix(':')
            .or_else(|| segment.strip_prefix('*'))
            .is_some_and(|name| {
                name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
            })
    })
}

impl Route {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Names of the wildcard captures in declaration order.
    pub fn captures(&self) -> Vec<String> {
        path_captures(&self.path)
    }

    /// Path including the version and resource base paths.
    ///
    /// A path starting with `//` is absolute and ignores base paths.
    pub fn full_path(&self, version: &Version, resource: &Resource) -> String {
        if let Some(absolute) = self.path.strip_prefix("//") {
            return format!("/{absolute}");
        }
        let mut full = String::new();
        for base in [&version.base_path, &resource.base_path].into_iter().flatten() {
            full.push_str(base.trim_end_matches('/'));
        }
        full.push_str(&self.path);
        if full.is_empty() {
            full.push('/');
        }
        full
    }

    pub fn method_upper(&self) -> String {
        self.method.to_ascii_uppercase()
    }
}

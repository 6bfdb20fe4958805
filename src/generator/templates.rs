use askama::Template;

/// A template record that a [`Writer`](super::writer::Writer) can render.
///
/// `KIND` names the artifact in render errors.
pub trait Record: Template {
    const KIND: &'static str;
}

/// A `use` line emitted in the header of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Path after `use`, e.g. `std::sync::Arc`
    pub path: String,
}

impl Import {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Route information rendered into registration code and doc comments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteData {
    /// Upper-case HTTP method, e.g. `GET`
    pub method: String,
    /// Full path including base paths
    pub path: String,
    /// `method` as a Rust string literal
    pub method_literal: String,
    /// `path` as a Rust string literal
    pub path_literal: String,
}

/// One parameter of an action context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamData {
    /// Design name, used to look the value up in the request
    pub name: String,
    /// `name` as a Rust string literal
    pub name_literal: String,
    /// Struct field name
    pub field: String,
    /// Declared field type, e.g. `Option<Vec<i64>>`
    pub field_type: String,
    /// Type of a single value, e.g. `i64`
    pub elem_type: String,
    /// Parser used for each raw value (`parse_param` or `parse_json_param`)
    pub parser: String,
    pub required: bool,
    /// Whether the parameter collects every value (array shaped)
    pub multi: bool,
    /// Request accessor for one value
    pub getter: String,
    /// Request accessor for all values
    pub multi_getter: String,
    pub docs: Vec<String>,
}

/// A merged header requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderData {
    pub name: String,
    pub name_literal: String,
    pub required: bool,
}

/// A merged response, rendered as one response method on the context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
    /// Design name, e.g. `OK`
    pub name: String,
    /// Method name, e.g. `ok`
    pub method: String,
    pub status: u16,
    pub has_body: bool,
    /// Body type when `has_body` is set
    pub body_type: String,
    pub docs: Vec<String>,
}

/// Record of one action context type
#[derive(Template, Debug, Clone)]
#[template(path = "context.rs.txt", escape = "none")]
pub struct ContextData {
    /// Context type name, e.g. `ShowBottleContext`
    pub name: String,
    pub resource_name: String,
    pub action_name: String,
    /// Label of the owning API version, e.g. `API "cellar" version "v1"`
    pub version_label: String,
    pub docs: Vec<String>,
    pub has_payload: bool,
    /// Resolved payload type when `has_payload` is set
    pub payload_type: String,
    pub params: Vec<ParamData>,
    pub headers: Vec<HeaderData>,
    pub responses: Vec<ResponseData>,
    pub routes: Vec<RouteData>,
}

impl Record for ContextData {
    const KIND: &'static str = "context";
}

/// One action of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerActionData {
    pub name: String,
    /// Trait method name
    pub method: String,
    /// Context type name, read from the same resolver as the context writer
    pub context: String,
    pub routes: Vec<RouteData>,
    pub docs: Vec<String>,
}

/// Record of one resource controller
#[derive(Template, Debug, Clone)]
#[template(path = "controller.rs.txt", escape = "none")]
pub struct ControllerData {
    pub resource: String,
    pub trait_name: String,
    pub mount_fn: String,
    pub version_label: String,
    pub docs: Vec<String>,
    pub actions: Vec<ControllerActionData>,
}

impl Record for ControllerData {
    const KIND: &'static str = "controller";
}

/// Record of one resource href factory
#[derive(Template, Debug, Clone)]
#[template(path = "href.rs.txt", escape = "none")]
pub struct HrefData {
    pub resource: String,
    pub fn_name: String,
    pub const_name: String,
    pub identifier: String,
    pub identifier_literal: String,
    /// Whether the resource has a canonical route
    pub has_template: bool,
    /// Canonical template, e.g. `/bottles/%v`
    pub canonical_template: String,
    pub template_literal: String,
    /// Capture names in template order, e.g. `["id", "reviewID"]`
    pub canonical_params: Vec<String>,
    /// Builder argument names, one per capture
    pub param_args: Vec<String>,
}

impl Record for HrefData {
    const KIND: &'static str = "href";
}

/// One struct field of a media type or user type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldData {
    pub name: String,
    pub name_literal: String,
    pub field: String,
    pub ty: String,
    pub optional: bool,
    /// Whether serde needs the design name spelled out
    pub rename: bool,
    pub docs: Vec<String>,
}

/// Record of one media type
#[derive(Template, Debug, Clone)]
#[template(path = "media_type.rs.txt", escape = "none")]
pub struct MediaTypeData {
    pub type_name: String,
    pub const_name: String,
    pub identifier: String,
    pub identifier_literal: String,
    pub docs: Vec<String>,
    pub is_struct: bool,
    pub fields: Vec<FieldData>,
    /// Aliased type when `is_struct` is unset
    pub alias: String,
}

impl Record for MediaTypeData {
    const KIND: &'static str = "media type";
}

/// Record of one user type
#[derive(Template, Debug, Clone)]
#[template(path = "user_type.rs.txt", escape = "none")]
pub struct UserTypeData {
    pub type_name: String,
    pub docs: Vec<String>,
    pub is_struct: bool,
    pub fields: Vec<FieldData>,
    pub alias: String,
}

impl Record for UserTypeData {
    const KIND: &'static str = "user type";
}

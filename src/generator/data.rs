//! Builders that turn design nodes into template records.
//!
//! Builders never touch the filesystem. Every name they emit comes from the
//! [`NameResolver`] of the version or from [`unique_name`] within the record, and every
//! type comes from the [`TypeIndex`].

use std::collections::HashSet;

use regex::NoExpand;

use crate::design::{
    path_captures, Action, Api, DataType, Field, MediaType, Param, ParamLocation, Resource,
    Route, UserType, Version, WILDCARD_REGEX,
};
use crate::error::GenError;

use super::merge::merge;
use super::naming::{screaming_name, snake_name, unique_name, NameResolver};
use super::templates::{
    ContextData, ControllerActionData, ControllerData, FieldData, HeaderData, HrefData,
    MediaTypeData, ParamData, ResponseData, RouteData, UserTypeData,
};
use super::types::TypeIndex;

/// Media type identifier of resources without a resolvable media type.
pub const FALLBACK_IDENTIFIER: &str = "text/plain";

/// Placeholder substituted for each wildcard of a canonical template.
pub const TEMPLATE_PLACEHOLDER: &str = "%v";

/// Names a context struct cannot use for its parameter fields.
const RESERVED_CONTEXT_FIELDS: &[&str] = &["ctx", "payload"];

/// Method names a context already defines.
const RESERVED_CONTEXT_METHODS: &[&str] = &["new", "context"];

/// Builds the record of the context type of `action`.
///
/// # Errors
///
/// Unresolved payload types, parameter types and response media types, and names
/// missing from `names`.
pub fn context_data(
    api: &Api,
    version: &Version,
    resource: &Resource,
    action: &Action,
    names: &NameResolver,
    types: &TypeIndex,
) -> Result<ContextData, GenError> {
    let referrer = action_referrer(resource, action);
    let name = names.context_name(resource, action)?.to_string();

    let mut fields = reserved(RESERVED_CONTEXT_FIELDS);
    let params = action
        .all_params(version, resource)
        .iter()
        .map(|p| param_data(p, &mut fields, types, &referrer))
        .collect::<Result<Vec<_>, _>>()?;

    let payload_type = match &action.payload {
        Some(payload) => Some(types.resolve(payload, &referrer)?),
        None => None,
    };

    let headers = merge(resource.headers.as_ref(), action.headers.as_ref())
        .unwrap_or_default()
        .into_iter()
        .map(|(name, spec)| HeaderData {
            name_literal: rust_literal(&name),
            name,
            required: spec.required,
        })
        .collect();

    let mut methods = reserved(RESERVED_CONTEXT_METHODS);
    let mut responses = Vec::new();
    for (name, spec) in merge(resource.responses.as_ref(), action.responses.as_ref())
        .unwrap_or_default()
    {
        let body_type = match &spec.media_type {
            Some(identifier) => {
                let media_type = api.media_type_with_identifier(identifier).ok_or_else(|| {
                    GenError::UnknownMediaType {
                        identifier: identifier.clone(),
                        referrer: format!("response {name:?} of {referrer}"),
                    }
                })?;
                Some(types.resolve(&media_type.type_name, &referrer)?)
            }
            None => None,
        };
        responses.push(ResponseData {
            method: unique_name(&mut methods, &snake_name(&name)),
            status: spec.status,
            has_body: body_type.is_some(),
            body_type: body_type.unwrap_or_default(),
            docs: doc_lines(spec.description.as_deref()),
            name,
        });
    }

    Ok(ContextData {
        name,
        resource_name: resource.name.clone(),
        action_name: action.name.clone(),
        version_label: version.label(api),
        docs: doc_lines(action.description.as_deref()),
        has_payload: payload_type.is_some(),
        payload_type: payload_type.unwrap_or_default(),
        params,
        headers,
        responses,
        routes: route_data(&action.routes, version, resource),
    })
}

fn param_data(
    param: &Param,
    fields: &mut HashSet<String>,
    types: &TypeIndex,
    referrer: &str,
) -> Result<ParamData, GenError> {
    let (elem, multi) = match &param.shape {
        DataType::Array { of } => (of.as_ref(), true),
        other => (other, false),
    };
    let elem_type = types.rust_type(elem, referrer)?;
    let parser = match elem {
        DataType::Boolean | DataType::Integer | DataType::Number | DataType::String => {
            "parse_param"
        }
        _ => "parse_json_param",
    };
    let collected = if multi {
        format!("Vec<{elem_type}>")
    } else {
        elem_type.clone()
    };
    let field_type = if param.required {
        collected
    } else {
        format!("Option<{collected}>")
    };
    let (getter, multi_getter) = match param.location {
        ParamLocation::Path | ParamLocation::Query => ("get", "get_many"),
        ParamLocation::Header => ("request_header", "request_header_values"),
    };

    let mut docs = doc_lines(param.description.as_deref());
    docs.push(format!("From the {} parameter `{}`.", param.location, param.name));

    Ok(ParamData {
        name_literal: rust_literal(&param.name),
        name: param.name.clone(),
        field: unique_name(fields, &snake_name(&param.name)),
        field_type,
        elem_type,
        parser: parser.to_string(),
        required: param.required,
        multi,
        getter: getter.to_string(),
        multi_getter: multi_getter.to_string(),
        docs,
    })
}

/// Builds the controller record of `resource`, or `None` when it has no actions.
///
/// # Errors
///
/// Names missing from `names`.
pub fn controller_data(
    api: &Api,
    version: &Version,
    resource: &Resource,
    names: &NameResolver,
) -> Result<Option<ControllerData>, GenError> {
    if resource.actions.is_empty() {
        return Ok(None);
    }
    let resource_names = names.resource(resource)?;
    let mut methods = HashSet::new();
    let actions = resource
        .actions
        .iter()
        .map(|action| {
            Ok(ControllerActionData {
                name: action.name.clone(),
                method: unique_name(&mut methods, &snake_name(&action.name)),
                context: names.context_name(resource, action)?.to_string(),
                routes: route_data(&action.routes, version, resource),
                docs: doc_lines(action.description.as_deref()),
            })
        })
        .collect::<Result<Vec<_>, GenError>>()?;

    Ok(Some(ControllerData {
        resource: resource.name.clone(),
        trait_name: resource_names.controller(),
        mount_fn: format!("mount_{}_controller", resource_names.fn_name),
        version_label: version.label(api),
        docs: doc_lines(resource.description.as_deref()),
        actions,
    }))
}

/// Builds the href record of `resource`.
///
/// The media type identifier is the declared one when it resolves, otherwise
/// [`FALLBACK_IDENTIFIER`]. Without a canonical route the record carries no template.
///
/// # Errors
///
/// Names missing from `names`.
pub fn href_data(
    api: &Api,
    version: &Version,
    resource: &Resource,
    names: &NameResolver,
) -> Result<HrefData, GenError> {
    let resource_names = names.resource(resource)?;
    let identifier = resource
        .media_type
        .as_deref()
        .and_then(|id| api.media_type_with_identifier(id))
        .map_or_else(|| FALLBACK_IDENTIFIER.to_string(), |mt| mt.identifier.clone());

    let (canonical_template, canonical_params) = match resource.canonical_route() {
        Some(route) => {
            let full = route.full_path(version, resource);
            (canonical_template(&full), path_captures(&full))
        }
        None => (String::new(), Vec::new()),
    };
    let mut args = HashSet::new();
    let param_args = canonical_params
        .iter()
        .map(|p| unique_name(&mut args, &snake_name(p)))
        .collect();

    Ok(HrefData {
        resource: resource.name.clone(),
        fn_name: resource_names.fn_name.clone(),
        const_name: resource_names.const_name.clone(),
        identifier_literal: rust_literal(&identifier),
        identifier,
        has_template: resource.canonical_route().is_some(),
        template_literal: rust_literal(&canonical_template),
        canonical_template,
        canonical_params,
        param_args,
    })
}

/// Replaces every wildcard capture of `path` with [`TEMPLATE_PLACEHOLDER`].
///
/// ```rust
/// use appgen::generator::canonical_template;
/// assert_eq!(
///     canonical_template("/bottles/:id/reviews/:reviewID"),
///     "/bottles/%v/reviews/%v"
/// );
/// ```
pub fn canonical_template(path: &str) -> String {
    WILDCARD_REGEX
        .replace_all(path, NoExpand(&format!("/{TEMPLATE_PLACEHOLDER}")))
        .into_owned()
}

/// Builds the record of a media type, or `None` when it is neither object- nor
/// array-shaped.
///
/// # Errors
///
/// Unresolved named types in the shape.
pub fn media_type_data(
    media_type: &MediaType,
    types: &TypeIndex,
) -> Result<Option<MediaTypeData>, GenError> {
    if !media_type.has_definition() {
        return Ok(None);
    }
    let referrer = format!("media type {:?}", media_type.identifier);
    let type_name = types.resolve(&media_type.type_name, &referrer)?;
    let body = shape_body(&media_type.shape, types, &referrer)?;
    Ok(Some(MediaTypeData {
        const_name: screaming_name(&type_name),
        type_name,
        identifier_literal: rust_literal(&media_type.identifier),
        identifier: media_type.identifier.clone(),
        docs: doc_lines(media_type.description.as_deref()),
        is_struct: body.is_struct,
        fields: body.fields,
        alias: body.alias,
    }))
}

/// Builds the record of a user type.
///
/// # Errors
///
/// Unresolved named types in the shape.
pub fn user_type_data(user_type: &UserType, types: &TypeIndex) -> Result<UserTypeData, GenError> {
    let referrer = format!("user type {:?}", user_type.type_name);
    let body = shape_body(&user_type.shape, types, &referrer)?;
    Ok(UserTypeData {
        type_name: types.resolve(&user_type.type_name, &referrer)?,
        docs: doc_lines(user_type.description.as_deref()),
        is_struct: body.is_struct,
        fields: body.fields,
        alias: body.alias,
    })
}

struct ShapeBody {
    is_struct: bool,
    fields: Vec<FieldData>,
    alias: String,
}

fn shape_body(shape: &DataType, types: &TypeIndex, referrer: &str) -> Result<ShapeBody, GenError> {
    match shape {
        DataType::Object { fields } => {
            let mut seen = HashSet::new();
            let fields = fields
                .iter()
                .map(|f| field_data(f, &mut seen, types, referrer))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ShapeBody {
                is_struct: true,
                fields,
                alias: String::new(),
            })
        }
        other => Ok(ShapeBody {
            is_struct: false,
            fields: Vec::new(),
            alias: types.rust_type(other, referrer)?,
        }),
    }
}

fn field_data(
    field: &Field,
    seen: &mut HashSet<String>,
    types: &TypeIndex,
    referrer: &str,
) -> Result<FieldData, GenError> {
    let ty = types.rust_type(&field.shape, referrer)?;
    let ident = unique_name(seen, &snake_name(&field.name));
    Ok(FieldData {
        name_literal: rust_literal(&field.name),
        rename: ident.trim_start_matches("r#") != field.name,
        name: field.name.clone(),
        field: ident,
        ty: if field.required {
            ty
        } else {
            format!("Option<{ty}>")
        },
        optional: !field.required,
        docs: doc_lines(field.description.as_deref()),
    })
}

fn route_data(routes: &[Route], version: &Version, resource: &Resource) -> Vec<RouteData> {
    routes
        .iter()
        .map(|route| {
            let method = route.method_upper();
            let path = route.full_path(version, resource);
            RouteData {
                method_literal: rust_literal(&method),
                path_literal: rust_literal(&path),
                method,
                path,
            }
        })
        .collect()
}

fn action_referrer(resource: &Resource, action: &Action) -> String {
    format!("action {:?} of resource {:?}", action.name, resource.name)
}

fn reserved(names: &[&str]) -> HashSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

/// Rust string literal for `value`.
fn rust_literal(value: &str) -> String {
    format!("{value:?}")
}

/// Splits a description into doc comment lines.
fn doc_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

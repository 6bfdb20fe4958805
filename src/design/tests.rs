#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::error::GenError;

fn param(name: &str, location: ParamLocation, shape: DataType, required: bool) -> Param {
    Param {
        name: name.into(),
        location,
        shape,
        required,
        description: None,
    }
}

fn bottle_resource() -> Resource {
    Resource {
        name: "bottle".into(),
        base_path: Some("/bottles/".into()),
        actions: vec![
            Action {
                name: "show".into(),
                routes: vec![Route::new("GET", "/:id/reviews/:reviewID")],
                ..Default::default()
            },
            Action {
                name: "list".into(),
                routes: vec![Route::new("GET", "")],
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn v1() -> Version {
    Version {
        version: "v1".into(),
        base_path: Some("/cellar".into()),
        resources: vec![bottle_resource()],
    }
}

fn api() -> Api {
    Api {
        name: "cellar".into(),
        versions: vec![v1()],
        media_types: vec![MediaType {
            identifier: "application/vnd.bottle+json".into(),
            type_name: "bottle".into(),
            description: None,
            shape: DataType::Object { fields: vec![] },
        }],
        ..Default::default()
    }
}

#[test]
fn test_route_captures_in_order() {
    let route = Route::new("GET", "/bottles/:id/reviews/:reviewID/*rest");
    assert_eq!(route.captures(), vec!["id", "reviewID", "rest"]);
    assert!(Route::new("GET", "/bottles").captures().is_empty());
}

#[test]
fn test_full_path_joins_base_paths() {
    let version = v1();
    let resource = &version.resources[0];
    let show = &resource.actions[0].routes[0];
    assert_eq!(
        show.full_path(&version, resource),
        "/cellar/bottles/:id/reviews/:reviewID"
    );
    let list = &resource.actions[1].routes[0];
    assert_eq!(list.full_path(&version, resource), "/cellar/bottles");
}

#[test]
fn test_full_path_absolute_route() {
    let version = v1();
    let resource = &version.resources[0];
    let route = Route::new("GET", "//health");
    assert_eq!(route.full_path(&version, resource), "/health");
}

#[test]
fn test_full_path_empty_is_root() {
    let version = Version::default();
    let resource = Resource::default();
    assert_eq!(Route::new("GET", "").full_path(&version, &resource), "/");
}

#[test]
fn test_canonical_action_defaults_to_show() {
    let mut resource = bottle_resource();
    assert_eq!(resource.canonical_action().unwrap().name, "show");
    assert_eq!(
        resource.canonical_route().unwrap().path,
        "/:id/reviews/:reviewID"
    );

    resource.canonical_action = Some("list".into());
    assert_eq!(resource.canonical_action().unwrap().name, "list");

    resource.canonical_action = None;
    resource.actions.retain(|a| a.name != "show");
    assert!(resource.canonical_action().is_none());
    assert!(resource.canonical_route().is_none());
}

#[test]
fn test_all_params_order_and_requiredness() {
    let version = Version::default();
    let resource = Resource {
        name: "bottle".into(),
        ..Default::default()
    };
    let action = Action {
        name: "show".into(),
        params: vec![
            param("sort", ParamLocation::Query, DataType::String, false),
            param("X-Trace", ParamLocation::Header, DataType::String, true),
            param("id", ParamLocation::Path, DataType::Integer, true),
            param("limit", ParamLocation::Query, DataType::Integer, true),
        ],
        routes: vec![
            Route::new("GET", "/bottles/:id"),
            Route::new("GET", "/accounts/:accountID/bottles/:id"),
        ],
        ..Default::default()
    };

    let params = action.all_params(&version, &resource);
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["id", "accountID", "sort", "limit", "X-Trace"]);

    assert_eq!(params[0].shape, DataType::Integer);
    assert!(params[0].required);
    assert_eq!(params[1].shape, DataType::String);
    assert!(!params[1].required, "capture missing from a route is optional");
    assert_eq!(params[2].location, ParamLocation::Query);
    assert_eq!(params[4].location, ParamLocation::Header);
}

#[test]
fn test_all_params_include_base_path_captures() {
    let version = Version {
        base_path: Some("/accounts/:accountID".into()),
        ..Default::default()
    };
    let resource = Resource {
        name: "bottle".into(),
        actions: vec![Action {
            name: "show".into(),
            routes: vec![Route::new("GET", "/bottles/:id")],
            ..Default::default()
        }],
        ..Default::default()
    };
    let params = resource.actions[0].all_params(&version, &resource);
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["accountID", "id"]);
}

#[test]
fn test_media_type_lookup_ignores_case_and_parameters() {
    let api = api();
    assert!(api
        .media_type_with_identifier("application/vnd.bottle+json")
        .is_some());
    assert!(api
        .media_type_with_identifier("Application/VND.Bottle+JSON; view=tiny")
        .is_some());
    assert!(api.media_type_with_identifier("application/json").is_none());
}

#[test]
fn test_labels() {
    let api = api();
    assert_eq!(api.label(), r#"API "cellar""#);
    assert_eq!(api.versions[0].label(&api), r#"API "cellar" version "v1""#);
    assert_eq!(Version::default().label(&api), r#"API "cellar""#);
}

#[test]
fn test_validate_accepts_well_formed_design() {
    api().validate().unwrap();
}

fn assert_invalid(api: &Api, needle: &str) {
    match api.validate() {
        Err(GenError::InvalidDesign(message)) => {
            assert!(message.contains(needle), "{message:?} should mention {needle:?}")
        }
        other => panic!("expected InvalidDesign, got {other:?}"),
    }
}

#[test]
fn test_validate_rejects_empty_name() {
    let mut api = api();
    api.name = " ".into();
    assert_invalid(&api, "API name");
}

#[test]
fn test_validate_rejects_duplicates() {
    let mut dup_version = api();
    dup_version.versions.push(v1());
    assert_invalid(&dup_version, "version \"v1\"");

    let mut dup_resource = api();
    dup_resource.versions[0].resources.push(bottle_resource());
    assert_invalid(&dup_resource, "resource \"bottle\"");

    let mut dup_action = api();
    let show = dup_action.versions[0].resources[0].actions[0].clone();
    dup_action.versions[0].resources[0].actions.push(show);
    assert_invalid(&dup_action, "action \"show\"");
}

#[test]
fn test_validate_rejects_unsafe_version_dirs() {
    for bad in ["..", ".", "v1/../../etc", "v\\1"] {
        let mut api = api();
        api.versions[0].version = bad.into();
        assert_invalid(&api, "directory name");
    }
}

#[test]
fn test_validate_rejects_dangling_canonical_action() {
    let mut api = api();
    api.versions[0].resources[0].canonical_action = Some("missing".into());
    assert_invalid(&api, "canonical action \"missing\"");
}

#[test]
fn test_validate_rejects_bad_routes() {
    let mut bad_method = api();
    bad_method.versions[0].resources[0].actions[0].routes[0].method = "GE T".into();
    assert_invalid(&bad_method, "invalid HTTP method");

    let mut bad_path = api();
    bad_path.versions[0].resources[0].actions[0].routes[0].path = "bottles".into();
    assert_invalid(&bad_path, "start with '/'");
}

#[test]
fn test_invalid_capture() {
    assert_eq!(invalid_capture("/bottles/:id/reviews/:review_ID2"), None);
    assert_eq!(invalid_capture("/files/*path"), None);
    assert_eq!(invalid_capture("/bottles/:bottle-id"), Some(":bottle-id"));
    assert_eq!(invalid_capture("/bottles/:id.json"), Some(":id.json"));
    assert_eq!(invalid_capture("/files/*"), Some("*"));
    assert_eq!(invalid_capture("/bottles/:"), Some(":"));
}

#[test]
fn test_validate_rejects_captures_the_router_would_name_differently() {
    let mut route = api();
    route.versions[0].resources[0].actions[0].routes[0].path = "/:bottle-id".into();
    assert_invalid(&route, "capture \":bottle-id\"");

    let mut resource_base = api();
    resource_base.versions[0].resources[0].base_path = Some("/accounts/:account.id".into());
    assert_invalid(&resource_base, "capture \":account.id\"");

    let mut version_base = api();
    version_base.versions[0].base_path = Some("/*".into());
    assert_invalid(&version_base, "capture \"*\"");
}

#[test]
fn test_path_captures_match_router_param_names() {
    use crate::runtime::{Error, RequestContext, Router, ServeMux};
    use std::sync::Arc;

    let api = api();
    let version = &api.versions[0];
    let resource = &version.resources[0];
    let path = resource.actions[0].routes[0].full_path(version, resource);

    let mut router = Router::new();
    router
        .handle("GET", &path, Arc::new(|_: &mut RequestContext| Ok::<(), Error>(())))
        .unwrap();
    let (_, params) = router.lookup(&http::Method::GET, "/cellar/bottles/7/reviews/9").unwrap();
    let captured: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(captured, path_captures(&path));
}

#[test]
fn test_validate_rejects_colliding_type_names() {
    let mut api = api();
    api.user_types.push(UserType {
        type_name: "Bottle".into(),
        description: None,
        shape: DataType::String,
    });
    assert_invalid(&api, "same generated type");
}

#[test]
fn test_yaml_design_parses() {
    let yaml = r#"
name: cellar
versions:
  - version: v1
    resources:
      - name: bottle
        media_type: application/vnd.bottle+json
        responses:
          NotFound: { status: 404 }
        actions:
          - name: show
            params:
              - { name: id, in: path, type: integer }
              - { name: tags, in: query, type: array, of: { type: string } }
            routes:
              - { method: GET, path: "/bottles/:id" }
            responses:
              OK: { status: 200, media_type: application/vnd.bottle+json }
media_types:
  - identifier: application/vnd.bottle+json
    type_name: bottle
    type: object
    fields:
      - { name: id, type: integer, required: true }
      - { name: vintage, type: named, ref: Year }
user_types:
  - { type_name: Year, type: integer }
"#;
    let api: Api = serde_yaml::from_str(yaml).unwrap();
    let resource = &api.versions[0].resources[0];
    let show = resource.action("show").unwrap();

    assert_eq!(show.params[0].shape, DataType::Integer);
    assert_eq!(
        show.params[1].shape,
        DataType::Array {
            of: Box::new(DataType::String)
        }
    );
    assert_eq!(show.params[1].location, ParamLocation::Query);
    assert_eq!(
        resource.responses.as_ref().unwrap()["NotFound"].status,
        404
    );

    let mt = &api.media_types[0];
    match &mt.shape {
        DataType::Object { fields } => {
            assert_eq!(fields.len(), 2);
            assert!(fields[0].required);
            assert_eq!(
                fields[1].shape,
                DataType::Named {
                    name: "Year".into()
                }
            );
        }
        other => panic!("expected object shape, got {other:?}"),
    }
    api.validate().unwrap();
}

#[test]
fn test_load_design_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let json = serde_json::to_string(&api()).unwrap();
    std::io::Write::write_all(&mut file, json.as_bytes()).unwrap();
    let loaded = load_design(file.path()).unwrap();
    assert_eq!(loaded, api());
}

#[test]
fn test_load_design_reports_path() {
    let err = load_design(std::path::Path::new("/nonexistent/design.yaml")).unwrap_err();
    assert!(format!("{err:#}").contains("design.yaml"));
}

#![allow(dead_code, clippy::unwrap_used)]

pub mod fixtures {
    use appgen::design::{
        Action, Api, DataType, Field, HeaderSpec, MediaType, Param, ParamLocation, Resource,
        ResponseSpec, Route, UserType, Version,
    };
    use std::collections::BTreeMap;

    pub const BOTTLE_MEDIA_TYPE: &str = "application/vnd.goa.example.bottle+json";
    pub const LABEL_MEDIA_TYPE: &str = "text/plain";

    fn response(status: u16, media_type: Option<&str>) -> ResponseSpec {
        ResponseSpec {
            status,
            media_type: media_type.map(str::to_string),
            description: None,
        }
    }

    fn bottle_resource() -> Resource {
        Resource {
            name: "bottle".into(),
            description: Some("A bottle of wine".into()),
            base_path: Some("/bottles".into()),
            media_type: Some(BOTTLE_MEDIA_TYPE.into()),
            headers: Some(BTreeMap::from([(
                "X-Account".to_string(),
                HeaderSpec {
                    required: true,
                    ..Default::default()
                },
            )])),
            responses: Some(BTreeMap::from([(
                "NotFound".to_string(),
                response(404, None),
            )])),
            actions: vec![
                Action {
                    name: "show".into(),
                    description: Some("Retrieve a bottle by id".into()),
                    params: vec![Param {
                        name: "id".into(),
                        location: ParamLocation::Path,
                        shape: DataType::Integer,
                        required: true,
                        description: Some("Bottle id".into()),
                    }],
                    routes: vec![Route::new("GET", "/:id")],
                    responses: Some(BTreeMap::from([(
                        "OK".to_string(),
                        response(200, Some(BOTTLE_MEDIA_TYPE)),
                    )])),
                    ..Default::default()
                },
                Action {
                    name: "list".into(),
                    params: vec![Param {
                        name: "years".into(),
                        location: ParamLocation::Query,
                        shape: DataType::Array {
                            of: Box::new(DataType::Integer),
                        },
                        required: false,
                        description: None,
                    }],
                    routes: vec![Route::new("GET", "")],
                    responses: Some(BTreeMap::from([(
                        "OK".to_string(),
                        response(200, Some(LABEL_MEDIA_TYPE)),
                    )])),
                    ..Default::default()
                },
                Action {
                    name: "create".into(),
                    payload: Some("BottlePayload".into()),
                    routes: vec![Route::new("POST", "")],
                    responses: Some(BTreeMap::from([(
                        "Created".to_string(),
                        response(201, None),
                    )])),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    fn bottle_media_type() -> MediaType {
        MediaType {
            identifier: BOTTLE_MEDIA_TYPE.into(),
            type_name: "bottle".into(),
            description: Some("A bottle of wine".into()),
            shape: DataType::Object {
                fields: vec![
                    Field {
                        name: "id".into(),
                        shape: DataType::Integer,
                        required: true,
                        description: None,
                    },
                    Field {
                        name: "name".into(),
                        shape: DataType::String,
                        required: true,
                        description: None,
                    },
                    Field {
                        name: "vintageYear".into(),
                        shape: DataType::Integer,
                        required: false,
                        description: None,
                    },
                ],
            },
        }
    }

    /// Primitive media type: referenced as its Rust type, no definition emitted.
    fn label_media_type() -> MediaType {
        MediaType {
            identifier: LABEL_MEDIA_TYPE.into(),
            type_name: "label".into(),
            description: None,
            shape: DataType::String,
        }
    }

    fn bottle_payload() -> UserType {
        UserType {
            type_name: "BottlePayload".into(),
            description: None,
            shape: DataType::Object {
                fields: vec![Field {
                    name: "name".into(),
                    shape: DataType::String,
                    required: true,
                    description: None,
                }],
            },
        }
    }

    /// Unversioned cellar API with one bottle resource.
    pub fn cellar_api() -> Api {
        Api {
            name: "cellar".into(),
            versions: vec![Version {
                version: String::new(),
                base_path: None,
                resources: vec![bottle_resource()],
            }],
            media_types: vec![bottle_media_type(), label_media_type()],
            user_types: vec![bottle_payload()],
            ..Default::default()
        }
    }

    /// Cellar API served under two named versions.
    pub fn versioned_cellar_api() -> Api {
        let mut api = cellar_api();
        let v1 = Version {
            version: "v1".into(),
            base_path: Some("/v1".into()),
            resources: vec![bottle_resource()],
        };
        let v2 = Version {
            version: "v2".into(),
            base_path: Some("/v2".into()),
            resources: vec![bottle_resource()],
        };
        api.versions = vec![v1, v2];
        api
    }
}

//! # Runtime Module
//!
//! The support code generated files link against. Generated contexts parse requests
//! through [`RequestContext`], generated controllers register their routes on a
//! [`ServeMux`], and generated href factories fill templates with [`href`].
//!
//! ## Serving a Generated API
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use appgen::runtime::{dispatch, DefaultVersionMux, VersionMux};
//!
//! let mut versions = DefaultVersionMux::new();
//! mount_bottle_controller(versions.mux_mut("v1")?, Arc::new(MyBottles::default()))?;
//! let response = dispatch(&versions, request);
//! ```
//!
//! Version selection reads the `X-API-Version` header first, then the `api_version`
//! query parameter. Requests without a version use the default mux (registered under
//! the empty version); [`NoVersionMux`] serves a single unversioned API.

mod context;
mod error;
mod mux;
mod router;

pub use context::{
    href, parse_json_param, parse_param, Param, Params, RequestContext, HREF_PLACEHOLDER,
    MAX_INLINE_PARAMS,
};
pub use error::{BadRequestError, Error};
pub use mux::{
    dispatch, request_version, DefaultVersionMux, HandleFunc, NoVersionMux, ServeMux,
    VersionMux, VERSION_HEADER, VERSION_PARAM,
};
pub use router::Router;

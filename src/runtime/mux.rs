use std::collections::BTreeMap;
use std::sync::Arc;

use http::{Method, Request, Response, StatusCode};
use tracing::{debug, warn};

use super::context::{Params, RequestContext};
use super::error::{BadRequestError, Error};
use super::router::Router;

/// Request header carrying the requested API version.
pub const VERSION_HEADER: &str = "X-API-Version";

/// Query parameter carrying the requested API version when the header is absent.
pub const VERSION_PARAM: &str = "api_version";

/// A registered request handler.
pub type HandleFunc = Arc<dyn Fn(&mut RequestContext) -> Result<(), Error> + Send + Sync>;

/// Explicit (method, path) registration and lookup.
pub trait ServeMux: Send + Sync {
    /// Registers `handler` for `method` and the path pattern `path`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRoute`] for unparsable methods and patterns or duplicate routes.
    fn handle(&mut self, method: &str, path: &str, handler: HandleFunc) -> Result<(), Error>;

    /// Handler of the first route matching the request, with the captured parameters.
    fn lookup(&self, method: &Method, path: &str) -> Option<(HandleFunc, Params)>;
}

/// Selects the [`ServeMux`] serving a request based on its API version.
pub trait VersionMux: Send + Sync {
    /// Installs the mux of `version`; the empty version is the default mux.
    ///
    /// # Errors
    ///
    /// Implementation specific, see [`NoVersionMux`].
    fn set_mux(&mut self, version: &str, mux: Box<dyn ServeMux>) -> Result<(), Error>;

    /// Mux of `version` for route registration, created on first use.
    ///
    /// # Errors
    ///
    /// Implementation specific, see [`NoVersionMux`].
    fn mux_mut(&mut self, version: &str) -> Result<&mut dyn ServeMux, Error>;

    /// Mux serving requests for `version`.
    ///
    /// # Errors
    ///
    /// [`Error::NoDefaultMux`] or [`Error::UnknownVersion`] when no mux matches.
    fn select(&self, version: Option<&str>) -> Result<&dyn ServeMux, Error>;
}

/// Routes by the `X-API-Version` header, falling back to the `api_version` query
/// parameter. Requests without a version go to the default mux.
#[derive(Default)]
pub struct DefaultVersionMux {
    muxes: BTreeMap<String, Box<dyn ServeMux>>,
    default: Option<Box<dyn ServeMux>>,
}

impl DefaultVersionMux {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered versions in order.
    pub fn versions(&self) -> impl Iterator<Item = &str> {
        self.muxes.keys().map(String::as_str)
    }
}

impl VersionMux for DefaultVersionMux {
    fn set_mux(&mut self, version: &str, mux: Box<dyn ServeMux>) -> Result<(), Error> {
        if version.is_empty() {
            self.default = Some(mux);
        } else {
            self.muxes.insert(version.to_string(), mux);
        }
        Ok(())
    }

    fn mux_mut(&mut self, version: &str) -> Result<&mut dyn ServeMux, Error> {
        let mux = if version.is_empty() {
            self.default.get_or_insert_with(new_router)
        } else {
            self.muxes
                .entry(version.to_string())
                .or_insert_with(new_router)
        };
        Ok(&mut **mux)
    }

    fn select(&self, version: Option<&str>) -> Result<&dyn ServeMux, Error> {
        match version.filter(|v| !v.is_empty()) {
            None => self.default.as_deref().ok_or(Error::NoDefaultMux),
            Some(v) => self
                .muxes
                .get(v)
                .map(|m| &**m)
                .ok_or_else(|| Error::UnknownVersion(v.to_string())),
        }
    }
}

/// Serves a single unversioned API; the request version is ignored.
pub struct NoVersionMux {
    mux: Box<dyn ServeMux>,
}

impl Default for NoVersionMux {
    fn default() -> Self {
        Self { mux: new_router() }
    }
}

impl NoVersionMux {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VersionMux for NoVersionMux {
    fn set_mux(&mut self, version: &str, mux: Box<dyn ServeMux>) -> Result<(), Error> {
        if !version.is_empty() {
            return Err(Error::VersionedMuxUnsupported);
        }
        self.mux = mux;
        Ok(())
    }

    fn mux_mut(&mut self, version: &str) -> Result<&mut dyn ServeMux, Error> {
        if !version.is_empty() {
            return Err(Error::VersionedMuxUnsupported);
        }
        Ok(&mut *self.mux)
    }

    fn select(&self, _version: Option<&str>) -> Result<&dyn ServeMux, Error> {
        Ok(&*self.mux)
    }
}

fn new_router() -> Box<dyn ServeMux> {
    Box::new(Router::new())
}

/// API version requested by `req`: the version header, else the version query parameter.
pub fn request_version<B>(req: &Request<B>) -> Option<String> {
    if let Some(v) = req
        .headers()
        .get(VERSION_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(v.trim().to_string());
    }
    let query = req.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == VERSION_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// Serves one request end to end.
///
/// Unknown versions and undecodable JSON bodies are 400s, unmatched routes 404s. A
/// handler failing with [`Error::BadRequest`] gets a 400, any other failure a 500,
/// unless the handler already wrote a response.
pub fn dispatch(version_mux: &dyn VersionMux, req: Request<Vec<u8>>) -> Response<Vec<u8>> {
    let version = request_version(&req);
    let mux = match version_mux.select(version.as_deref()) {
        Ok(mux) => mux,
        Err(e) => {
            debug!(version = ?version, error = %e, "No mux for request version");
            return error_response(BadRequestError::new("unknown_version", e.to_string()));
        }
    };

    let (parts, body) = req.into_parts();
    let Some((handler, params)) = mux.lookup(&parts.method, parts.uri.path()) else {
        debug!(method = %parts.method, path = %parts.uri.path(), "No route matched");
        let mut response = Response::new(b"not found".to_vec());
        *response.status_mut() = StatusCode::NOT_FOUND;
        return response;
    };

    let payload = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice(&body) {
            Ok(value) => Some(value),
            Err(e) => return error_response(BadRequestError::invalid_payload(e)),
        }
    };

    let uri = parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.path().to_string(), |pq| pq.as_str().to_string());
    let mut ctx = RequestContext::new(parts.method, &uri, parts.headers)
        .with_params(params)
        .with_payload(payload);

    if let Err(err) = handler(&mut ctx) {
        if ctx.response_written() {
            warn!(error = %err, status = ctx.response_status(), "Handler failed after responding");
        } else {
            let written = match &err {
                Error::BadRequest(bad) => ctx.bad_request(bad),
                other => ctx.bug(format_args!("{other}")),
            };
            if let Err(e) = written {
                warn!(error = %e, "Failed to write error response");
            }
        }
    }
    ctx.into_response()
}

fn error_response(err: BadRequestError) -> Response<Vec<u8>> {
    let mut ctx = RequestContext::new(Method::GET, "/", http::HeaderMap::new());
    if let Err(e) = ctx.bad_request(&err) {
        warn!(error = %e, "Failed to write error response");
    }
    ctx.into_response()
}

use std::fmt;
use std::str::FromStr;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use smallvec::SmallVec;

use super::error::{BadRequestError, Error};

/// Maximum number of captured path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// A captured path parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Captured path parameters in path order.
pub type Params = SmallVec<[Param; MAX_INLINE_PARAMS]>;

/// One request and the response being built for it.
///
/// A response is written at most once; later attempts fail with
/// [`Error::AlreadyWritten`].
#[derive(Debug)]
pub struct RequestContext {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    params: Params,
    headers: HeaderMap,
    payload: Option<Value>,
    response_headers: HeaderMap,
    status: Option<StatusCode>,
    body: Vec<u8>,
}

impl RequestContext {
    /// Creates a context for `uri` (path plus optional query string).
    pub fn new(method: Method, uri: &str, headers: HeaderMap) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (uri, ""),
        };
        let query = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self {
            method,
            path: path.to_string(),
            query,
            params: Params::new(),
            headers,
            payload: None,
            response_headers: HeaderMap::new(),
            status: None,
            body: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a path or query parameter; path captures win.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == name)
            .map(|p| p.value.as_str())
            .or_else(|| {
                self.query
                    .iter()
                    .find(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str())
            })
    }

    /// Every value of a path or query parameter, path captures first.
    pub fn get_many(&self, name: &str) -> Option<Vec<&str>> {
        let values: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.key == name)
            .map(|p| p.value.as_str())
            .chain(
                self.query
                    .iter()
                    .filter(|(k, _)| k == name)
                    .map(|(_, v)| v.as_str()),
            )
            .collect();
        (!values.is_empty()).then_some(values)
    }

    pub fn request_headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a request header, if present and valid UTF-8.
    pub fn request_header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every value of a request header, comma-separated lists split apart.
    pub fn request_header_values(&self, name: &str) -> Option<Vec<&str>> {
        let values: Vec<&str> = self
            .headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect();
        (!values.is_empty()).then_some(values)
    }

    /// Decoded JSON request body.
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    /// Request body as `T`; `None` when the request has no body.
    ///
    /// # Errors
    ///
    /// [`BadRequestError`] when the body does not match `T`.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<Option<T>, BadRequestError> {
        match &self.payload {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(BadRequestError::invalid_payload),
            None => Ok(None),
        }
    }

    /// Outgoing response headers.
    pub fn header(&mut self) -> &mut HeaderMap {
        &mut self.response_headers
    }

    /// Writes the response.
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyWritten`] when a response was written before, [`Error::InvalidStatus`]
    /// for codes outside 100-999.
    pub fn respond(&mut self, code: u16, body: &[u8]) -> Result<(), Error> {
        self.ensure_unwritten()?;
        let status = StatusCode::from_u16(code).map_err(|_| Error::InvalidStatus(code))?;
        self.status = Some(status);
        self.body = body.to_vec();
        Ok(())
    }

    /// Writes `body` as a JSON response.
    ///
    /// # Errors
    ///
    /// Encoding failures and the errors of [`respond`](Self::respond).
    pub fn json<T: Serialize + ?Sized>(&mut self, code: u16, body: &T) -> Result<(), Error> {
        self.ensure_unwritten()?;
        let encoded = serde_json::to_vec(body)?;
        if !self.response_headers.contains_key(CONTENT_TYPE) {
            self.response_headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        self.respond(code, &encoded)
    }

    /// Writes a 400 response describing `err`.
    ///
    /// # Errors
    ///
    /// See [`respond`](Self::respond).
    pub fn bad_request(&mut self, err: &BadRequestError) -> Result<(), Error> {
        self.json(StatusCode::BAD_REQUEST.as_u16(), err)
    }

    /// Writes a 500 response with a formatted message.
    ///
    /// # Errors
    ///
    /// See [`respond`](Self::respond).
    pub fn bug(&mut self, message: fmt::Arguments<'_>) -> Result<(), Error> {
        self.ensure_unwritten()?;
        let text = message.to_string();
        self.response_headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
        self.respond(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), text.as_bytes())
    }

    fn ensure_unwritten(&self) -> Result<(), Error> {
        match self.status {
            Some(status) => Err(Error::AlreadyWritten(status.as_u16())),
            None => Ok(()),
        }
    }

    pub fn response_written(&self) -> bool {
        self.status.is_some()
    }

    /// Status of the written response, 0 when none was written.
    pub fn response_status(&self) -> u16 {
        self.status.map_or(0, |s| s.as_u16())
    }

    pub fn response_length(&self) -> usize {
        self.body.len()
    }

    pub fn response_body(&self) -> &[u8] {
        &self.body
    }

    /// Converts into an HTTP response; 204 when nothing was written.
    pub fn into_response(self) -> Response<Vec<u8>> {
        let mut response = Response::new(self.body);
        *response.status_mut() = self.status.unwrap_or(StatusCode::NO_CONTENT);
        *response.headers_mut() = self.response_headers;
        response
    }
}

/// Parses one raw parameter value.
///
/// # Errors
///
/// [`BadRequestError`] naming the parameter when `raw` does not parse.
pub fn parse_param<T>(name: &str, raw: &str) -> Result<T, BadRequestError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| BadRequestError::invalid_param(name, e))
}

/// Parses one raw parameter value holding JSON; a value that is not JSON is read as a
/// JSON string.
///
/// # Errors
///
/// [`BadRequestError`] naming the parameter when the value does not match `T`.
pub fn parse_json_param<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, BadRequestError> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_value(Value::String(raw.to_string()))
            .map_err(|e| BadRequestError::invalid_param(name, e)),
    }
}

/// Placeholder of one argument in an href template.
pub const HREF_PLACEHOLDER: &str = "%v";

/// Fills the `%v` placeholders of `template` with `args`, left to right.
///
/// Placeholders without an argument are kept; extra arguments are ignored.
///
/// ```rust
/// use appgen::runtime::href;
/// assert_eq!(href("/bottles/%v/reviews/%v", &[&1, &"good"]), "/bottles/1/reviews/good");
/// ```
pub fn href(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut pieces = template.split(HREF_PLACEHOLDER);
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    let mut args = args.iter();
    for piece in pieces {
        match args.next() {
            Some(arg) => out.push_str(&arg.to_string()),
            None => out.push_str(HREF_PLACEHOLDER),
        }
        out.push_str(piece);
    }
    out
}

use std::sync::Arc;

use http::Method;
use regex::Regex;
use tracing::debug;

use super::context::{Param, Params};
use crate::design::invalid_capture;
use super::error::Error;
use super::mux::{HandleFunc, ServeMux};

struct RouteEntry {
    method: Method,
    pattern: String,
    regex: Regex,
    param_names: Vec<String>,
    catch_all: bool,
    handler: HandleFunc,
}

/// Regex-backed [`ServeMux`].
///
/// Patterns use `:name` for a single segment and `*name` for the rest of the path.
/// Routes without captures are tried before routes with captures, catch-all routes
/// last; otherwise registration order decides.
#[derive(Default)]
pub struct Router {
    routes: Vec<RouteEntry>,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|r| format!("{} {}", r.method, r.pattern)))
            .finish()
    }
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered routes in match order.
    pub fn routes(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes.iter().map(|r| (&r.method, r.pattern.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Compiles a route pattern into an anchored regex and its capture names.
    pub(crate) fn path_to_regex(path: &str) -> Result<(Regex, Vec<String>, bool), regex::Error> {
        if path == "/" {
            return Ok((Regex::new(r"^/$")?, Vec::new(), false));
        }

        let mut pattern = String::with_capacity(path.len() + 8);
        pattern.push('^');
        let mut param_names = Vec::new();
        let mut catch_all = false;

        for segment in path.split('/').skip(1) {
            if let Some(name) = segment.strip_prefix(':') {
                pattern.push_str("/([^/]+)");
                param_names.push(name.to_string());
            } else if let Some(name) = segment.strip_prefix('*') {
                pattern.push_str("/(.*)");
                param_names.push(name.to_string());
                catch_all = true;
            } else {
                pattern.push('/');
                pattern.push_str(&regex::escape(segment));
            }
        }

        pattern.push('$');
        Ok((Regex::new(&pattern)?, param_names, catch_all))
    }
}

impl ServeMux for Router {
    fn handle(&mut self, method: &str, path: &str, handler: HandleFunc) -> Result<(), Error> {
        let invalid = |reason: String| Error::InvalidRoute {
            method: method.to_string(),
            path: path.to_string(),
            reason,
        };
        let method_value = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
            .map_err(|e| invalid(e.to_string()))?;
        if !path.starts_with('/') {
            return Err(invalid("path must start with '/'".into()));
        }
        if let Some(segment) = invalid_capture(path) {
            return Err(invalid(format!(
                "capture {segment:?} must be named with ASCII letters, digits or '_'"
            )));
        }
        if self
            .routes
            .iter()
            .any(|r| r.method == method_value && r.pattern == path)
        {
            return Err(invalid("route already registered".into()));
        }
        let (regex, param_names, catch_all) =
            Self::path_to_regex(path).map_err(|e| invalid(e.to_string()))?;

        debug!(method = %method_value, path = %path, "Registered route");
        self.routes.push(RouteEntry {
            method: method_value,
            pattern: path.to_string(),
            regex,
            param_names,
            catch_all,
            handler,
        });
        self.routes
            .sort_by_key(|r| (r.catch_all, !r.param_names.is_empty()));
        Ok(())
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(HandleFunc, Params)> {
        self.routes
            .iter()
            .filter(|r| r.method == *method)
            .find_map(|r| {
                let caps = r.regex.captures(path)?;
                let params = r
                    .param_names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| {
                        let value = caps.get(i + 1).map_or("", |m| m.as_str());
                        Param::new(name.as_str(), value)
                    })
                    .collect();
                Some((Arc::clone(&r.handler), params))
            })
    }
}

// Code generated by appgen. DO NOT EDIT.
//
// API "cellar": Application Contexts
//
// Package: cellar_app

#![allow(dead_code, unused_imports, non_camel_case_types)]
use std::collections::BTreeMap;
use appgen::runtime::{BadRequestError, Error, RequestContext, parse_json_param, parse_param};
use super::media_types::*;
use super::user_types::*;
/// ShowBottleContext provides the bottle resource show action context.
/// Retrieve a bottle by id
///
/// Generated for API "cellar", routes:
/// - `GET /bottles/:id`
pub struct ShowBottleContext<'a> {
    ctx: &'a mut RequestContext,
    /// Bottle id
    /// From the path parameter `id`.
    pub id: i64,
}
impl<'a> ShowBottleContext<'a> {
    /// Parses the parameters of the request.
    ///
    /// Fails with a bad request error when a required value is missing or a value does not parse.
    pub fn new(ctx: &'a mut RequestContext) -> Result<Self, BadRequestError> {
        if ctx.request_header("X-Account").is_none() {
            return Err(BadRequestError::missing_header("X-Account"));
        }
        let id = match ctx.get("id") {
            Some(raw) => Some(parse_param::<i64>("id", raw)?),
            None => None,
        };
        let id = id.ok_or_else(|| BadRequestError::missing_param("id"))?;
        Ok(Self { ctx, id })
    }
    /// Request context the action runs in.
    pub fn context(&mut self) -> &mut RequestContext {
        &mut *self.ctx
    }
    /// Sends the NotFound response (404).
    pub fn not_found(&mut self) -> Result<(), Error> {
        self.ctx.respond(404, &[])
    }
    /// Sends the OK response (200).
    pub fn ok(&mut self, body: &Bottle) -> Result<(), Error> {
        self.ctx.json(200, body)
    }
}
/// ListBottleContext provides the bottle resource list action context.
///
/// Generated for API "cellar", routes:
/// - `GET /bottles`
pub struct ListBottleContext<'a> {
    ctx: &'a mut RequestContext,
    /// From the query parameter `years`.
    pub years: Option<Vec<i64>>,
}
impl<'a> ListBottleContext<'a> {
    /// Parses the parameters of the request.
    ///
    /// Fails with a bad request error when a required value is missing or a value does not parse.
    pub fn new(ctx: &'a mut RequestContext) -> Result<Self, BadRequestError> {
        if ctx.request_header("X-Account").is_none() {
            return Err(BadRequestError::missing_header("X-Account"));
        }
        let years = match ctx.get_many("years") {
            Some(raw) => {
                Some(
                    raw
                        .into_iter()
                        .map(|v| parse_param::<i64>("years", v))
                        .collect::<Result<Vec<_>, _>>()?,
                )
            }
            None => None,
        };
        Ok(Self { ctx, years })
    }
    /// Request context the action runs in.
    pub fn context(&mut self) -> &mut RequestContext {
        &mut *self.ctx
    }
    /// Sends the NotFound response (404).
    pub fn not_found(&mut self) -> Result<(), Error> {
        self.ctx.respond(404, &[])
    }
    /// Sends the OK response (200).
    pub fn ok(&mut self, body: &String) -> Result<(), Error> {
        self.ctx.json(200, body)
    }
}
/// CreateBottleContext provides the bottle resource create action context.
///
/// Generated for API "cellar", routes:
/// - `POST /bottles`
pub struct CreateBottleContext<'a> {
    ctx: &'a mut RequestContext,
    pub payload: Option<BottlePayload>,
}
impl<'a> CreateBottleContext<'a> {
    /// Parses the parameters and payload of the request.
    ///
    /// Fails with a bad request error when a required value is missing or a value does not parse.
    pub fn new(ctx: &'a mut RequestContext) -> Result<Self, BadRequestError> {
        if ctx.request_header("X-Account").is_none() {
            return Err(BadRequestError::missing_header("X-Account"));
        }
        let payload = ctx.payload_as::<BottlePayload>()?;
        Ok(Self { ctx, payload })
    }
    /// Request context the action runs in.
    pub fn context(&mut self) -> &mut RequestContext {
        &mut *self.ctx
    }
    /// Sends the Created response (201).
    pub fn created(&mut self) -> Result<(), Error> {
        self.ctx.respond(201, &[])
    }
    /// Sends the NotFound response (404).
    pub fn not_found(&mut self) -> Result<(), Error> {
        self.ctx.respond(404, &[])
    }
}

// Code generated by appgen. DO NOT EDIT.
//
// API "cellar": Application Controllers
//
// Package: cellar_app

#![allow(dead_code, unused_imports, non_camel_case_types)]
use std::sync::Arc;
use appgen::runtime::{Error, RequestContext, ServeMux};
use super::contexts::*;
/// BottleController lists the actions of the bottle resource of API "cellar".
/// A bottle of wine
pub trait BottleController: Send + Sync {
    /// Handles the show action.
    /// Retrieve a bottle by id
    fn show(&self, ctx: &mut ShowBottleContext<'_>) -> Result<(), Error>;
    /// Handles the list action.
    fn list(&self, ctx: &mut ListBottleContext<'_>) -> Result<(), Error>;
    /// Handles the create action.
    fn create(&self, ctx: &mut CreateBottleContext<'_>) -> Result<(), Error>;
}
/// Registers the routes of the bottle actions with `mux`, dispatching to `ctrl`.
pub fn mount_bottle_controller(
    mux: &mut dyn ServeMux,
    ctrl: Arc<dyn BottleController>,
) -> Result<(), Error> {
    {
        let ctrl = Arc::clone(&ctrl);
        mux.handle(
            "GET",
            "/bottles/:id",
            Arc::new(move |ctx: &mut RequestContext| {
                let mut action_ctx = ShowBottleContext::new(ctx)?;
                ctrl.show(&mut action_ctx)
            }),
        )?;
    }
    {
        let ctrl = Arc::clone(&ctrl);
        mux.handle(
            "GET",
            "/bottles",
            Arc::new(move |ctx: &mut RequestContext| {
                let mut action_ctx = ListBottleContext::new(ctx)?;
                ctrl.list(&mut action_ctx)
            }),
        )?;
    }
    {
        let ctrl = Arc::clone(&ctrl);
        mux.handle(
            "POST",
            "/bottles",
            Arc::new(move |ctx: &mut RequestContext| {
                let mut action_ctx = CreateBottleContext::new(ctx)?;
                ctrl.create(&mut action_ctx)
            }),
        )?;
    }
    Ok(())
}

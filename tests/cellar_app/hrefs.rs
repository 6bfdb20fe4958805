// Code generated by appgen. DO NOT EDIT.
//
// API "cellar": Application Resource Href Factories
//
// Package: cellar_app

#![allow(dead_code, unused_imports, non_camel_case_types)]
use std::fmt::Display;
use appgen::runtime::href;
/// Identifier of the media type rendering bottle resources.
pub const BOTTLE_MEDIA_TYPE: &str = "application/vnd.goa.example.bottle+json";
/// Canonical href template of bottle resources, each `%v` stands for one of:
/// - `id`
pub const BOTTLE_HREF_TEMPLATE: &str = "/bottles/%v";
/// Canonical href of a bottle resource.
pub fn bottle_href(id: impl Display) -> String {
    href(BOTTLE_HREF_TEMPLATE, &[&id])
}

// Code generated by appgen. DO NOT EDIT.
//
// API "cellar": Application Media Types
//
// Package: cellar_app

#![allow(dead_code, unused_imports, non_camel_case_types)]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use super::user_types::*;
/// Media type identifier of [`Bottle`].
pub const BOTTLE_IDENTIFIER: &str = "application/vnd.goa.example.bottle+json";
/// Bottle media type (`application/vnd.goa.example.bottle+json`).
/// A bottle of wine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottle {
    pub id: i64,
    pub name: String,
    #[serde(rename = "vintageYear")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vintage_year: Option<i64>,
}

// Code generated by appgen. DO NOT EDIT.
//
// API "cellar": Application User Types
//
// Package: cellar_app

#![allow(dead_code, unused_imports, non_camel_case_types)]
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use super::media_types::*;
/// BottlePayload user type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottlePayload {
    pub name: String,
}

//! Checked-in output of `appgen` for the cellar design in `tests/common/mod.rs`,
//! generated with package `cellar_app` and the default runtime crate.
//!
//! `runtime_tests.rs` compiles these files, serves requests with them and
//! checks that regenerating the design reproduces them.

pub mod contexts;
pub mod controllers;
pub mod hrefs;
pub mod media_types;
pub mod user_types;

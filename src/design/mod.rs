//! # Design Module
//!
//! The in-memory design graph the generator reads: an [`Api`] owning ordered
//! [`Version`]s, each owning ordered [`Resource`]s with their [`Action`]s, plus the
//! [`MediaType`]s and [`UserType`]s of the API.
//!
//! ```text
//! Api
//! ├── versions: Vec<Version>
//! │   └── resources: Vec<Resource>
//! │       └── actions: Vec<Action>
//! │           └── routes: Vec<Route>
//! ├── media_types: Vec<MediaType>
//! └── user_types: Vec<UserType>
//! ```
//!
//! The graph is built once upstream (in code, or with [`load_design`] from a YAML or
//! JSON document) and is never mutated by generation. Derived accessors such as
//! [`Action::all_params`], [`Resource::canonical_route`] and
//! [`Api::media_type_with_identifier`] live next to the types.

mod load;
mod types;
mod validate;
#[cfg(test)]
mod tests;

pub use load::load_design;
pub use types::*;

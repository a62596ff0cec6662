//! View models served to the site and the JSON API.
//!
//! Field names serialize as camelCase to match the page and API contract.

mod pagination;
mod post;
mod repository;
mod tag;

pub use pagination::*;
pub use post::*;
pub use repository::*;
pub use tag::*;

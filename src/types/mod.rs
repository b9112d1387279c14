//! Request encoding types shared by every endpoint.

pub mod params;
pub mod serde_helpers;
pub mod values;

pub use params::{Filters, ListParams, MAX_LIMIT, Params};
pub use values::RequestValues;

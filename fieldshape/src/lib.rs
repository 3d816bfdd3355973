//! Field projection ("data shaping") for API response entities.
//!
//! Lets a client ask for a subset of an entity's fields, typically through a
//! `?fields=id,name` query parameter, and returns a dynamically keyed record
//! ready for serialization:
//! - [`Shapeable`] / [`shapeable!`] — registers a type's readable fields
//! - [`PropertyCache`] — process-wide `TypeId` → descriptor list, populated once per type
//! - [`FieldSelection`] — the parsed, case-insensitive set of requested names
//! - [`FieldShaper`] — `shape_one`, `shape_many`, `validate`
//! - [`ShapedRecord`] — the ordered name → value output
//!
//! Request parsing and response serialization belong to the hosting HTTP layer.

mod cache;
mod descriptor;
mod error;
mod record;
mod selection;
mod shaper;

pub use cache::PropertyCache;
pub use descriptor::{Accessor, PropertyDescriptor, Shapeable};
pub use error::{ShapeError, ShapeResult};
pub use record::ShapedRecord;
pub use selection::FieldSelection;
pub use shaper::{FieldShaper, ShaperConfig, DEFAULT_SEPARATOR};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

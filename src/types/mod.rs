//! XMP value types
//!
//! This module defines the field value types used by schema models.

pub mod array;
pub mod datetime;
pub mod structs;

pub use array::{AltString, Bag, Seq, X_DEFAULT};
pub use datetime::XmpDateTime;
pub use structs::{Dimensions, ResourceEvent, ResourceRef};

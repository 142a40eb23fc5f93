//! XMP Core module
//!
//! This module contains the document model and the codec engine: parsing,
//! namespace resolution, model binding and serialization.

pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod json;
pub mod model;
pub mod namespace;
pub mod node;
pub mod options;
pub mod parser;
pub mod property;
pub mod serializer;

pub use decoder::Decoder;
pub use document::{Document, DEFAULT_TOOLKIT};
pub use encoder::Encoder;
pub use error::{XmpError, XmpResult};
pub use model::{Fields, Model, ModelBase, ModelFactory};
pub use namespace::{
    lookup_namespace, register_namespace, registry, Namespace, NamespaceRegistry,
};
pub use node::{ArrayType, Attr, Node, NodeList, QName};
pub use options::{log_level, set_log_level, LogLevel, XmpOptions};
pub use parser::XmpParser;
pub use property::{Property, PropertyRef, XmpProperty};
pub use serializer::XmpSerializer;

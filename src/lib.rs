//! # xmpdoc
//!
//! Typed XMP documents with a lossless RDF/XML codec and a JSON projection.
//!
//! Schemas are plain structs implementing [`Model`]. Registered schemas are
//! bound to their namespace when a packet is decoded; everything the models
//! do not recognize, including whole namespaces without a schema, is kept as
//! generic [`Node`]s and written back unchanged.
//!
//! ## Quick start
//!
//! ```
//! use xmpdoc::models::dc::DublinCore;
//! use xmpdoc::{models, unmarshal, marshal};
//!
//! models::register_all().unwrap();
//!
//! let packet = r#"<x:xmpmeta xmlns:x="adobe:ns:meta/">
//!   <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
//!     <rdf:Description rdf:about="" xmlns:dc="http://purl.org/dc/elements/1.1/">
//!       <dc:subject><rdf:Bag><rdf:li>a</rdf:li><rdf:li>b</rdf:li></rdf:Bag></dc:subject>
//!     </rdf:Description>
//!   </rdf:RDF>
//! </x:xmpmeta>"#;
//!
//! let mut doc = unmarshal(packet.as_bytes()).unwrap();
//! let dc = doc.model_mut::<DublinCore>().unwrap();
//! dc.subject.push("c".to_string());
//!
//! let out = marshal(&mut doc).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("<rdf:li>c</rdf:li>"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: document model, namespaces, decoder and encoder
//! - [`types`]: field value types (`Bag`, `Seq`, `AltString`, dates, structures)
//! - [`models`]: bundled schemas (Dublin Core, XMP Basic, XMP Media
//!   Management, XMP Dynamic Media)

pub mod core;
pub mod models;
pub mod types;

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

pub use crate::core::{
    lookup_namespace, register_namespace, registry, set_log_level, ArrayType, Attr, Decoder,
    Document, Encoder, Fields, LogLevel, Model, ModelBase, ModelFactory, Namespace,
    NamespaceRegistry, Node, NodeList, QName, XmpError, XmpOptions, XmpProperty, XmpResult,
};
pub use types::{AltString, Bag, Dimensions, ResourceEvent, ResourceRef, Seq, XmpDateTime};

/// Decode a packet with default options
///
/// # Errors
///
/// Returns `ParseError` for malformed XML or RDF.
pub fn unmarshal(data: &[u8]) -> XmpResult<Document> {
    unmarshal_with(data, XmpOptions::default())
}

/// Decode a packet with explicit options
pub fn unmarshal_with(data: &[u8], options: XmpOptions) -> XmpResult<Document> {
    Decoder::with_options(options).decode(data)
}

/// Encode a document with default options.
///
/// Models get a chance to sync derived fields first; the document is clean
/// afterwards.
pub fn marshal(doc: &mut Document) -> XmpResult<Vec<u8>> {
    marshal_with(doc, XmpOptions::default())
}

/// Encode a document with explicit options
pub fn marshal_with(doc: &mut Document, options: XmpOptions) -> XmpResult<Vec<u8>> {
    doc.sync_to_xmp()?;
    let packet = Encoder::with_options(options).encode(doc)?;
    doc.clear_dirty();
    Ok(packet)
}

//! XMP encoder
//!
//! Builds the RDF/XML node tree of a [`Document`] and hands it to the
//! serializer. Every top level node contributes its model's fields first,
//! followed by the generic residue it carries.

use crate::core::document::Document;
use crate::core::error::XmpResult;
use crate::core::model::{Fields, Model};
use crate::core::namespace::{registry, NamespaceRegistry};
use crate::core::node::{ArrayType, Attr, Node, NodeList, QName};
use crate::core::options::{LogLevel, XmpOptions};
use crate::core::property::{Property, XmpProperty};
use crate::core::serializer::XmpSerializer;
use indexmap::IndexMap;
use std::io::Write;
use std::sync::Arc;

/// Encoder from documents and models to RDF/XML
#[derive(Debug)]
pub struct Encoder {
    registry: Arc<NamespaceRegistry>,
    options: XmpOptions,
    /// Preferred prefixes of the documents being written, keyed by URI
    hints: IndexMap<String, String>,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Create an encoder using the global registry and default options
    pub fn new() -> Self {
        Self::with_options(XmpOptions::default())
    }

    /// Create an encoder using the global registry
    pub fn with_options(options: XmpOptions) -> Self {
        Self::with_registry(registry(), options)
    }

    /// Create an encoder using an explicit registry snapshot
    pub fn with_registry(registry: Arc<NamespaceRegistry>, options: XmpOptions) -> Self {
        Self {
            registry,
            options,
            hints: IndexMap::new(),
        }
    }

    /// Options in effect
    pub fn options(&self) -> &XmpOptions {
        &self.options
    }

    /// Encode a document as a complete packet
    pub fn encode(&mut self, doc: &Document) -> XmpResult<Vec<u8>> {
        Ok(self.encode_to_string(doc)?.into_bytes())
    }

    /// Encode a document as a complete packet string
    pub fn encode_to_string(&mut self, doc: &Document) -> XmpResult<String> {
        let mut desc = self.encode_resource(doc)?;
        desc.attrs
            .insert(0, Attr::new(QName::rdf("about"), doc.about()));

        let serializer = XmpSerializer::new(&self.registry, &self.hints, self.options);
        serializer.serialize_packet(&desc, doc.toolkit())
    }

    /// Encode a document as a complete packet into `writer`
    ///
    /// # Errors
    ///
    /// Returns `IoError` when the writer fails.
    pub fn encode_to<W: Write>(&mut self, doc: &Document, writer: &mut W) -> XmpResult<()> {
        let packet = self.encode_to_string(doc)?;
        writer.write_all(packet.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Build the `rdf:Description` element of a document
    ///
    /// The element carries every property of the document; `rdf:about` is
    /// left to the caller.
    pub fn encode_resource(&mut self, doc: &Document) -> XmpResult<Node> {
        for ns in doc.int_ns.values().chain(doc.ext_ns.values()) {
            self.hints
                .entry(ns.uri().to_string())
                .or_insert_with(|| ns.prefix().to_string());
        }

        let mut desc = Node::new(QName::rdf("Description"));
        for node in doc.nodes.iter() {
            let encoded = self.encode_node(node)?;
            for attr in encoded.attrs {
                if desc.attrs.iter().any(|a| a.name == attr.name) {
                    self.options.log(
                        LogLevel::Debug,
                        format_args!("dropping duplicate attribute '{}'", attr.name),
                    );
                    continue;
                }
                desc.attrs.push(attr);
            }
            desc.nodes.extend(encoded.nodes);
        }
        Ok(desc)
    }

    /// Encode one top level node: model fields first, then the residue
    pub fn encode_node(&mut self, node: &Node) -> XmpResult<Node> {
        let mut encoded = Node::new(node.name.clone());
        if let Some(model) = node.model.as_deref() {
            self.encode_model(model, &mut encoded)?;
        }

        // anything the model wrote supersedes a residue copy of the same
        // property, whether that copy was an attribute or an element
        let written: Vec<QName> = encoded
            .attrs
            .iter()
            .map(|a| a.name.clone())
            .chain(encoded.nodes.iter().map(|n| n.name.clone()))
            .collect();
        for attr in node.attrs.iter() {
            if written.contains(&attr.name) {
                self.drop_stale(&attr.name);
                continue;
            }
            encoded.attrs.push(attr.clone());
        }
        for child in node.nodes.iter() {
            if written.contains(&child.name) {
                self.drop_stale(&child.name);
                continue;
            }
            encoded.nodes.add_node(child.clone());
        }
        if node.has_text() {
            encoded.value = node.value.clone();
        }
        Ok(encoded)
    }

    fn drop_stale(&self, name: &QName) {
        self.options.log(
            LogLevel::Debug,
            format_args!("'{}' is written by the model, dropping stale copy", name),
        );
    }

    /// Append the fields of `model` to `node`
    pub fn encode_model(&mut self, model: &dyn Model, node: &mut Node) -> XmpResult<()> {
        model.encode_xmp(self, node)
    }

    /// Append property `name` to `node` unless `value` is zero.
    ///
    /// Simple values become attributes, everything else a child element.
    pub fn encode_property<T: XmpProperty>(
        &mut self,
        node: &mut Node,
        name: QName,
        value: &T,
    ) -> XmpResult<()> {
        if value.is_zero() {
            return Ok(());
        }
        match value.marshal_xmp(self, &name)? {
            Property::Attr(text) => node.attrs.push(Attr::new(name, text)),
            Property::Element(mut element) => {
                element.name = name;
                node.nodes.add_node(element);
            }
        }
        Ok(())
    }

    /// Encode a structure value.
    ///
    /// All-simple structures keep their members as attributes. As soon as
    /// one member needs an element, every member is written as an element
    /// under `rdf:parseType="Resource"`.
    pub fn encode_struct<T: Fields>(&mut self, value: &T) -> XmpResult<Node> {
        let mut node = Node::default();
        value.encode_fields(self, &mut node)?;
        if !node.nodes.is_empty() {
            let mut members: NodeList = std::mem::take(&mut node.attrs)
                .into_iter()
                .map(|attr| Node::leaf(attr.name, attr.value))
                .collect();
            members.append(&mut node.nodes);
            node.nodes = members;
            node.attrs
                .push(Attr::new(QName::rdf("parseType"), "Resource"));
        }
        Ok(node)
    }

    /// Encode the items of a `Bag` or `Seq`
    pub fn encode_array<T: XmpProperty>(
        &mut self,
        kind: ArrayType,
        items: &[T],
    ) -> XmpResult<Node> {
        let li = QName::rdf("li");
        let mut container = Node::new(QName::rdf(kind.rdf_type()));
        for item in items {
            let entry = match item.marshal_xmp(self, &li)? {
                Property::Attr(text) => Node::leaf(li.clone(), text),
                Property::Element(mut element) => {
                    element.name = li.clone();
                    element
                }
            };
            container.nodes.add_node(entry);
        }

        let mut node = Node::default();
        node.nodes.add_node(container);
        Ok(node)
    }

    /// Encode a language alternative, in iteration order
    pub fn encode_alt<'a>(&mut self, values: impl Iterator<Item = (&'a str, &'a str)>) -> Node {
        let mut container = Node::new(QName::rdf("Alt"));
        for (lang, value) in values {
            let mut li = Node::leaf(QName::rdf("li"), value);
            li.attrs.push(Attr::new(QName::xml("lang"), lang));
            container.nodes.add_node(li);
        }

        let mut node = Node::default();
        node.nodes.add_node(container);
        node
    }
}

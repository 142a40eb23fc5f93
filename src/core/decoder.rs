//! XMP decoder
//!
//! Turns RDF/XML into a [`Document`]. Properties are grouped into one top
//! level node per namespace; namespaces with a registered schema get a fresh
//! model that claims the properties it declares, and whatever it does not
//! claim stays in the node as generic content.
//!
//! # Conversion policy
//!
//! A value that cannot be converted to its field type (for example
//! `xmpDM:audioSampleRate="fast"` for an integer field) is handled according
//! to [`XmpOptions::strict`]:
//!
//! - lenient (default): the field keeps its zero value, the raw attribute or
//!   element stays in the node's generic content, and a warning is logged;
//! - strict: decoding fails with [`XmpError::InvalidField`] naming the path.
//!
//! Content a field cannot represent without loss (qualifiers, a different
//! array container, duplicate languages) always stays generic.

use crate::core::document::Document;
use crate::core::error::{XmpError, XmpResult};
use crate::core::model::{Fields, Model};
use crate::core::namespace::{ns, registry, Namespace, NamespaceRegistry};
use crate::core::node::{ArrayType, Node, QName};
use crate::core::options::{LogLevel, XmpOptions};
use crate::core::parser::XmpParser;
use crate::core::property::{PropertyRef, XmpProperty};
use crate::types::array::X_DEFAULT;
use indexmap::IndexMap;
use std::sync::Arc;

/// Decoder from RDF/XML to documents and models
#[derive(Debug)]
pub struct Decoder {
    registry: Arc<NamespaceRegistry>,
    options: XmpOptions,
    /// Prefixes declared in the source, keyed by URI
    prefixes: IndexMap<String, String>,
    /// Property path of the value being decoded, for diagnostics
    path: Vec<String>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a decoder using the global registry and default options
    pub fn new() -> Self {
        Self::with_options(XmpOptions::default())
    }

    /// Create a decoder using the global registry
    pub fn with_options(options: XmpOptions) -> Self {
        Self::with_registry(registry(), options)
    }

    /// Create a decoder using an explicit registry snapshot
    pub fn with_registry(registry: Arc<NamespaceRegistry>, options: XmpOptions) -> Self {
        Self {
            registry,
            options,
            prefixes: IndexMap::new(),
            path: Vec::new(),
        }
    }

    /// Options in effect
    pub fn options(&self) -> &XmpOptions {
        &self.options
    }

    /// Decode a complete packet
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for malformed XML or RDF, and `InvalidField`
    /// for conversion errors in strict mode.
    pub fn decode(&mut self, data: &[u8]) -> XmpResult<Document> {
        let xml = std::str::from_utf8(data)
            .map_err(|e| XmpError::ParseError(format!("Packet is not valid UTF-8: {}", e)))?;
        self.decode_str(xml)
    }

    /// Decode a complete packet from a string
    pub fn decode_str(&mut self, xml: &str) -> XmpResult<Document> {
        let mut parser = XmpParser::new();
        let root = parser.parse_packet(xml)?;
        for (uri, prefix) in parser.into_prefixes() {
            self.prefixes.entry(uri).or_insert(prefix);
        }

        let mut doc = Document::new();
        let rdf = if root.name.is_rdf("RDF") {
            &root
        } else {
            if root.name.ns == ns::X {
                if let Some(toolkit) = root.get_attr(&QName::new(ns::X, "xmptk")) {
                    doc.set_toolkit(toolkit);
                }
            }
            root.nodes
                .iter()
                .find(|n| n.name.is_rdf("RDF"))
                .ok_or_else(|| XmpError::ParseError("Missing rdf:RDF element".to_string()))?
        };

        for desc in rdf.nodes.iter() {
            self.decode_description(desc, &mut doc)?;
        }

        doc.set_dirty();
        doc.sync_from_xmp()?;
        doc.clear_dirty();
        Ok(doc)
    }

    /// Decode one `rdf:Description` into a standalone document
    pub fn decode_resource(&mut self, desc: &Node) -> XmpResult<Document> {
        let mut doc = Document::new();
        self.decode_description(desc, &mut doc)?;
        doc.clear_dirty();
        Ok(doc)
    }

    /// Decode a resource nested in a property, such as an array item that
    /// holds an `rdf:Description` or uses `rdf:parseType="Resource"`
    pub fn decode_nested(&mut self, prop: PropertyRef<'_>) -> XmpResult<Document> {
        let PropertyRef::Element(element) = prop else {
            return Err(XmpError::BadValue(
                "expected a resource, found a simple value".to_string(),
            ));
        };
        if element.is_empty() {
            return Err(XmpError::UnknownContent("empty resource".to_string()));
        }
        let source = match element.nodes.as_slice() {
            [desc] if element.attrs.is_empty() && desc.name.is_rdf("Description") => desc,
            _ => element,
        };
        if source.has_text() {
            return Err(XmpError::BadValue(
                "expected a resource, found text".to_string(),
            ));
        }
        self.decode_resource(source)
    }

    /// Decode `node` into `model`, removing the claimed content from `node`
    pub fn decode_model(&mut self, model: &mut dyn Model, node: &mut Node) -> XmpResult<()> {
        model.decode_xmp(self, node)
    }

    fn decode_description(&mut self, desc: &Node, doc: &mut Document) -> XmpResult<()> {
        let mut groups: IndexMap<String, Node> = IndexMap::new();

        for attr in desc.attrs.iter() {
            if attr.name.ns == ns::RDF && attr.name.local == "about" {
                if doc.about().is_empty() {
                    doc.set_about(attr.value.as_str());
                }
                continue;
            }
            // resource level terms have no place in the document model
            if attr.name.ns == ns::XML
                || (attr.name.ns == ns::RDF
                    && matches!(attr.name.local.as_str(), "ID" | "nodeID" | "parseType"))
            {
                self.options.log(
                    LogLevel::Debug,
                    format_args!("ignoring '{}=\"{}\"' on rdf:Description", attr.name, attr.value),
                );
                continue;
            }
            Self::group_for(&mut groups, &attr.name)?
                .attrs
                .push(attr.clone());
        }
        for child in desc.nodes.iter() {
            Self::group_for(&mut groups, &child.name)?
                .nodes
                .add_node(child.clone());
        }

        for (uri, node) in groups {
            self.bind_group(doc, uri, node)?;
        }
        Ok(())
    }

    fn group_for<'a>(groups: &'a mut IndexMap<String, Node>, name: &QName) -> XmpResult<&'a mut Node> {
        if name.ns.is_empty() {
            return Err(XmpError::ParseError(format!(
                "Property '{}' has no namespace",
                name.local
            )));
        }
        Ok(groups
            .entry(name.ns.clone())
            .or_insert_with(|| Node::new(QName::new(name.ns.clone(), ""))))
    }

    /// Attach the properties of one namespace to the document
    fn bind_group(&mut self, doc: &mut Document, uri: String, mut node: Node) -> XmpResult<()> {
        let schema = self
            .registry
            .get_by_uri(&uri)
            .filter(|ns| ns.has_factory())
            .cloned();

        if let Some(schema) = schema {
            // another description block may already have bound this schema
            if let Some(index) = doc.nodes.iter().position(|n| {
                n.model
                    .as_ref()
                    .is_some_and(|m| m.can(schema.prefix()))
            }) {
                if let Some(model) = doc.nodes[index].model.as_mut() {
                    self.decode_model(model.as_mut(), &mut node)?;
                }
                self.note_external(doc, &node);
                let target = &mut doc.nodes[index];
                target.attrs.append(&mut node.attrs);
                target.nodes.append(&mut node.nodes);
                return Ok(());
            }

            match schema.new_model() {
                Ok(mut model) => {
                    self.decode_model(model.as_mut(), &mut node)?;
                    self.options.log(
                        LogLevel::Debug,
                        format_args!(
                            "bound '{}' model, {} attribute(s) and {} element(s) left generic",
                            schema.prefix(),
                            node.attrs.len(),
                            node.nodes.len()
                        ),
                    );
                    self.note_external(doc, &node);
                    doc.register_model_namespaces(model.as_ref());
                    node.model = Some(model);
                    doc.nodes.add_node(node);
                    return Ok(());
                }
                Err(err) => {
                    self.options.log(
                        LogLevel::Warn,
                        format_args!(
                            "cannot create model for '{}', keeping its content generic: {}",
                            schema.prefix(),
                            err
                        ),
                    );
                }
            }
        } else if self.registry.get_by_uri(&uri).is_none() {
            self.options.log(
                LogLevel::Info,
                format_args!("namespace '{}' has no schema, keeping its content generic", uri),
            );
            if !doc.ext_ns.contains_key(&uri) {
                let prefix = match self.prefixes.get(&uri) {
                    Some(prefix) => prefix.clone(),
                    None => format!("ns{}", doc.ext_ns.len() + 1),
                };
                doc.ext_ns
                    .insert(uri.clone(), Namespace::external(prefix, uri.clone()));
            }
        }

        self.note_external(doc, &node);
        match doc.nodes.find_by_uri_mut(&uri) {
            Some(existing) => {
                existing.attrs.append(&mut node.attrs);
                existing.nodes.append(&mut node.nodes);
            }
            None => doc.nodes.add_node(node),
        }
        Ok(())
    }

    /// Record declared prefixes of unregistered namespaces used below `node`
    fn note_external(&self, doc: &mut Document, node: &Node) {
        let names = node
            .attrs
            .iter()
            .map(|a| &a.name)
            .chain(std::iter::once(&node.name));
        for name in names {
            if name.ns.is_empty()
                || doc.ext_ns.contains_key(&name.ns)
                || self.registry.get_by_uri(&name.ns).is_some()
            {
                continue;
            }
            if let Some(prefix) = self.prefixes.get(&name.ns) {
                doc.ext_ns.insert(
                    name.ns.clone(),
                    Namespace::external(prefix.clone(), name.ns.clone()),
                );
            }
        }
        for child in node.nodes.iter() {
            self.note_external(doc, child);
        }
    }

    /// Decode the property `name` of `node` into `field`.
    ///
    /// The property is looked up among the attributes first, then the
    /// children, and removed from `node` only when conversion succeeds.
    pub fn decode_property<T: XmpProperty>(
        &mut self,
        node: &mut Node,
        name: &QName,
        field: &mut T,
    ) -> XmpResult<()> {
        if let Some(index) = node.attrs.iter().position(|a| &a.name == name) {
            let label = self.display_name(name);
            self.path.push(label);
            let outcome = match T::unmarshal_xmp(self, PropertyRef::Attr(&node.attrs[index].value)) {
                Ok(value) => {
                    *field = value;
                    node.attrs.remove(index);
                    Ok(())
                }
                Err(err) => self.recover(err),
            };
            self.path.pop();
            return outcome;
        }

        if let Some(index) = node.nodes.iter().position(|n| &n.name == name) {
            let label = self.display_name(name);
            self.path.push(label);
            let outcome = match T::unmarshal_xmp(self, PropertyRef::Element(&node.nodes[index])) {
                Ok(value) => {
                    *field = value;
                    node.nodes.remove(index);
                    Ok(())
                }
                Err(err) => self.recover(err),
            };
            self.path.pop();
            return outcome;
        }

        Ok(())
    }

    /// Decode a structure value from a property element
    pub fn decode_struct<T: Fields + Default>(&mut self, prop: PropertyRef<'_>) -> XmpResult<T> {
        let PropertyRef::Element(element) = prop else {
            return Err(XmpError::BadValue(
                "expected a structure, found a simple value".to_string(),
            ));
        };
        let mut body = resource_body(element);
        if body.is_empty() {
            return Err(XmpError::UnknownContent("empty structure".to_string()));
        }

        let mut value = T::default();
        value.decode_fields(self, &mut body)?;

        if let Some(attr) = body.attrs.first() {
            return Err(XmpError::UnknownContent(format!(
                "structure member '{}' is not recognized",
                self.display_name(&attr.name)
            )));
        }
        if let Some(child) = body.nodes.first() {
            return Err(XmpError::UnknownContent(format!(
                "structure member '{}' is not recognized",
                self.display_name(&child.name)
            )));
        }
        if body.has_text() {
            return Err(XmpError::UnknownContent(
                "structure carries text".to_string(),
            ));
        }
        Ok(value)
    }

    /// Decode the items of a `Bag` or `Seq` property.
    ///
    /// A property that is not wrapped in a container decodes as a single item.
    pub fn decode_array<T: XmpProperty>(
        &mut self,
        kind: ArrayType,
        prop: PropertyRef<'_>,
    ) -> XmpResult<Vec<T>> {
        let element = match prop {
            PropertyRef::Attr(_) => return Ok(vec![T::unmarshal_xmp(self, prop)?]),
            PropertyRef::Element(element) => element,
        };

        let container = match element.nodes.as_slice() {
            [] if element.is_empty() => {
                return Err(XmpError::UnknownContent("empty array property".to_string()));
            }
            [] => return Ok(vec![T::unmarshal_xmp(self, prop)?]),
            [container] if ArrayType::from_qname(&container.name).is_some() => container,
            _ => {
                return Err(XmpError::UnknownContent(
                    "expected a single rdf:Bag, rdf:Seq or rdf:Alt container".to_string(),
                ));
            }
        };

        if ArrayType::from_qname(&container.name) != Some(kind) {
            return Err(XmpError::UnknownContent(format!(
                "expected rdf:{}, found rdf:{}",
                kind.rdf_type(),
                container.name.local
            )));
        }
        if !element.attrs.is_empty() || !container.attrs.is_empty() {
            return Err(XmpError::UnknownContent(
                "array carries qualifiers".to_string(),
            ));
        }

        self.path.push(format!("rdf:{}", kind.rdf_type()));
        let items = self.decode_items(container);
        self.path.pop();
        items
    }

    fn decode_items<T: XmpProperty>(&mut self, container: &Node) -> XmpResult<Vec<T>> {
        let mut items = Vec::with_capacity(container.nodes.len());
        for (index, li) in container.nodes.iter().enumerate() {
            if !li.name.is_rdf("li") {
                return Err(XmpError::UnknownContent(format!(
                    "unexpected array item '{}'",
                    self.display_name(&li.name)
                )));
            }
            self.path.push(format!("rdf:li[{}]", index + 1));
            let item = T::unmarshal_xmp(self, PropertyRef::Element(li)).map_err(|e| self.locate(e));
            self.path.pop();
            items.push(item?);
        }
        Ok(items)
    }

    /// Decode a language alternative into a language to value mapping.
    ///
    /// Items without `xml:lang` use the `x-default` language.
    pub fn decode_alt(&mut self, prop: PropertyRef<'_>) -> XmpResult<IndexMap<String, String>> {
        let mut values = IndexMap::new();
        let element = match prop {
            PropertyRef::Attr(value) => {
                values.insert(X_DEFAULT.to_string(), value.to_string());
                return Ok(values);
            }
            PropertyRef::Element(element) => element,
        };

        match element.nodes.as_slice() {
            [] if element.is_empty() => {
                Err(XmpError::UnknownContent("empty alternative".to_string()))
            }
            [] => {
                let (lang, value) = Self::lang_value(element)?;
                values.insert(lang, value);
                Ok(values)
            }
            [container] if container.name.is_rdf("Alt") => {
                if !element.attrs.is_empty() || !container.attrs.is_empty() {
                    return Err(XmpError::UnknownContent(
                        "alternative carries qualifiers".to_string(),
                    ));
                }
                for li in container.nodes.iter() {
                    if !li.name.is_rdf("li") {
                        return Err(XmpError::UnknownContent(format!(
                            "unexpected alternative item '{}'",
                            self.display_name(&li.name)
                        )));
                    }
                    let (lang, value) = Self::lang_value(li)?;
                    if values.contains_key(&lang) {
                        return Err(XmpError::UnknownContent(format!(
                            "duplicate language '{}'",
                            lang
                        )));
                    }
                    values.insert(lang, value);
                }
                Ok(values)
            }
            [container] if ArrayType::from_qname(&container.name).is_some() => {
                Err(XmpError::UnknownContent(format!(
                    "expected rdf:Alt, found rdf:{}",
                    container.name.local
                )))
            }
            _ => Err(XmpError::BadValue(
                "expected a language alternative".to_string(),
            )),
        }
    }

    fn lang_value(item: &Node) -> XmpResult<(String, String)> {
        if !item.nodes.is_empty() {
            return Err(XmpError::BadValue(
                "expected text in language alternative".to_string(),
            ));
        }
        let mut lang = X_DEFAULT.to_string();
        for attr in item.attrs.iter() {
            if attr.name == QName::xml("lang") {
                lang = attr.value.clone();
            } else {
                return Err(XmpError::UnknownContent(format!(
                    "language alternative item carries qualifier '{}'",
                    attr.name
                )));
            }
        }
        Ok((lang, item.value.clone()))
    }

    /// Apply the conversion policy to an error from a single property
    fn recover(&self, err: XmpError) -> XmpResult<()> {
        match self.locate(err) {
            XmpError::UnknownContent(reason) => {
                self.options.log(
                    LogLevel::Debug,
                    format_args!("keeping '{}' generic: {}", self.path.join("/"), reason),
                );
                Ok(())
            }
            XmpError::BadValue(reason) => {
                self.options.log(
                    LogLevel::Warn,
                    format_args!("skipping '{}': {}", self.path.join("/"), reason),
                );
                Ok(())
            }
            err => Err(err),
        }
    }

    /// Attach the current path to a conversion error in strict mode
    fn locate(&self, err: XmpError) -> XmpError {
        match err {
            XmpError::BadValue(reason) if self.options.strict => XmpError::InvalidField {
                path: self.path.join("/"),
                reason,
            },
            err => err,
        }
    }

    /// `prefix:local` for diagnostics
    fn display_name(&self, name: &QName) -> String {
        let prefix = self
            .prefixes
            .get(&name.ns)
            .map(String::as_str)
            .or_else(|| self.registry.get_by_uri(&name.ns).map(|n| n.prefix()));
        match prefix {
            Some(prefix) => format!("{}:{}", prefix, name.local),
            None => name.to_string(),
        }
    }
}

/// The members of a structure, from either a nested `rdf:Description` or
/// the property element itself
fn resource_body(element: &Node) -> Node {
    let source = match element.nodes.as_slice() {
        [desc] if element.attrs.is_empty() && desc.name.is_rdf("Description") => desc,
        _ => element,
    };
    let mut body = Node::new(source.name.clone());
    body.attrs = source
        .attrs
        .iter()
        .filter(|a| {
            !(a.name.is_rdf("parseType") && a.value == "Resource"
                || a.name.is_rdf("about")
                || a.name.is_rdf("nodeID"))
        })
        .cloned()
        .collect();
    body.nodes = source.nodes.clone();
    if source.has_text() {
        body.value = source.value.clone();
    }
    body
}

//! XMP document
//!
//! A [`Document`] owns one top level [`Node`] per namespace found in or added
//! to it. Nodes of registered schemas carry a bound [`Model`]; all other
//! content is kept as generic nodes so nothing is lost on re-encode.

use crate::core::decoder::Decoder;
use crate::core::encoder::Encoder;
use crate::core::error::{XmpError, XmpResult};
use crate::core::model::Model;
use crate::core::namespace::{registry, Namespace};
use crate::core::node::{Attr, Node, NodeList, QName};
use crate::core::property::{Property, PropertyRef, XmpProperty};
use indexmap::IndexMap;
use std::str::FromStr;

/// Toolkit string written into packets produced by this crate
pub const DEFAULT_TOOLKIT: &str = concat!("xmpdoc ", env!("CARGO_PKG_VERSION"));

/// High level XMP document
///
/// # Examples
///
/// ```
/// use xmpdoc::models::dc::{DublinCore, NS_DC};
/// use xmpdoc::{models, AltString, Document};
///
/// models::register_all().unwrap();
///
/// let mut doc = Document::new();
/// let dc = doc.make_model_as::<DublinCore>(&NS_DC).unwrap();
/// dc.title = AltString::with_default("Hello");
///
/// let packet = xmpdoc::marshal(&mut doc).unwrap();
/// let back = xmpdoc::unmarshal(&packet).unwrap();
/// assert_eq!(back, doc);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// `rdf:about` of the described resource
    pub(crate) about: String,
    /// Name and version of the toolkit that produced the packet
    pub(crate) toolkit: String,
    pub(crate) nodes: NodeList,
    /// Content changed since the last decode or encode
    pub(crate) dirty: bool,
    /// Namespaces owned by bound models, keyed by URI
    pub(crate) int_ns: IndexMap<String, Namespace>,
    /// Namespaces without a schema found in source data, keyed by URI
    pub(crate) ext_ns: IndexMap<String, Namespace>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self {
            about: String::new(),
            toolkit: DEFAULT_TOOLKIT.to_string(),
            nodes: NodeList::new(),
            dirty: false,
            int_ns: IndexMap::new(),
            ext_ns: IndexMap::new(),
        }
    }

    /// The `rdf:about` subject, usually empty
    pub fn about(&self) -> &str {
        &self.about
    }

    /// Set the `rdf:about` subject
    pub fn set_about(&mut self, about: impl Into<String>) {
        self.about = about.into();
        self.dirty = true;
    }

    /// Toolkit that produced the document
    pub fn toolkit(&self) -> &str {
        &self.toolkit
    }

    /// Set the toolkit string written with the packet
    pub fn set_toolkit(&mut self, toolkit: impl Into<String>) {
        self.toolkit = toolkit.into();
    }

    /// Whether the document changed since it was decoded or encoded
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as changed
    pub fn set_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Top level nodes
    pub fn nodes(&self) -> &NodeList {
        &self.nodes
    }

    /// Top level nodes, mutably; marks the document dirty
    pub fn nodes_mut(&mut self) -> &mut NodeList {
        self.dirty = true;
        &mut self.nodes
    }

    /// Namespaces in use: model namespaces first, then external ones
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.int_ns.values().chain(self.ext_ns.values())
    }

    /// Resolve a namespace by URI, then by the prefix of `name`.
    ///
    /// `name` may be a bare prefix or a qualified `prefix:local` name. The
    /// document's own namespaces are searched before the global registry.
    pub fn find_ns(&self, name: &str, uri: &str) -> Option<Namespace> {
        if !uri.is_empty() {
            if let Some(ns) = self.int_ns.get(uri).or_else(|| self.ext_ns.get(uri)) {
                return Some(ns.clone());
            }
        }
        let prefix = name.split_once(':').map_or(name, |(prefix, _)| prefix);
        if !prefix.is_empty() {
            if let Some(ns) = self.namespaces().find(|ns| ns.prefix() == prefix) {
                return Some(ns.clone());
            }
        }

        let registry = registry();
        let found = if uri.is_empty() {
            registry.get_by_prefix(prefix)
        } else {
            registry.get_by_uri(uri)
        };
        found.cloned()
    }

    /// The top level node of `ns`
    pub fn find_node(&self, ns: &Namespace) -> Option<&Node> {
        self.nodes.find_node(ns)
    }

    /// The top level node of `ns`, mutably; marks the document dirty
    pub fn find_node_mut(&mut self, ns: &Namespace) -> Option<&mut Node> {
        let node = self.nodes.find_node_mut(ns)?;
        self.dirty = true;
        Some(node)
    }

    /// The model recognizing the prefix of `ns`
    pub fn find_model(&self, ns: &Namespace) -> Option<&dyn Model> {
        let index = self.model_index(ns)?;
        self.nodes[index].model.as_deref()
    }

    /// The model recognizing the prefix of `ns`, mutably; marks the document
    /// dirty
    pub fn find_model_mut(&mut self, ns: &Namespace) -> Option<&mut dyn Model> {
        let index = self.model_index(ns)?;
        self.dirty = true;
        match self.nodes[index].model.as_deref_mut() {
            Some(model) => Some(model),
            None => None,
        }
    }

    /// The first bound model of type `T`
    pub fn model<T: Model>(&self) -> Option<&T> {
        self.nodes
            .iter()
            .find_map(|n| n.model.as_deref().and_then(|m| m.downcast_ref::<T>()))
    }

    /// The first bound model of type `T`, mutably; marks the document dirty
    pub fn model_mut<T: Model>(&mut self) -> Option<&mut T> {
        let index = self
            .nodes
            .iter()
            .position(|n| n.model.as_deref().is_some_and(|m| m.is::<T>()))?;
        self.dirty = true;
        self.nodes[index]
            .model
            .as_deref_mut()
            .and_then(|m| m.downcast_mut::<T>())
    }

    /// Return the model bound to `ns`, creating it from the namespace's
    /// factory if the document has none yet.
    ///
    /// # Errors
    ///
    /// Returns `BadSchema` if `ns` has no model factory.
    pub fn make_model(&mut self, ns: &Namespace) -> XmpResult<&mut dyn Model> {
        let index = self.make_model_index(ns)?;
        match self.nodes[index].model.as_deref_mut() {
            Some(model) => Ok(model),
            None => Err(XmpError::InternalError(format!(
                "'{}' node lost its model",
                ns.prefix()
            ))),
        }
    }

    /// Typed form of [`make_model`](Self::make_model)
    ///
    /// # Errors
    ///
    /// Returns `BadSchema` if `ns` has no factory or its model is not a `T`.
    pub fn make_model_as<T: Model>(&mut self, ns: &Namespace) -> XmpResult<&mut T> {
        let index = self.make_model_index(ns)?;
        self.nodes[index]
            .model
            .as_deref_mut()
            .and_then(|m| m.downcast_mut::<T>())
            .ok_or_else(|| {
                XmpError::BadSchema(format!(
                    "'{}' model is not a {}",
                    ns.prefix(),
                    std::any::type_name::<T>()
                ))
            })
    }

    fn make_model_index(&mut self, ns: &Namespace) -> XmpResult<usize> {
        if let Some(index) = self.model_index(ns) {
            return Ok(index);
        }
        let model = ns.new_model()?;
        self.bind_model(model)
    }

    /// Bind an already constructed model, replacing a model previously bound
    /// to its primary namespace. Generic content of that namespace stays.
    ///
    /// # Errors
    ///
    /// Returns `BadSchema` if the model declares no namespace, or a namespace
    /// with an empty URI or prefix.
    pub fn add_model(&mut self, model: Box<dyn Model>) -> XmpResult<&mut Node> {
        let index = self.bind_model(model)?;
        Ok(&mut self.nodes[index])
    }

    fn bind_model(&mut self, model: Box<dyn Model>) -> XmpResult<usize> {
        let namespaces = model.namespaces();
        let Some(primary) = namespaces.first().cloned() else {
            return Err(XmpError::BadSchema(format!(
                "model {:?} must declare at least one namespace",
                model
            )));
        };
        if let Some(bad) = namespaces
            .iter()
            .find(|ns| ns.uri().is_empty() || ns.prefix().is_empty())
        {
            return Err(XmpError::BadSchema(format!(
                "model declares incomplete namespace {}",
                bad
            )));
        }

        self.register_model_namespaces(model.as_ref());
        self.dirty = true;

        let index = match self.nodes.iter().position(|n| n.namespace() == primary.uri()) {
            Some(index) => index,
            None => {
                self.nodes.add_node(Node::new(primary.qname("")));
                self.nodes.len() - 1
            }
        };
        if let Some(mut old) = self.nodes[index].model.replace(model) {
            old.close();
        }
        Ok(index)
    }

    fn model_index(&self, ns: &Namespace) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.model.as_ref().is_some_and(|m| m.can(ns.prefix())))
    }

    /// Track the namespaces of a bound model as internal
    pub(crate) fn register_model_namespaces(&mut self, model: &dyn Model) {
        for ns in model.namespaces() {
            self.ext_ns.shift_remove(ns.uri());
            self.int_ns.insert(ns.uri().to_string(), ns);
        }
    }

    /// Merge the content of `other` into this document.
    ///
    /// A model of `other` replaces the model of the same namespace here with
    /// a deep copy made by encoding and decoding it. Incoming generic
    /// properties replace same-named ones here and the rest is appended;
    /// nodes missing here are copied wholesale. Namespace maps are
    /// unioned with `other` winning.
    pub fn merge(&mut self, other: &Document) -> XmpResult<()> {
        for node in other.nodes.iter() {
            let Some(index) = self
                .nodes
                .iter()
                .position(|n| n.namespace() == node.namespace())
            else {
                self.nodes.add_node(node.clone());
                continue;
            };

            if let Some(model) = node.model.as_deref() {
                let (copy, leftover) = Self::copy_model(model)?;
                let target = &mut self.nodes[index];
                if let Some(mut old) = target.model.replace(copy) {
                    old.close();
                }
                target.overlay(leftover.attrs.iter(), leftover.nodes.iter());
            }
            self.nodes[index].overlay(node.attrs.iter(), node.nodes.iter());
        }

        for (uri, ns) in other.int_ns.iter() {
            self.ext_ns.shift_remove(uri);
            self.int_ns.insert(uri.clone(), ns.clone());
        }
        for (uri, ns) in other.ext_ns.iter() {
            if !self.int_ns.contains_key(uri) {
                self.ext_ns.insert(uri.clone(), ns.clone());
            }
        }
        self.dirty = true;
        Ok(())
    }

    /// Deep copy a model through an encode/decode round trip. Returns the
    /// copy and any encoded content the copy did not claim.
    fn copy_model(model: &dyn Model) -> XmpResult<(Box<dyn Model>, Node)> {
        let mut scratch = Node::default();
        Encoder::new().encode_model(model, &mut scratch)?;
        let mut copy = model.empty_model();
        Decoder::new().decode_model(copy.as_mut(), &mut scratch)?;
        Ok((copy, scratch))
    }

    /// Remove the top level node of `ns` and forget the namespace.
    ///
    /// Returns whether anything was removed.
    pub fn remove_namespace(&mut self, ns: &Namespace) -> bool {
        self.remove_uri(ns.uri())
    }

    /// Remove the namespace with prefix `name`
    pub fn remove_namespace_by_name(&mut self, name: &str) -> bool {
        match self.find_ns(name, "") {
            Some(ns) => self.remove_namespace(&ns),
            None => false,
        }
    }

    /// Remove every namespace in `remove`
    pub fn remove_namespaces(&mut self, remove: &[Namespace]) -> bool {
        let mut removed = false;
        for ns in remove {
            removed |= self.remove_namespace(ns);
        }
        removed
    }

    /// Keep the namespaces in `keep` and remove all others
    pub fn filter_namespaces(&mut self, keep: &[Namespace]) -> bool {
        let drop: Vec<String> = self
            .nodes
            .iter()
            .map(|n| n.namespace().to_string())
            .filter(|uri| !keep.iter().any(|k| k.uri() == uri))
            .collect();
        let mut removed = false;
        for uri in drop {
            removed |= self.remove_uri(&uri);
        }
        removed
    }

    fn remove_uri(&mut self, uri: &str) -> bool {
        let Some(index) = self.nodes.iter().position(|n| n.namespace() == uri) else {
            return false;
        };
        let mut node = self.nodes.remove(index);
        if let Some(model) = node.model.as_deref() {
            for ns in model.namespaces() {
                self.int_ns.shift_remove(ns.uri());
            }
        }
        self.int_ns.shift_remove(uri);
        self.ext_ns.shift_remove(uri);
        node.close();
        self.dirty = true;
        true
    }

    /// Let every bound model pull fields derived from other models.
    ///
    /// Runs only when the document is dirty. While a model syncs it is
    /// detached from its node, so it cannot look itself up.
    pub fn sync_from_xmp(&mut self) -> XmpResult<()> {
        self.sync_models(|model, doc| model.sync_from_xmp(doc))
    }

    /// Let every bound model push fields derived from other models.
    ///
    /// Runs only when the document is dirty.
    pub fn sync_to_xmp(&mut self) -> XmpResult<()> {
        self.sync_models(|model, doc| model.sync_to_xmp(doc))
    }

    fn sync_models<F>(&mut self, mut sync: F) -> XmpResult<()>
    where
        F: FnMut(&mut dyn Model, &Document) -> XmpResult<()>,
    {
        if !self.dirty {
            return Ok(());
        }
        for index in 0..self.nodes.len() {
            let Some(mut model) = self.nodes[index].model.take() else {
                continue;
            };
            let result = sync(model.as_mut(), self);
            self.nodes[index].model = Some(model);
            result?;
        }
        Ok(())
    }

    /// Release all nodes and models. Safe to call more than once.
    pub fn close(&mut self) {
        self.nodes.close();
    }
}

/// Semantic equality: top level nodes compare by namespace regardless of
/// order, models by value, the dirty flag is ignored
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.about == other.about
            && self.toolkit == other.toolkit
            && self.int_ns == other.int_ns
            && self.ext_ns == other.ext_ns
            && self.nodes.len() == other.nodes.len()
            && self.nodes.iter().all(|node| {
                other
                    .nodes
                    .find_by_uri(node.namespace())
                    .is_some_and(|theirs| theirs == node)
            })
    }
}

impl FromStr for Document {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decoder::new().decode_str(s)
    }
}

/// Nested documents are written as `rdf:Description` resources, for example
/// the items of `xmpMM:Pantry`
impl XmpProperty for Document {
    fn is_zero(&self) -> bool {
        self.nodes.is_empty()
    }

    fn marshal_xmp(&self, enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
        let mut desc = enc.encode_resource(self)?;
        if !self.about.is_empty() {
            desc.attrs
                .insert(0, Attr::new(QName::rdf("about"), self.about.as_str()));
        }
        let mut node = Node::default();
        node.nodes.add_node(desc);
        Ok(Property::Element(node))
    }

    fn unmarshal_xmp(dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        dec.decode_nested(prop)
    }
}

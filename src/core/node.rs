//! XMP node types
//!
//! This module defines the generic, namespace-qualified tree used for all
//! RDF/XML content:
//! - QName: a namespace URI plus local name
//! - Attr: a qualified attribute
//! - Node: one element with attributes, children, text and an optional model
//! - NodeList: an ordered list of nodes

use crate::core::error::XmpError;
use crate::core::model::Model;
use crate::core::namespace::{ns, Namespace};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// Type of an RDF array container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayType {
    /// Ordered array (rdf:Seq)
    Ordered,
    /// Unordered array (rdf:Bag)
    Unordered,
    /// Alternative array (rdf:Alt)
    Alternative,
}

impl ArrayType {
    /// Get the RDF type name for this array type
    pub fn rdf_type(&self) -> &'static str {
        match self {
            ArrayType::Ordered => "Seq",
            ArrayType::Unordered => "Bag",
            ArrayType::Alternative => "Alt",
        }
    }

    /// Array type of an `rdf:Seq`, `rdf:Bag` or `rdf:Alt` element name
    pub fn from_qname(name: &QName) -> Option<Self> {
        if name.ns != ns::RDF {
            return None;
        }
        match name.local.as_str() {
            "Seq" => Some(ArrayType::Ordered),
            "Bag" => Some(ArrayType::Unordered),
            "Alt" => Some(ArrayType::Alternative),
            _ => None,
        }
    }
}

/// A namespace-qualified name
///
/// Top level nodes use an empty local name; they stand for a whole namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
    /// Namespace URI, empty for unqualified names
    pub ns: String,
    /// Local name
    pub local: String,
}

impl QName {
    /// Create a qualified name
    pub fn new(ns: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            ns: ns.into(),
            local: local.into(),
        }
    }

    /// A name in the RDF namespace
    pub fn rdf(local: &str) -> Self {
        Self::new(ns::RDF, local)
    }

    /// A name in the XML namespace
    pub fn xml(local: &str) -> Self {
        Self::new(ns::XML, local)
    }

    /// Whether this is `rdf:<local>`
    pub fn is_rdf(&self, local: &str) -> bool {
        self.ns == ns::RDF && self.local == local
    }

    /// Whether this name belongs to `ns`
    pub fn in_namespace(&self, ns: &Namespace) -> bool {
        self.ns == ns.uri()
    }
}

/// Clark notation: `{uri}local`, or just `local` when unqualified
impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ns.is_empty() {
            f.write_str(&self.local)
        } else {
            write!(f, "{{{}}}{}", self.ns, self.local)
        }
    }
}

impl FromStr for QName {
    type Err = XmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix('{') {
            Some(rest) => {
                let (uri, local) = rest.split_once('}').ok_or_else(|| {
                    XmpError::BadParam(format!("unterminated namespace in name '{}'", s))
                })?;
                Ok(QName::new(uri, local))
            }
            None => Ok(QName::new("", s)),
        }
    }
}

impl Serialize for QName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A qualified attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    /// Attribute name
    pub name: QName,
    /// Attribute value
    pub value: String,
}

impl Attr {
    /// Create an attribute
    pub fn new(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// One RDF/XML element
///
/// A node either carries generic content only, or a bound model plus the
/// generic residue the model did not claim. At encode time the model is
/// written first and the residue after it, minus any property the model
/// already wrote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Node {
    /// Element name
    pub name: QName,
    /// Attributes in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attrs: Vec<Attr>,
    /// Child elements in source order
    #[serde(default, skip_serializing_if = "NodeList::is_empty")]
    pub nodes: NodeList,
    /// Text content
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    /// Typed model bound to this node
    #[serde(skip)]
    pub model: Option<Box<dyn Model>>,
}

impl Node {
    /// Create an empty node
    pub fn new(name: QName) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Create a text-only node
    pub fn leaf(name: QName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Create a top level node bound to `model`
    pub fn with_model(name: QName, model: Box<dyn Model>) -> Self {
        Self {
            name,
            model: Some(model),
            ..Default::default()
        }
    }

    /// Namespace URI of this node
    pub fn namespace(&self) -> &str {
        &self.name.ns
    }

    /// Whether a model is bound to this node
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &QName) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| &a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one with the same name
    pub fn set_attr(&mut self, name: QName, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attr::new(name, value)),
        }
    }

    /// Remove an attribute, returning its value
    pub fn remove_attr(&mut self, name: &QName) -> Option<String> {
        let index = self.attrs.iter().position(|a| &a.name == name)?;
        Some(self.attrs.remove(index).value)
    }

    /// Get the first child with the given name
    pub fn child(&self, name: &QName) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.name == name)
    }

    /// Whether the node carries non-whitespace text
    pub fn has_text(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// Lay the generic content `attrs` and `nodes` over this node.
    ///
    /// An incoming property replaces every existing attribute or element of
    /// the same name; everything else is kept.
    pub fn overlay<'a>(
        &mut self,
        attrs: impl IntoIterator<Item = &'a Attr>,
        nodes: impl IntoIterator<Item = &'a Node>,
    ) {
        let attrs: Vec<&Attr> = attrs.into_iter().collect();
        let nodes: Vec<&Node> = nodes.into_iter().collect();
        let replaced = |name: &QName| {
            attrs.iter().any(|a| &a.name == name) || nodes.iter().any(|n| &n.name == name)
        };
        self.attrs.retain(|a| !replaced(&a.name));
        self.nodes.retain(|n| !replaced(&n.name));
        self.attrs.extend(attrs.iter().map(|a| (*a).clone()));
        self.nodes.extend(nodes.iter().map(|n| (*n).clone()));
    }

    /// Whether the node has no generic content at all
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty() && self.nodes.is_empty() && self.value.is_empty()
    }

    /// Release the subtree and the bound model
    ///
    /// Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(mut model) = self.model.take() {
            model.close();
        }
        self.nodes.close();
        self.attrs.clear();
        self.value.clear();
    }
}

/// Structural equality; bound models compare by their JSON projection
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attrs == other.attrs
            && self.nodes == other.nodes
            && self.value == other.value
            && match (&self.model, &other.model) {
                (None, None) => true,
                (Some(a), Some(b)) => {
                    a.namespaces() == b.namespaces()
                        && matches!((a.to_json_value(), b.to_json_value()), (Ok(x), Ok(y)) if x == y)
                }
                _ => false,
            }
    }
}

/// An ordered list of nodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList(Vec<Node>);

impl NodeList {
    /// Create an empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no node
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First node whose namespace matches `ns`
    pub fn find_node(&self, ns: &Namespace) -> Option<&Node> {
        self.find_by_uri(ns.uri())
    }

    /// First node whose namespace matches `ns`, mutably
    pub fn find_node_mut(&mut self, ns: &Namespace) -> Option<&mut Node> {
        self.find_by_uri_mut(ns.uri())
    }

    /// First node whose namespace URI is `uri`
    pub fn find_by_uri(&self, uri: &str) -> Option<&Node> {
        self.0.iter().find(|n| n.namespace() == uri)
    }

    /// First node whose namespace URI is `uri`, mutably
    pub fn find_by_uri_mut(&mut self, uri: &str) -> Option<&mut Node> {
        self.0.iter_mut().find(|n| n.namespace() == uri)
    }

    /// Append a node
    pub fn add_node(&mut self, node: Node) {
        self.0.push(node);
    }

    /// Close and drop every node
    pub fn close(&mut self) {
        for node in self.0.iter_mut() {
            node.close();
        }
        self.0.clear();
    }

    /// Consume the list
    pub fn into_inner(self) -> Vec<Node> {
        self.0
    }
}

impl Deref for NodeList {
    type Target = Vec<Node>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for NodeList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Node>> for NodeList {
    fn from(nodes: Vec<Node>) -> Self {
        Self(nodes)
    }
}

impl FromIterator<Node> for NodeList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for NodeList {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::NS_ST_REF;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_array_type_rdf() {
        assert_eq!(ArrayType::Ordered.rdf_type(), "Seq");
        assert_eq!(ArrayType::Unordered.rdf_type(), "Bag");
        assert_eq!(ArrayType::Alternative.rdf_type(), "Alt");
        assert_eq!(
            ArrayType::from_qname(&QName::rdf("Alt")),
            Some(ArrayType::Alternative)
        );
        assert_eq!(ArrayType::from_qname(&QName::rdf("li")), None);
        assert_eq!(ArrayType::from_qname(&QName::new(ns::DC, "Bag")), None);
    }

    #[test]
    fn test_qname_clark_notation() {
        let name = QName::new(ns::DC, "title");
        assert_eq!(name.to_string(), "{http://purl.org/dc/elements/1.1/}title");
        assert_eq!(name.to_string().parse::<QName>().unwrap(), name);
        assert_eq!("plain".parse::<QName>().unwrap(), QName::new("", "plain"));
        assert!("{broken".parse::<QName>().is_err());
    }

    #[test]
    fn test_node_attrs() {
        let mut node = Node::new(QName::new(ns::ST_REF, ""));
        node.set_attr(QName::new(ns::ST_REF, "documentID"), "a");
        node.set_attr(QName::new(ns::ST_REF, "documentID"), "b");
        assert_eq!(node.attrs.len(), 1);
        assert_eq!(node.get_attr(&QName::new(ns::ST_REF, "documentID")), Some("b"));
        assert_eq!(
            node.remove_attr(&QName::new(ns::ST_REF, "documentID")),
            Some("b".to_string())
        );
        assert!(node.is_empty());
    }

    #[test]
    fn test_node_list_find_and_add() {
        let mut list = NodeList::new();
        list.add_node(Node::new(QName::new(ns::ST_EVT, "")));
        list.add_node(Node::new(QName::new(ns::ST_REF, "")));
        list.add_node(Node::leaf(QName::new(ns::ST_REF, ""), "second"));
        let found = list.find_node(&NS_ST_REF).unwrap();
        assert_eq!(found.value, "");
        assert!(list.find_by_uri(ns::ST_DIM).is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_node_close_is_idempotent() {
        let mut node = Node::new(QName::rdf("Description"));
        node.nodes.add_node(Node::leaf(QName::rdf("li"), "x"));
        node.close();
        node.close();
        assert!(node.is_empty());
    }

    #[test]
    fn test_node_json_shape() {
        let mut node = Node::new(QName::new("urn:ex", "thing"));
        node.attrs.push(Attr::new(QName::xml("lang"), "en"));
        node.nodes.add_node(Node::leaf(QName::new("urn:ex", "child"), "v"));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "{urn:ex}thing",
                "attrs": [{"name": "{http://www.w3.org/XML/1998/namespace}lang", "value": "en"}],
                "nodes": [{"name": "{urn:ex}child", "value": "v"}]
            })
        );
        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_leaf_json_has_no_children_key() {
        let leaf = Node::leaf(QName::new("urn:ex", "child"), "v");
        let json = serde_json::to_value(&leaf).unwrap();
        assert!(json.get("nodes").is_none());
        assert!(json.get("attrs").is_none());
        assert!(NodeList::new().is_empty());
    }

    #[test]
    fn test_node_overlay_replaces_by_name() {
        let flag = QName::new("urn:ex", "flag");
        let mut node = Node::new(QName::new("urn:ex", ""));
        node.set_attr(flag.clone(), "old");
        node.nodes.add_node(Node::leaf(QName::new("urn:ex", "kept"), "k"));

        let mut other = Node::new(QName::new("urn:ex", ""));
        other.nodes.add_node(Node::leaf(flag.clone(), "new"));
        other.set_attr(QName::new("urn:ex", "extra"), "e");
        node.overlay(other.attrs.iter(), other.nodes.iter());

        assert_eq!(node.get_attr(&flag), None);
        assert_eq!(node.child(&flag).unwrap().value, "new");
        assert_eq!(node.get_attr(&QName::new("urn:ex", "extra")), Some("e"));
        assert!(node.child(&QName::new("urn:ex", "kept")).is_some());
        assert_eq!(node.nodes.len(), 2);
    }
}

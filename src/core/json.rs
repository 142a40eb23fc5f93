//! JSON projection of documents
//!
//! A document serializes to:
//!
//! ```json
//! {
//!   "about": "",
//!   "toolkit": "xmpdoc 0.1.0",
//!   "namespaces": { "dc": "http://purl.org/dc/elements/1.1/" },
//!   "models": { "dc": { "format": "image/png" } },
//!   "content": { "dc": { "attrs": [ { "name": "{http://purl.org/dc/elements/1.1/}extra", "value": "x" } ] } }
//! }
//! ```
//!
//! `models` holds the fields of every bound model, `content` the generic
//! content of every top level node. Both are keyed by namespace prefix;
//! a namespace whose prefix is ambiguous in the document is keyed by URI,
//! and its `namespaces` entry keeps the prefix:
//! `"http://other.example.com/": { "prefix": "xmp", "uri": "http://other.example.com/" }`.

use crate::core::document::Document;
use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::{registry, Namespace};
use crate::core::node::{Attr, Node, NodeList, QName};
use indexmap::IndexMap;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct DocumentRepr {
    #[serde(skip_serializing_if = "String::is_empty")]
    about: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    toolkit: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    namespaces: IndexMap<String, NamespaceRepr>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    models: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    content: IndexMap<String, ContentRepr>,
}

/// A namespace is keyed by its prefix and maps to its URI. When a second
/// namespace shares that prefix it is keyed by its URI instead and spells
/// the prefix out.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum NamespaceRepr {
    Uri(String),
    Keyed { prefix: String, uri: String },
}

impl NamespaceRepr {
    fn uri(&self) -> &str {
        match self {
            NamespaceRepr::Uri(uri) | NamespaceRepr::Keyed { uri, .. } => uri,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ContentRepr {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attrs: Vec<Attr>,
    #[serde(skip_serializing_if = "NodeList::is_empty")]
    nodes: NodeList,
    #[serde(skip_serializing_if = "String::is_empty")]
    value: String,
}

impl DocumentRepr {
    fn from_document(doc: &Document) -> XmpResult<Self> {
        let mut repr = DocumentRepr {
            about: doc.about().to_string(),
            toolkit: doc.toolkit().to_string(),
            ..Default::default()
        };

        // key of each namespace URI
        let mut keys: IndexMap<String, String> = IndexMap::new();
        for ns in doc.namespaces() {
            let (key, entry) = if repr.namespaces.contains_key(ns.prefix()) {
                let entry = NamespaceRepr::Keyed {
                    prefix: ns.prefix().to_string(),
                    uri: ns.uri().to_string(),
                };
                (ns.uri().to_string(), entry)
            } else {
                (ns.prefix().to_string(), NamespaceRepr::Uri(ns.uri().to_string()))
            };
            repr.namespaces.insert(key.clone(), entry);
            keys.insert(ns.uri().to_string(), key);
        }

        for node in doc.nodes().iter() {
            let key = keys
                .get(node.namespace())
                .cloned()
                .unwrap_or_else(|| node.namespace().to_string());
            if let Some(model) = node.model.as_deref() {
                repr.models.insert(key.clone(), model.to_json_value()?);
            }
            if !node.is_empty() {
                repr.content.insert(
                    key,
                    ContentRepr {
                        attrs: node.attrs.clone(),
                        nodes: node.nodes.clone(),
                        value: node.value.clone(),
                    },
                );
            }
        }
        Ok(repr)
    }

    fn into_document(self) -> XmpResult<Document> {
        let mut doc = Document::new();
        doc.about = self.about;
        doc.toolkit = self.toolkit;
        let registry = registry();

        let resolve = |key: &str| -> String {
            match self.namespaces.get(key) {
                Some(entry) => entry.uri().to_string(),
                None => registry
                    .get_by_prefix(key)
                    .map_or_else(|| key.to_string(), |ns| ns.uri().to_string()),
            }
        };

        for (key, value) in self.models.iter() {
            let uri = resolve(key);
            let schema = registry.get_by_uri(&uri).ok_or_else(|| {
                XmpError::BadSchema(format!("no schema registered for '{}'", key))
            })?;
            let mut model = schema.new_model()?;
            model.load_json_value(value.clone())?;
            doc.register_model_namespaces(model.as_ref());
            doc.nodes
                .add_node(Node::with_model(QName::new(uri, ""), model));
        }

        for (key, content) in self.content {
            let uri = resolve(&key);
            let index = match doc.nodes.iter().position(|n| n.namespace() == uri) {
                Some(index) => index,
                None => {
                    doc.nodes.add_node(Node::new(QName::new(uri, "")));
                    doc.nodes.len() - 1
                }
            };
            let node = &mut doc.nodes[index];
            node.attrs = content.attrs;
            node.nodes = content.nodes;
            node.value = content.value;
        }

        for (key, entry) in self.namespaces {
            let (prefix, uri) = match entry {
                NamespaceRepr::Keyed { prefix, uri } => (prefix, uri),
                NamespaceRepr::Uri(uri) if key == uri => {
                    let prefix = registry
                        .get_by_uri(&uri)
                        .map_or_else(|| format!("ns{}", doc.ext_ns.len() + 1), |ns| {
                            ns.prefix().to_string()
                        });
                    (prefix, uri)
                }
                NamespaceRepr::Uri(uri) => (key, uri),
            };
            if doc.int_ns.contains_key(&uri) {
                continue;
            }
            doc.ext_ns.insert(uri.clone(), Namespace::external(prefix, uri));
        }

        doc.clear_dirty();
        Ok(doc)
    }
}

impl Document {
    /// Serialize the document to compact JSON
    pub fn to_json(&self) -> XmpResult<String> {
        let repr = DocumentRepr::from_document(self)?;
        Ok(serde_json::to_string(&repr)?)
    }

    /// Serialize the document to indented JSON
    pub fn to_json_pretty(&self) -> XmpResult<String> {
        let repr = DocumentRepr::from_document(self)?;
        Ok(serde_json::to_string_pretty(&repr)?)
    }

    /// Rebuild a document from its JSON projection.
    ///
    /// # Errors
    ///
    /// Returns `Json` for malformed input and `BadSchema` when a model's
    /// namespace has no registered schema.
    pub fn from_json(json: &str) -> XmpResult<Document> {
        let repr: DocumentRepr = serde_json::from_str(json)?;
        repr.into_document()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DocumentRepr::from_document(self)
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DocumentRepr::deserialize(deserializer)?
            .into_document()
            .map_err(de::Error::custom)
    }
}

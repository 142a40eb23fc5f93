//! Namespace management for XMP
//!
//! This module handles namespace descriptors, the process-wide registry that
//! maps URIs and prefixes to them, and the well-known namespace constants.
//! XMP uses namespaces to organize properties into schemas; a namespace that
//! carries a model factory identifies a typed schema.

use crate::core::error::{XmpError, XmpResult};
use crate::core::model::{Model, ModelFactory};
use crate::core::node::QName;
use indexmap::IndexMap;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

// Global namespace registry, replaced wholesale on every registration
static GLOBAL_REGISTRY: OnceLock<RwLock<Arc<NamespaceRegistry>>> = OnceLock::new();

/// Well-known XMP namespaces
pub mod ns {
    /// XMP Basic namespace
    pub const XMP: &str = "http://ns.adobe.com/xap/1.0/";
    /// Dublin Core namespace
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    /// XMP Media Management namespace
    pub const XMP_MM: &str = "http://ns.adobe.com/xap/1.0/mm/";
    /// XMP Dynamic Media namespace
    pub const XMP_DM: &str = "http://ns.adobe.com/xmp/1.0/DynamicMedia/";
    /// Resource Reference structure namespace
    pub const ST_REF: &str = "http://ns.adobe.com/xap/1.0/sType/ResourceRef#";
    /// Resource Event structure namespace
    pub const ST_EVT: &str = "http://ns.adobe.com/xap/1.0/sType/ResourceEvent#";
    /// Dimensions structure namespace
    pub const ST_DIM: &str = "http://ns.adobe.com/xap/1.0/sType/Dimensions#";
    /// Adobe meta wrapper namespace (`x:xmpmeta`)
    pub const X: &str = "adobe:ns:meta/";
    /// RDF namespace
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    /// XML namespace (for xml:lang, etc.)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";

    /// XMP Basic prefix
    pub const XMP_PREFIX: &str = "xmp";
    /// Dublin Core prefix
    pub const DC_PREFIX: &str = "dc";
    /// XMP Media Management prefix
    pub const XMP_MM_PREFIX: &str = "xmpMM";
    /// XMP Dynamic Media prefix
    pub const XMP_DM_PREFIX: &str = "xmpDM";
    /// Resource Reference prefix
    pub const ST_REF_PREFIX: &str = "stRef";
    /// Resource Event prefix
    pub const ST_EVT_PREFIX: &str = "stEvt";
    /// Dimensions prefix
    pub const ST_DIM_PREFIX: &str = "stDim";
    /// Adobe meta wrapper prefix
    pub const X_PREFIX: &str = "x";
    /// RDF prefix
    pub const RDF_PREFIX: &str = "rdf";
    /// XML prefix
    pub const XML_PREFIX: &str = "xml";
}

/// A namespace descriptor: URI, canonical prefix and an optional model factory.
///
/// The URI is the identity. Descriptors for typed schemas are usually declared
/// as constants next to the model type:
///
/// ```
/// use xmpdoc::{Namespace, XmpResult, Model};
///
/// fn new_model() -> XmpResult<Box<dyn Model>> {
///     # unimplemented!()
/// }
///
/// pub const NS_EXAMPLE: Namespace =
///     Namespace::new("ex", "http://example.com/ns/1.0/", Some(new_model));
/// ```
#[derive(Clone)]
pub struct Namespace {
    prefix: Cow<'static, str>,
    uri: Cow<'static, str>,
    factory: Option<ModelFactory>,
}

impl Namespace {
    /// Create a static namespace descriptor
    pub const fn new(
        prefix: &'static str,
        uri: &'static str,
        factory: Option<ModelFactory>,
    ) -> Self {
        Self {
            prefix: Cow::Borrowed(prefix),
            uri: Cow::Borrowed(uri),
            factory,
        }
    }

    /// Create a descriptor for a namespace found in source data that has no schema
    pub fn external(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: Cow::Owned(prefix.into()),
            uri: Cow::Owned(uri.into()),
            factory: None,
        }
    }

    /// Canonical prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Namespace URI
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Whether this namespace identifies a typed schema
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// Create an empty model for this namespace
    ///
    /// # Errors
    ///
    /// Returns `BadSchema` if the namespace has no factory or the factory fails.
    pub fn new_model(&self) -> XmpResult<Box<dyn Model>> {
        match self.factory {
            Some(factory) => factory(),
            None => Err(XmpError::BadSchema(format!(
                "cannot create '{}' model",
                self.prefix
            ))),
        }
    }

    /// Qualified name of a property in this namespace
    pub fn qname(&self, local: &str) -> QName {
        QName::new(self.uri(), local)
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.prefix == other.prefix
    }
}

impl Eq for Namespace {}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("prefix", &self.prefix)
            .field("uri", &self.uri)
            .field("has_factory", &self.has_factory())
            .finish()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.uri)
    }
}

/// Namespace descriptors known to the core
pub const NS_RDF: Namespace = Namespace::new(ns::RDF_PREFIX, ns::RDF, None);
/// XML namespace descriptor
pub const NS_XML: Namespace = Namespace::new(ns::XML_PREFIX, ns::XML, None);
/// Adobe meta wrapper namespace descriptor
pub const NS_X: Namespace = Namespace::new(ns::X_PREFIX, ns::X, None);
/// Resource Reference namespace descriptor
pub const NS_ST_REF: Namespace = Namespace::new(ns::ST_REF_PREFIX, ns::ST_REF, None);
/// Resource Event namespace descriptor
pub const NS_ST_EVT: Namespace = Namespace::new(ns::ST_EVT_PREFIX, ns::ST_EVT, None);
/// Dimensions namespace descriptor
pub const NS_ST_DIM: Namespace = Namespace::new(ns::ST_DIM_PREFIX, ns::ST_DIM, None);

/// Registry of namespace descriptors keyed by URI, with a prefix index
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    by_uri: IndexMap<String, Namespace>,
    by_prefix: HashMap<String, String>,
}

impl NamespaceRegistry {
    /// Create a registry holding the core namespaces
    pub fn new() -> Self {
        let mut registry = Self::default();
        for ns in [NS_RDF, NS_XML, NS_X, NS_ST_REF, NS_ST_EVT, NS_ST_DIM] {
            registry.insert(ns);
        }
        registry
    }

    /// Register a namespace
    ///
    /// Registering the same URI and prefix again is a no-op, except that a
    /// descriptor with a factory replaces one without.
    ///
    /// # Errors
    ///
    /// Returns `BadSchema` if the URI or prefix is empty, or if either one is
    /// already registered with a different counterpart.
    pub fn register(&mut self, ns: Namespace) -> XmpResult<()> {
        if ns.uri().is_empty() || ns.prefix().is_empty() {
            return Err(XmpError::BadSchema(format!(
                "namespace '{}' must have both a prefix and a URI",
                ns
            )));
        }
        if let Some(existing) = self.by_uri.get(ns.uri()) {
            if existing.prefix() != ns.prefix() {
                return Err(XmpError::BadSchema(format!(
                    "URI '{}' is already registered with prefix '{}'",
                    ns.uri(),
                    existing.prefix()
                )));
            }
            if !existing.has_factory() && ns.has_factory() {
                self.insert(ns);
            }
            return Ok(());
        }
        if let Some(existing_uri) = self.by_prefix.get(ns.prefix()) {
            return Err(XmpError::BadSchema(format!(
                "prefix '{}' is already registered to '{}'",
                ns.prefix(),
                existing_uri
            )));
        }
        self.insert(ns);
        Ok(())
    }

    fn insert(&mut self, ns: Namespace) {
        self.by_prefix
            .insert(ns.prefix().to_string(), ns.uri().to_string());
        self.by_uri.insert(ns.uri().to_string(), ns);
    }

    /// Resolve a namespace by URI, falling back to prefix
    pub fn lookup(&self, uri_or_prefix: &str) -> Option<&Namespace> {
        self.get_by_uri(uri_or_prefix)
            .or_else(|| self.get_by_prefix(uri_or_prefix))
    }

    /// Resolve a namespace by exact URI
    pub fn get_by_uri(&self, uri: &str) -> Option<&Namespace> {
        self.by_uri.get(uri)
    }

    /// Resolve a namespace by prefix
    pub fn get_by_prefix(&self, prefix: &str) -> Option<&Namespace> {
        self.by_prefix
            .get(prefix)
            .and_then(|uri| self.by_uri.get(uri))
    }

    /// All registered namespaces in registration order
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.by_uri.values()
    }

    /// Number of registered namespaces
    pub fn len(&self) -> usize {
        self.by_uri.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.by_uri.is_empty()
    }
}

fn global_registry() -> &'static RwLock<Arc<NamespaceRegistry>> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(Arc::new(NamespaceRegistry::new())))
}

/// Register a namespace in the process-wide registry
///
/// Registration is expected to finish before documents are decoded or
/// encoded. Snapshots taken earlier with [`registry`] are not affected.
pub fn register_namespace(ns: Namespace) -> XmpResult<()> {
    let mut guard = global_registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::make_mut(&mut guard).register(ns)
}

/// Snapshot of the process-wide registry
pub fn registry() -> Arc<NamespaceRegistry> {
    global_registry()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Resolve a namespace in the process-wide registry by URI, then prefix
pub fn lookup_namespace(uri_or_prefix: &str) -> Option<Namespace> {
    registry().lookup(uri_or_prefix).cloned()
}

//! XMP XML/RDF serializer
//!
//! This module writes an `rdf:Description` node tree as an XMP packet.

use crate::core::error::{XmpError, XmpResult};
use crate::core::namespace::{ns, NamespaceRegistry};
use crate::core::node::{Node, QName};
use crate::core::options::XmpOptions;
use indexmap::IndexMap;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};

/// Prefixes that are never handed out to property namespaces
const RESERVED_PREFIXES: &[&str] = &["rdf", "xml", "x", "xmlns"];

/// Serializer for XMP Packets
///
/// Prefixes are chosen per packet: the document's own prefix for a URI
/// wins, then the registered prefix, then a generated `nsN`. A prefix that
/// is already taken in the packet gets a numeric suffix.
pub struct XmpSerializer<'a> {
    registry: &'a NamespaceRegistry,
    hints: &'a IndexMap<String, String>,
    options: XmpOptions,
    /// Prefix assigned to each namespace URI used in the packet
    prefixes: IndexMap<String, String>,
}

impl<'a> XmpSerializer<'a> {
    /// Create a new XMP serializer
    pub fn new(
        registry: &'a NamespaceRegistry,
        hints: &'a IndexMap<String, String>,
        options: XmpOptions,
    ) -> Self {
        Self {
            registry,
            hints,
            options,
            prefixes: IndexMap::new(),
        }
    }

    /// Serialize a description to `x:xmpmeta` RDF/XML
    pub fn serialize_meta(&mut self, desc: &Node, toolkit: &str) -> XmpResult<String> {
        self.collect(desc);

        let buffer = Cursor::new(Vec::new());
        let mut writer = if self.options.indent > 0 {
            Writer::new_with_indent(buffer, b' ', self.options.indent)
        } else {
            Writer::new(buffer)
        };

        let mut meta = BytesStart::new("x:xmpmeta");
        meta.push_attribute(("xmlns:x", ns::X));
        if !toolkit.is_empty() {
            meta.push_attribute(("x:xmptk", toolkit));
        }
        writer.write_event(Event::Start(meta))?;

        let mut rdf = BytesStart::new("rdf:RDF");
        rdf.push_attribute(("xmlns:rdf", ns::RDF));
        writer.write_event(Event::Start(rdf))?;

        self.write_node(&mut writer, desc, true)?;

        writer.write_event(Event::End(BytesEnd::new("rdf:RDF")))?;
        writer.write_event(Event::End(BytesEnd::new("x:xmpmeta")))?;

        let result = writer.into_inner().into_inner();
        String::from_utf8(result)
            .map_err(|e| XmpError::SerializationError(format!("UTF-8 encoding error: {}", e)))
    }

    /// Serialize to XMP Packet format
    pub fn serialize_packet(mut self, desc: &Node, toolkit: &str) -> XmpResult<String> {
        let meta = self.serialize_meta(desc, toolkit)?;
        if !self.options.packet_wrapper {
            return Ok(meta);
        }

        let packet = format!(
            "<?xpacket begin=\"\u{feff}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n{}\n<?xpacket end=\"w\"?>",
            meta
        );
        Ok(packet)
    }

    /// Prefix assigned to `uri`, if it is used in the packet
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes.get(uri).map(String::as_str)
    }

    fn collect(&mut self, node: &Node) {
        self.declare(&node.name.ns);
        for attr in node.attrs.iter() {
            self.declare(&attr.name.ns);
        }
        for child in node.nodes.iter() {
            self.collect(child);
        }
    }

    fn declare(&mut self, uri: &str) {
        if uri.is_empty()
            || uri == ns::RDF
            || uri == ns::XML
            || uri == ns::X
            || self.prefixes.contains_key(uri)
        {
            return;
        }

        let preferred = self
            .hints
            .get(uri)
            .cloned()
            .or_else(|| self.registry.get_by_uri(uri).map(|n| n.prefix().to_string()));

        let prefix = match preferred {
            Some(prefix) if !self.is_taken(&prefix) => prefix,
            Some(prefix) => self.generate(&prefix),
            None => self.generate("ns"),
        };
        self.prefixes.insert(uri.to_string(), prefix);
    }

    fn generate(&self, base: &str) -> String {
        let mut counter = 1;
        loop {
            let candidate = format!("{}{}", base, counter);
            if !self.is_taken(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    fn is_taken(&self, prefix: &str) -> bool {
        RESERVED_PREFIXES.contains(&prefix) || self.prefixes.values().any(|p| p == prefix)
    }

    fn qualified(&self, name: &QName) -> XmpResult<String> {
        let prefix = match name.ns.as_str() {
            ns::RDF => ns::RDF_PREFIX,
            ns::XML => ns::XML_PREFIX,
            ns::X => ns::X_PREFIX,
            uri => self.prefix_for(uri).ok_or_else(|| {
                XmpError::SerializationError(format!("No prefix for namespace '{}'", uri))
            })?,
        };
        Ok(format!("{}:{}", prefix, name.local))
    }

    fn write_node<W: Write>(
        &self,
        writer: &mut Writer<W>,
        node: &Node,
        declare: bool,
    ) -> XmpResult<()> {
        let name = self.qualified(&node.name)?;
        let mut start = BytesStart::new(name.as_str());
        if declare {
            for (uri, prefix) in self.prefixes.iter() {
                start.push_attribute((format!("xmlns:{}", prefix).as_str(), uri.as_str()));
            }
        }
        for attr in node.attrs.iter() {
            let attr_name = self.qualified(&attr.name)?;
            start.push_attribute((attr_name.as_str(), attr.value.as_str()));
        }

        // If there is no content, use Empty (self-closing) tag
        if node.nodes.is_empty() && node.value.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if node.nodes.is_empty() {
            writer.write_event(Event::Text(BytesText::new(&node.value)))?;
        } else {
            for child in node.nodes.iter() {
                self.write_node(writer, child, false)?;
            }
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }
}

//! XMP XML/RDF parser
//!
//! This module turns an XMP Packet into a generic [`Node`] tree with every
//! element and attribute name resolved to its namespace URI. RDF semantics
//! are applied later by the decoder.

use crate::core::error::{XmpError, XmpResult};
use crate::core::node::{Attr, Node, QName};
use indexmap::IndexMap;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, ResolveResult};
use quick_xml::NsReader;

/// Parser for XMP Packets
#[derive(Debug, Default)]
pub struct XmpParser {
    /// Prefixes declared in the source, keyed by URI (first declaration wins)
    prefixes: IndexMap<String, String>,
}

impl XmpParser {
    /// Create a new XMP parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes declared by the parsed source, keyed by namespace URI
    pub fn prefixes(&self) -> &IndexMap<String, String> {
        &self.prefixes
    }

    /// Consume the parser, returning the declared prefixes
    pub fn into_prefixes(self) -> IndexMap<String, String> {
        self.prefixes
    }

    /// Parse an XMP Packet from a string
    ///
    /// This function strips the `<?xpacket>` wrapper if present and parses
    /// the remaining XML into a tree rooted at the outermost element.
    pub fn parse_packet(&mut self, xml: &str) -> XmpResult<Node> {
        let content = Self::extract_packet_content(xml)?;
        self.parse_tree(content)
    }

    /// Extract the XMP Packet content from the `<?xpacket>` wrapper
    fn extract_packet_content(xml: &str) -> XmpResult<&str> {
        let xml = xml.trim_start_matches('\u{feff}');
        let Some(start_pos) = xml.find("<?xpacket") else {
            return Self::validate_xml(xml);
        };

        let Some(end_pos) = xml[start_pos..].find("?>") else {
            return Self::validate_xml(xml);
        };

        let pi_end = start_pos + end_pos + 2;
        let Some(close_pos) = xml[pi_end..].find("<?xpacket end") else {
            return Self::validate_xml(&xml[pi_end..]);
        };

        Self::validate_xml(&xml[pi_end..pi_end + close_pos])
    }

    /// Check that the content looks like XML
    fn validate_xml(xml: &str) -> XmpResult<&str> {
        let trimmed = xml.trim();
        if trimmed.is_empty() || !trimmed.starts_with('<') {
            return Err(XmpError::ParseError("Invalid XML content".to_string()));
        }
        Ok(trimmed)
    }

    /// Parse well-formed XML into a node tree
    fn parse_tree(&mut self, xml: &str) -> XmpResult<Node> {
        let mut reader = NsReader::from_str(xml);
        let mut stack: Vec<Node> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.open_element(&reader, &e)?;
                    stack.push(node);
                }
                Ok(Event::Empty(e)) => {
                    let node = self.open_element(&reader, &e)?;
                    Self::close_element(&mut stack, &mut root, node)?;
                }
                Ok(Event::End(_)) => {
                    // quick-xml has already checked the end name against the open one
                    let node = stack.pop().ok_or_else(|| {
                        XmpError::ParseError("Unexpected closing tag".to_string())
                    })?;
                    Self::close_element(&mut stack, &mut root, node)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(top) = stack.last_mut() {
                        let raw_text = String::from_utf8_lossy(e.as_ref());
                        match unescape(&raw_text) {
                            Ok(text) => top.value.push_str(&text),
                            Err(_) => top.value.push_str(&raw_text),
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(top) = stack.last_mut() {
                        top.value.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if let Some(top) = stack.last_mut() {
                        let reference = format!("&{};", String::from_utf8_lossy(e.as_ref()));
                        let text = unescape(&reference).map_err(|err| {
                            XmpError::ParseError(format!(
                                "Unknown entity reference '{}': {}",
                                reference, err
                            ))
                        })?;
                        top.value.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(XmpError::ParseError(format!(
                        "XML parsing error at position {}: {}",
                        reader.buffer_position(),
                        e
                    )));
                }
            }
        }

        if let Some(open) = stack.last() {
            return Err(XmpError::ParseError(format!(
                "Unclosed element '{}'",
                open.name
            )));
        }
        root.ok_or_else(|| XmpError::ParseError("No root element".to_string()))
    }

    /// Build a node from a start tag, recording namespace declarations
    fn open_element(&mut self, reader: &NsReader<&[u8]>, e: &BytesStart<'_>) -> XmpResult<Node> {
        let (resolved, local) = reader.resolve_element(e.name());
        let name = QName::new(
            resolve_uri(resolved, e.name().as_ref())?,
            String::from_utf8_lossy(local.as_ref()),
        );
        let mut node = Node::new(name);

        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                XmpError::ParseError(format!("Malformed attribute in '{}': {}", node.name, err))
            })?;
            if let Some(binding) = attr.key.as_namespace_binding() {
                if let PrefixDeclaration::Named(prefix) = binding {
                    self.prefixes
                        .entry(attr_value(&attr))
                        .or_insert_with(|| String::from_utf8_lossy(prefix).to_string());
                }
                continue;
            }
            let (resolved, local) = reader.resolve_attribute(attr.key);
            let name = QName::new(
                resolve_uri(resolved, attr.key.as_ref())?,
                String::from_utf8_lossy(local.as_ref()),
            );
            node.attrs.push(Attr::new(name, attr_value(&attr)));
        }
        Ok(node)
    }

    /// Attach a finished element to its parent, or make it the root
    fn close_element(stack: &mut [Node], root: &mut Option<Node>, mut node: Node) -> XmpResult<()> {
        // whitespace between child elements is layout, not content
        if !node.nodes.is_empty() && !node.has_text() {
            node.value.clear();
        }
        match stack.last_mut() {
            Some(parent) => parent.nodes.add_node(node),
            None if root.is_none() => *root = Some(node),
            None => {
                return Err(XmpError::ParseError(format!(
                    "Unexpected element '{}' after the root element",
                    node.name
                )));
            }
        }
        Ok(())
    }
}

fn resolve_uri(resolved: ResolveResult<'_>, raw: &[u8]) -> XmpResult<String> {
    match resolved {
        ResolveResult::Bound(ns) => Ok(String::from_utf8_lossy(ns.as_ref()).to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => Err(XmpError::ParseError(format!(
            "Undeclared namespace prefix '{}' in '{}'",
            String::from_utf8_lossy(&prefix),
            String::from_utf8_lossy(raw)
        ))),
    }
}

fn attr_value(attr: &Attribute<'_>) -> String {
    let raw_value = String::from_utf8_lossy(&attr.value);
    match unescape(&raw_value) {
        Ok(value) => value.to_string(),
        Err(_) => raw_value.to_string(),
    }
}

//! Field value conversion
//!
//! [`XmpProperty`] converts one model field to and from its RDF form. Simple
//! values become attributes of the enclosing element, everything else becomes
//! a child element.

use crate::core::decoder::Decoder;
use crate::core::encoder::Encoder;
use crate::core::error::{XmpError, XmpResult};
use crate::core::node::{Node, QName};

/// Encoded form of a property
#[derive(Debug)]
pub enum Property {
    /// A simple value, written as an attribute (or text inside array items)
    Attr(String),
    /// A structured value; the encoder renames the element
    Element(Node),
}

/// Source form of a property while decoding
#[derive(Debug, Clone, Copy)]
pub enum PropertyRef<'a> {
    /// Value of an attribute
    Attr(&'a str),
    /// An element
    Element(&'a Node),
}

impl<'a> PropertyRef<'a> {
    /// The simple text value of this property.
    ///
    /// Elements qualify when they have no children and no attributes other
    /// than `rdf:resource`, which then supplies the value.
    pub fn simple_value(&self) -> XmpResult<&'a str> {
        match *self {
            PropertyRef::Attr(value) => Ok(value),
            PropertyRef::Element(node) => {
                if !node.nodes.is_empty() {
                    return Err(XmpError::BadValue(
                        "expected a simple value, found structured content".to_string(),
                    ));
                }
                match node.attrs.as_slice() {
                    [] => Ok(node.value.as_str()),
                    [attr] if attr.name.is_rdf("resource") && !node.has_text() => {
                        Ok(attr.value.as_str())
                    }
                    [attr, ..] => Err(XmpError::UnknownContent(format!(
                        "simple value carries qualifier '{}'",
                        attr.name
                    ))),
                }
            }
        }
    }
}

/// A type that can be stored in a model field
pub trait XmpProperty: Sized {
    /// Whether the value is empty and should be omitted when encoding
    fn is_zero(&self) -> bool;

    /// Encode the value; `name` is the property being written
    fn marshal_xmp(&self, enc: &mut Encoder, name: &QName) -> XmpResult<Property>;

    /// Decode the value from an attribute or element
    fn unmarshal_xmp(dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self>;
}

impl XmpProperty for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn marshal_xmp(&self, _enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
        Ok(Property::Attr(self.clone()))
    }

    fn unmarshal_xmp(_dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        prop.simple_value().map(str::to_string)
    }
}

impl XmpProperty for bool {
    fn is_zero(&self) -> bool {
        !*self
    }

    fn marshal_xmp(&self, _enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
        Ok(Property::Attr(if *self { "True" } else { "False" }.to_string()))
    }

    fn unmarshal_xmp(_dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        let value = prop.simple_value()?;
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(XmpError::BadValue(format!(
                "cannot convert '{}' to bool",
                value
            ))),
        }
    }
}

macro_rules! impl_number_property {
    ($($t:ty),*) => {
        $(
            impl XmpProperty for $t {
                fn is_zero(&self) -> bool {
                    *self == <$t>::default()
                }

                fn marshal_xmp(&self, _enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
                    Ok(Property::Attr(self.to_string()))
                }

                fn unmarshal_xmp(_dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
                    let value = prop.simple_value()?;
                    value.trim().parse::<$t>().map_err(|e| {
                        XmpError::BadValue(format!(
                            "cannot convert '{}' to {}: {}",
                            value,
                            stringify!($t),
                            e
                        ))
                    })
                }
            }
        )*
    };
}

impl_number_property!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// `Some` values are always written, even when the inner value is zero
impl<T: XmpProperty> XmpProperty for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn marshal_xmp(&self, enc: &mut Encoder, name: &QName) -> XmpResult<Property> {
        match self {
            Some(value) => value.marshal_xmp(enc, name),
            None => Ok(Property::Attr(String::new())),
        }
    }

    fn unmarshal_xmp(dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        T::unmarshal_xmp(dec, prop).map(Some)
    }
}

/// Free-function form of [`XmpProperty::is_zero`] for
/// `#[serde(skip_serializing_if = "is_zero")]`
pub fn is_zero<T: XmpProperty>(value: &T) -> bool {
    value.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::namespace::ns;
    use crate::core::node::Attr;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_value_from_attr_and_text() {
        assert_eq!(PropertyRef::Attr("abc").simple_value().unwrap(), "abc");
        let node = Node::leaf(QName::new(ns::DC, "format"), "image/png");
        assert_eq!(
            PropertyRef::Element(&node).simple_value().unwrap(),
            "image/png"
        );
    }

    #[test]
    fn test_simple_value_from_resource() {
        let mut node = Node::new(QName::new(ns::DC, "source"));
        node.attrs
            .push(Attr::new(QName::rdf("resource"), "http://example.com/a"));
        assert_eq!(
            PropertyRef::Element(&node).simple_value().unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_simple_value_rejects_qualifiers_and_children() {
        let mut node = Node::leaf(QName::new(ns::DC, "format"), "x");
        node.attrs.push(Attr::new(QName::xml("lang"), "en"));
        assert!(matches!(
            PropertyRef::Element(&node).simple_value(),
            Err(XmpError::UnknownContent(_))
        ));

        let mut parent = Node::new(QName::new(ns::DC, "format"));
        parent.nodes.add_node(node);
        assert!(matches!(
            PropertyRef::Element(&parent).simple_value(),
            Err(XmpError::BadValue(_))
        ));
    }

    #[test]
    fn test_scalar_conversions() {
        let mut dec = Decoder::new();
        assert_eq!(
            u32::unmarshal_xmp(&mut dec, PropertyRef::Attr(" 48000 ")).unwrap(),
            48000
        );
        assert!(u32::unmarshal_xmp(&mut dec, PropertyRef::Attr("fast")).is_err());
        assert!(bool::unmarshal_xmp(&mut dec, PropertyRef::Attr("True")).unwrap());
        assert!(!bool::unmarshal_xmp(&mut dec, PropertyRef::Attr("false")).unwrap());
        assert!(bool::unmarshal_xmp(&mut dec, PropertyRef::Attr("yes")).is_err());
        assert_eq!(
            f64::unmarshal_xmp(&mut dec, PropertyRef::Attr("23.976")).unwrap(),
            23.976
        );
    }

    #[test]
    fn test_zero_values() {
        assert!(String::new().is_zero());
        assert!(0u32.is_zero());
        assert!(!1.5f64.is_zero());
        assert!(None::<u32>.is_zero());
        assert!(!Some(0u32).is_zero());
    }
}

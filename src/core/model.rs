//! Model capability traits
//!
//! Every schema is a plain struct implementing [`Model`]. The field table is
//! declared once with [`xmp_model!`](crate::xmp_model), which generates the
//! [`Fields`] walk used by the encoder and decoder as well as the
//! [`ModelBase`] plumbing (cloning, downcasting, JSON projection).
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use xmpdoc::{xmp_model, Model, Namespace, Seq, XmpResult};
//!
//! const EX: &str = "http://example.com/ns/1.0/";
//! pub const NS_EX: Namespace = Namespace::new("ex", EX, Some(Example::new_model));
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct Example {
//!     pub label: String,
//!     pub steps: Seq<String>,
//! }
//!
//! impl Example {
//!     fn new_model() -> XmpResult<Box<dyn Model>> {
//!         Ok(Box::new(Example::default()))
//!     }
//! }
//!
//! xmp_model!(Example {
//!     label => EX, "label";
//!     steps => EX, "steps";
//! });
//!
//! impl Model for Example {
//!     fn namespaces(&self) -> Vec<Namespace> {
//!         vec![NS_EX]
//!     }
//! }
//! ```

use crate::core::decoder::Decoder;
use crate::core::document::Document;
use crate::core::encoder::Encoder;
use crate::core::error::XmpResult;
use crate::core::namespace::Namespace;
use crate::core::node::Node;
use std::any::Any;
use std::fmt;

/// Constructor producing an empty model for a namespace
pub type ModelFactory = fn() -> XmpResult<Box<dyn Model>>;

/// Walks a type's declared fields in declaration order
pub trait Fields {
    /// Append every non-zero field to `node`
    fn encode_fields(&self, enc: &mut Encoder, node: &mut Node) -> XmpResult<()>;

    /// Claim matching attributes and children of `node` into fields
    ///
    /// Claimed content is removed from `node`; anything left over stays generic.
    fn decode_fields(&mut self, dec: &mut Decoder, node: &mut Node) -> XmpResult<()>;
}

/// Object plumbing every model needs; generated by `xmp_model!`
pub trait ModelBase: Any + Send + Sync + fmt::Debug {
    /// Upcast for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Upcast for mutable downcasting
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Full value copy
    fn clone_model(&self) -> Box<dyn Model>;

    /// A new zero-valued model of the same type
    fn empty_model(&self) -> Box<dyn Model>;

    /// JSON projection of the model's fields
    fn to_json_value(&self) -> XmpResult<serde_json::Value>;

    /// Replace the model's fields from a JSON projection
    fn load_json_value(&mut self, value: serde_json::Value) -> XmpResult<()>;
}

/// The contract every schema implements
pub trait Model: ModelBase + Fields {
    /// Namespaces this model owns; the first one is its primary namespace
    fn namespaces(&self) -> Vec<Namespace>;

    /// Whether this model recognizes properties under `prefix`
    fn can(&self, prefix: &str) -> bool {
        self.namespaces().iter().any(|ns| ns.prefix() == prefix)
    }

    /// Write the model into `node`
    fn encode_xmp(&self, enc: &mut Encoder, node: &mut Node) -> XmpResult<()> {
        self.encode_fields(enc, node)
    }

    /// Read the model from `node`, removing what was claimed
    fn decode_xmp(&mut self, dec: &mut Decoder, node: &mut Node) -> XmpResult<()> {
        self.decode_fields(dec, node)
    }

    /// Pull fields derived from other models after decode
    fn sync_from_xmp(&mut self, _doc: &Document) -> XmpResult<()> {
        Ok(())
    }

    /// Push fields derived from other models before encode
    fn sync_to_xmp(&mut self, _doc: &Document) -> XmpResult<()> {
        Ok(())
    }

    /// Release auxiliary resources
    fn close(&mut self) {}
}

impl Clone for Box<dyn Model> {
    fn clone(&self) -> Self {
        self.clone_model()
    }
}

impl dyn Model + '_ {
    /// Downcast to a concrete model type
    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcast to a concrete model type, mutably
    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Whether the model is of type `T`
    pub fn is<T: Model>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Generate a [`Fields`] implementation from a field table.
///
/// Each entry maps a struct field to a namespace URI and local name. Fields
/// are encoded and decoded in table order.
#[macro_export]
macro_rules! xmp_fields {
    ($ty:ty { $($field:ident => $ns:expr, $local:expr;)* }) => {
        impl $crate::core::model::Fields for $ty {
            fn encode_fields(
                &self,
                enc: &mut $crate::core::encoder::Encoder,
                node: &mut $crate::core::node::Node,
            ) -> $crate::core::error::XmpResult<()> {
                $(
                    enc.encode_property(
                        node,
                        $crate::core::node::QName::new($ns, $local),
                        &self.$field,
                    )?;
                )*
                let _ = (enc, node);
                Ok(())
            }

            fn decode_fields(
                &mut self,
                dec: &mut $crate::core::decoder::Decoder,
                node: &mut $crate::core::node::Node,
            ) -> $crate::core::error::XmpResult<()> {
                $(
                    dec.decode_property(
                        node,
                        &$crate::core::node::QName::new($ns, $local),
                        &mut self.$field,
                    )?;
                )*
                let _ = (dec, node);
                Ok(())
            }
        }
    };
}

/// Declare a schema model: its field table plus cloning, downcasting and
/// JSON plumbing. The type must be `Clone + Debug + Serialize +
/// DeserializeOwned` and still needs a hand-written [`Model`] impl.
#[macro_export]
macro_rules! xmp_model {
    ($ty:ty { $($body:tt)* }) => {
        $crate::xmp_fields!($ty { $($body)* });

        impl $crate::core::model::ModelBase for $ty {
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn clone_model(&self) -> ::std::boxed::Box<dyn $crate::core::model::Model> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn empty_model(&self) -> ::std::boxed::Box<dyn $crate::core::model::Model> {
                ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
            }

            fn to_json_value(&self) -> $crate::core::error::XmpResult<$crate::__private::serde_json::Value> {
                Ok($crate::__private::serde_json::to_value(self)?)
            }

            fn load_json_value(
                &mut self,
                value: $crate::__private::serde_json::Value,
            ) -> $crate::core::error::XmpResult<()> {
                *self = $crate::__private::serde_json::from_value(value)?;
                Ok(())
            }
        }
    };
}

/// Declare an XMP structure type usable as a field value.
///
/// Structures are written as attributes of the property element when all
/// members are simple, and as `rdf:parseType="Resource"` otherwise. The type
/// must be `Default`.
#[macro_export]
macro_rules! xmp_struct {
    ($ty:ty { $($field:ident => $ns:expr, $local:expr;)* }) => {
        $crate::xmp_fields!($ty { $($field => $ns, $local;)* });

        impl $crate::core::property::XmpProperty for $ty {
            fn is_zero(&self) -> bool {
                true $(&& $crate::core::property::XmpProperty::is_zero(&self.$field))*
            }

            fn marshal_xmp(
                &self,
                enc: &mut $crate::core::encoder::Encoder,
                _name: &$crate::core::node::QName,
            ) -> $crate::core::error::XmpResult<$crate::core::property::Property> {
                Ok($crate::core::property::Property::Element(enc.encode_struct(self)?))
            }

            fn unmarshal_xmp(
                dec: &mut $crate::core::decoder::Decoder,
                prop: $crate::core::property::PropertyRef<'_>,
            ) -> $crate::core::error::XmpResult<Self> {
                dec.decode_struct(prop)
            }
        }
    };
}

//! XMP array field types
//!
//! - [`Bag`]: unordered array (`rdf:Bag`), duplicates retained
//! - [`Seq`]: ordered array (`rdf:Seq`)
//! - [`AltString`]: language alternative (`rdf:Alt` keyed by `xml:lang`)

use crate::core::decoder::Decoder;
use crate::core::encoder::Encoder;
use crate::core::error::XmpResult;
use crate::core::node::{ArrayType, QName};
use crate::core::property::{Property, PropertyRef, XmpProperty};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// The reserved default language of a language alternative
pub const X_DEFAULT: &str = "x-default";

macro_rules! array_type {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name<T>(pub Vec<T>);

        impl<T> $name<T> {
            /// Create an empty array
            pub fn new() -> Self {
                Self(Vec::new())
            }

            /// Consume the array, returning its items
            pub fn into_inner(self) -> Vec<T> {
                self.0
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T> Deref for $name<T> {
            type Target = Vec<T>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<T> DerefMut for $name<T> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<T> From<Vec<T>> for $name<T> {
            fn from(items: Vec<T>) -> Self {
                Self(items)
            }
        }

        impl<T> FromIterator<T> for $name<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl<T: XmpProperty> XmpProperty for $name<T> {
            fn is_zero(&self) -> bool {
                self.0.is_empty()
            }

            fn marshal_xmp(&self, enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
                Ok(Property::Element(enc.encode_array($kind, &self.0)?))
            }

            fn unmarshal_xmp(dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
                dec.decode_array($kind, prop).map(Self)
            }
        }
    };
}

array_type!(
    /// Unordered array written as `rdf:Bag`.
    ///
    /// Items keep the order they were decoded or inserted in, but that order
    /// carries no meaning. Duplicates are kept.
    Bag,
    ArrayType::Unordered
);

array_type!(
    /// Ordered array written as `rdf:Seq`
    Seq,
    ArrayType::Ordered
);

/// Language alternative written as `rdf:Alt`, keyed by `xml:lang`
///
/// The `x-default` entry is always written first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AltString(pub IndexMap<String, String>);

impl AltString {
    /// Create an empty alternative
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an alternative holding only a default value
    pub fn with_default(value: impl Into<String>) -> Self {
        let mut alt = Self::new();
        alt.set(X_DEFAULT, value);
        alt
    }

    /// Value for the `x-default` language
    pub fn default_value(&self) -> Option<&str> {
        self.get(X_DEFAULT)
    }

    /// Value for `lang`
    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Set the value for `lang`
    pub fn set(&mut self, lang: impl Into<String>, value: impl Into<String>) {
        self.0.insert(lang.into(), value.into());
    }

    /// Remove the value for `lang`
    pub fn remove(&mut self, lang: &str) -> Option<String> {
        self.0.shift_remove(lang)
    }

    /// Number of languages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no values
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Languages and values, `x-default` first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let default = self.0.get_key_value(X_DEFAULT);
        default
            .into_iter()
            .chain(self.0.iter().filter(|(lang, _)| lang.as_str() != X_DEFAULT))
            .map(|(lang, value)| (lang.as_str(), value.as_str()))
    }
}

impl XmpProperty for AltString {
    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn marshal_xmp(&self, enc: &mut Encoder, _name: &QName) -> XmpResult<Property> {
        Ok(Property::Element(enc.encode_alt(self.iter())))
    }

    fn unmarshal_xmp(dec: &mut Decoder, prop: PropertyRef<'_>) -> XmpResult<Self> {
        dec.decode_alt(prop).map(Self)
    }
}

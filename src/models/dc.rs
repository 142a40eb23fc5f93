//! Dublin Core schema (`dc`)

use crate::core::error::XmpResult;
use crate::core::model::Model;
use crate::core::namespace::{ns, Namespace};
use crate::core::property::is_zero;
use crate::types::array::{AltString, Bag, Seq};
use crate::types::datetime::XmpDateTime;
use crate::xmp_model;
use serde::{Deserialize, Serialize};

/// Dublin Core namespace
pub const NS_DC: Namespace = Namespace::new(ns::DC_PREFIX, ns::DC, Some(DublinCore::new_model));

/// Dublin Core properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DublinCore {
    #[serde(skip_serializing_if = "is_zero")]
    pub contributor: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub coverage: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub creator: Seq<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub date: Seq<XmpDateTime>,
    #[serde(skip_serializing_if = "is_zero")]
    pub description: AltString,
    #[serde(skip_serializing_if = "is_zero")]
    pub format: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub identifier: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub language: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub publisher: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub relation: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub rights: AltString,
    #[serde(skip_serializing_if = "is_zero")]
    pub source: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub subject: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub title: AltString,
    #[serde(rename = "type", skip_serializing_if = "is_zero")]
    pub kind: Bag<String>,
}

impl DublinCore {
    fn new_model() -> XmpResult<Box<dyn Model>> {
        Ok(Box::<Self>::default())
    }
}

xmp_model!(DublinCore {
    contributor => ns::DC, "contributor";
    coverage => ns::DC, "coverage";
    creator => ns::DC, "creator";
    date => ns::DC, "date";
    description => ns::DC, "description";
    format => ns::DC, "format";
    identifier => ns::DC, "identifier";
    language => ns::DC, "language";
    publisher => ns::DC, "publisher";
    relation => ns::DC, "relation";
    rights => ns::DC, "rights";
    source => ns::DC, "source";
    subject => ns::DC, "subject";
    title => ns::DC, "title";
    kind => ns::DC, "type";
});

impl Model for DublinCore {
    fn namespaces(&self) -> Vec<Namespace> {
        vec![NS_DC]
    }
}

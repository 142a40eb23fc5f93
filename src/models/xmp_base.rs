//! XMP Basic schema (`xmp`)

use crate::core::error::XmpResult;
use crate::core::model::Model;
use crate::core::namespace::{ns, Namespace};
use crate::core::property::is_zero;
use crate::types::array::Bag;
use crate::types::datetime::XmpDateTime;
use crate::xmp_model;
use serde::{Deserialize, Serialize};

/// XMP Basic namespace
pub const NS_XMP: Namespace = Namespace::new(ns::XMP_PREFIX, ns::XMP, Some(XmpBase::new_model));

/// XMP Basic properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmpBase {
    #[serde(skip_serializing_if = "is_zero")]
    pub create_date: XmpDateTime,
    #[serde(skip_serializing_if = "is_zero")]
    pub modify_date: XmpDateTime,
    #[serde(skip_serializing_if = "is_zero")]
    pub metadata_date: XmpDateTime,
    #[serde(skip_serializing_if = "is_zero")]
    pub creator_tool: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub label: String,
    /// User rating from -1 (rejected) to 5; `Some(0)` means explicitly unrated
    #[serde(skip_serializing_if = "is_zero")]
    pub rating: Option<i32>,
    #[serde(skip_serializing_if = "is_zero")]
    pub identifier: Bag<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub nickname: String,
    #[serde(rename = "BaseURL", skip_serializing_if = "is_zero")]
    pub base_url: String,
}

impl XmpBase {
    fn new_model() -> XmpResult<Box<dyn Model>> {
        Ok(Box::<Self>::default())
    }
}

xmp_model!(XmpBase {
    create_date => ns::XMP, "CreateDate";
    modify_date => ns::XMP, "ModifyDate";
    metadata_date => ns::XMP, "MetadataDate";
    creator_tool => ns::XMP, "CreatorTool";
    label => ns::XMP, "Label";
    rating => ns::XMP, "Rating";
    identifier => ns::XMP, "Identifier";
    nickname => ns::XMP, "Nickname";
    base_url => ns::XMP, "BaseURL";
});

impl Model for XmpBase {
    fn namespaces(&self) -> Vec<Namespace> {
        vec![NS_XMP]
    }
}

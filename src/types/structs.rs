//! Shared XMP structure types
//!
//! These structures are used by several schemas, so they live in the core
//! rather than in any one schema package.

use crate::core::namespace::ns;
use crate::core::property::is_zero;
use crate::types::array::Seq;
use crate::types::datetime::XmpDateTime;
use crate::xmp_struct;
use serde::{Deserialize, Serialize};

/// A reference to another resource (`stRef`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(rename = "instanceID", skip_serializing_if = "is_zero")]
    pub instance_id: String,
    #[serde(rename = "documentID", skip_serializing_if = "is_zero")]
    pub document_id: String,
    #[serde(rename = "originalDocumentID", skip_serializing_if = "is_zero")]
    pub original_document_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rendition_class: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rendition_params: String,
    #[serde(rename = "versionID", skip_serializing_if = "is_zero")]
    pub version_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub file_path: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub from_part: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub to_part: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub mask_markers: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub last_modify_date: XmpDateTime,
    #[serde(skip_serializing_if = "is_zero")]
    pub manager: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub manager_variant: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub manage_to: String,
    #[serde(rename = "manageUI", skip_serializing_if = "is_zero")]
    pub manage_ui: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub alternate_paths: Seq<String>,
}

xmp_struct!(ResourceRef {
    instance_id => ns::ST_REF, "instanceID";
    document_id => ns::ST_REF, "documentID";
    original_document_id => ns::ST_REF, "originalDocumentID";
    rendition_class => ns::ST_REF, "renditionClass";
    rendition_params => ns::ST_REF, "renditionParams";
    version_id => ns::ST_REF, "versionID";
    file_path => ns::ST_REF, "filePath";
    from_part => ns::ST_REF, "fromPart";
    to_part => ns::ST_REF, "toPart";
    mask_markers => ns::ST_REF, "maskMarkers";
    last_modify_date => ns::ST_REF, "lastModifyDate";
    manager => ns::ST_REF, "manager";
    manager_variant => ns::ST_REF, "managerVariant";
    manage_to => ns::ST_REF, "manageTo";
    manage_ui => ns::ST_REF, "manageUI";
    alternate_paths => ns::ST_REF, "alternatePaths";
});

/// One step of a resource's history (`stEvt`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceEvent {
    #[serde(skip_serializing_if = "is_zero")]
    pub action: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub changed: String,
    #[serde(rename = "instanceID", skip_serializing_if = "is_zero")]
    pub instance_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub parameters: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub software_agent: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub when: XmpDateTime,
}

xmp_struct!(ResourceEvent {
    action => ns::ST_EVT, "action";
    changed => ns::ST_EVT, "changed";
    instance_id => ns::ST_EVT, "instanceID";
    parameters => ns::ST_EVT, "parameters";
    software_agent => ns::ST_EVT, "softwareAgent";
    when => ns::ST_EVT, "when";
});

/// Width and height with a unit (`stDim`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimensions {
    #[serde(rename = "w", skip_serializing_if = "is_zero")]
    pub width: f64,
    #[serde(rename = "h", skip_serializing_if = "is_zero")]
    pub height: f64,
    #[serde(skip_serializing_if = "is_zero")]
    pub unit: String,
}

xmp_struct!(Dimensions {
    width => ns::ST_DIM, "w";
    height => ns::ST_DIM, "h";
    unit => ns::ST_DIM, "unit";
});

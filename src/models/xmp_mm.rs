//! XMP Media Management schema (`xmpMM`)

use crate::core::document::Document;
use crate::core::error::XmpResult;
use crate::core::model::Model;
use crate::core::namespace::{ns, Namespace};
use crate::core::property::is_zero;
use crate::types::array::{Bag, Seq};
use crate::types::structs::{ResourceEvent, ResourceRef};
use crate::xmp_model;
use serde::{Deserialize, Serialize};

/// XMP Media Management namespace
pub const NS_XMP_MM: Namespace =
    Namespace::new(ns::XMP_MM_PREFIX, ns::XMP_MM, Some(XmpMediaManagement::new_model));

/// XMP Media Management properties
///
/// `pantry` holds the complete metadata of ingredients as nested documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmpMediaManagement {
    #[serde(rename = "DocumentID", skip_serializing_if = "is_zero")]
    pub document_id: String,
    #[serde(rename = "InstanceID", skip_serializing_if = "is_zero")]
    pub instance_id: String,
    #[serde(rename = "OriginalDocumentID", skip_serializing_if = "is_zero")]
    pub original_document_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rendition_class: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub rendition_params: String,
    #[serde(rename = "VersionID", skip_serializing_if = "is_zero")]
    pub version_id: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub manager: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub manage_to: String,
    #[serde(rename = "ManageUI", skip_serializing_if = "is_zero")]
    pub manage_ui: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub derived_from: ResourceRef,
    #[serde(skip_serializing_if = "is_zero")]
    pub managed_from: ResourceRef,
    #[serde(skip_serializing_if = "is_zero")]
    pub history: Seq<ResourceEvent>,
    #[serde(skip_serializing_if = "is_zero")]
    pub ingredients: Bag<ResourceRef>,
    #[serde(skip_serializing_if = "is_zero")]
    pub pantry: Bag<Document>,
}

impl XmpMediaManagement {
    fn new_model() -> XmpResult<Box<dyn Model>> {
        Ok(Box::<Self>::default())
    }
}

xmp_model!(XmpMediaManagement {
    document_id => ns::XMP_MM, "DocumentID";
    instance_id => ns::XMP_MM, "InstanceID";
    original_document_id => ns::XMP_MM, "OriginalDocumentID";
    rendition_class => ns::XMP_MM, "RenditionClass";
    rendition_params => ns::XMP_MM, "RenditionParams";
    version_id => ns::XMP_MM, "VersionID";
    manager => ns::XMP_MM, "Manager";
    manage_to => ns::XMP_MM, "ManageTo";
    manage_ui => ns::XMP_MM, "ManageUI";
    derived_from => ns::XMP_MM, "DerivedFrom";
    managed_from => ns::XMP_MM, "ManagedFrom";
    history => ns::XMP_MM, "History";
    ingredients => ns::XMP_MM, "Ingredients";
    pantry => ns::XMP_MM, "Pantry";
});

impl Model for XmpMediaManagement {
    fn namespaces(&self) -> Vec<Namespace> {
        vec![NS_XMP_MM]
    }

    fn close(&mut self) {
        for doc in self.pantry.iter_mut() {
            doc.close();
        }
        self.pantry.clear();
    }
}

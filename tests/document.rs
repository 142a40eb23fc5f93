//! Document lifecycle: model binding, merging, namespace removal, close

mod fixtures;

use fixtures::{PREMIERE_PACKET, SPLIT_PACKET};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use xmpdoc::models::dc::{DublinCore, NS_DC};
use xmpdoc::models::xmp_base::{XmpBase, NS_XMP};
use xmpdoc::models::xmp_dm::NS_XMP_DM;
use xmpdoc::models::xmp_mm::{XmpMediaManagement, NS_XMP_MM};
use std::sync::Arc;
use xmpdoc::{
    marshal, models, unmarshal, xmp_model, Decoder, Document, Encoder, Model, Namespace,
    NamespaceRegistry, XmpError, XmpOptions,
};

/// A model that forgets to declare its namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nameless {
    pub note: String,
}

xmp_model!(Nameless {
    note => "http://example.com/nameless/", "note";
});

impl Model for Nameless {
    fn namespaces(&self) -> Vec<Namespace> {
        Vec::new()
    }
}

mod binding {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn make_model_creates_once() {
        models::register_all().unwrap();
        let mut doc = Document::new();
        doc.make_model_as::<XmpBase>(&NS_XMP).unwrap().creator_tool = "tool".to_string();
        doc.make_model(&NS_XMP).unwrap();
        assert_eq!(doc.nodes().len(), 1);
        assert_eq!(doc.model::<XmpBase>().unwrap().creator_tool, "tool");
    }

    #[test]
    fn add_model_replaces_and_keeps_residue() {
        models::register_all().unwrap();
        let mut doc = unmarshal(SPLIT_PACKET.as_bytes()).unwrap();
        let before = doc.find_node(&NS_DC).unwrap().nodes.len();

        let fresh = DublinCore {
            format: "image/tiff".to_string(),
            ..Default::default()
        };
        let node = doc.add_model(Box::new(fresh)).unwrap();
        assert_eq!(node.nodes.len(), before);

        let dc = doc.model::<DublinCore>().unwrap();
        assert_eq!(dc.format, "image/tiff");
        assert!(dc.creator.is_empty());
        assert!(doc.is_dirty());
    }

    #[test]
    fn add_model_without_namespace_fails() {
        let mut doc = Document::new();
        let err = doc.add_model(Box::new(Nameless::default())).unwrap_err();
        assert!(matches!(err, XmpError::BadSchema(_)));
        assert!(doc.nodes().is_empty());
    }

    #[test]
    fn local_registry_limits_binding() {
        models::register_all().unwrap();
        let mut local = NamespaceRegistry::new();
        local.register(NS_DC).unwrap();
        let local = Arc::new(local);

        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about=""
    xmlns:dc="http://purl.org/dc/elements/1.1/"
    xmlns:xmp="http://ns.adobe.com/xap/1.0/"
   dc:format="image/png" xmp:CreatorTool="Tool"/>
</rdf:RDF>"#;
        let doc = Decoder::with_registry(local.clone(), XmpOptions::default())
            .decode_str(xml)
            .unwrap();

        assert_eq!(doc.model::<DublinCore>().unwrap().format, "image/png");
        assert!(doc.model::<XmpBase>().is_none());
        let xmp = doc.nodes().find_by_uri(NS_XMP.uri()).unwrap();
        assert!(!xmp.has_model());
        assert_eq!(xmp.get_attr(&NS_XMP.qname("CreatorTool")), Some("Tool"));

        let out = Encoder::with_registry(local, XmpOptions::default())
            .encode_to_string(&doc)
            .unwrap();
        assert!(out.contains("dc:format=\"image/png\""));
        assert!(out.contains("xmp:CreatorTool=\"Tool\""));

        // the global registry still binds everything
        let global = unmarshal(out.as_bytes()).unwrap();
        assert_eq!(global.model::<XmpBase>().unwrap().creator_tool, "Tool");
    }

    #[test]
    fn wrong_type_is_rejected() {
        models::register_all().unwrap();
        let mut doc = Document::new();
        assert!(matches!(
            doc.make_model_as::<XmpBase>(&NS_DC),
            Err(XmpError::BadSchema(_))
        ));
    }
}

mod merging {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copies_missing_namespaces() {
        models::register_all().unwrap();
        let mut target = Document::new();
        target.make_model_as::<DublinCore>(&NS_DC).unwrap().format = "image/png".to_string();

        let source = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        target.merge(&source).unwrap();

        assert!(target.model::<XmpMediaManagement>().is_some());
        assert!(target.find_ns("creatorAtom", "").is_some());
        // the incoming dc model wins
        assert_eq!(target.model::<DublinCore>().unwrap().format, "QuickTime");
    }

    #[test]
    fn merged_models_are_independent() {
        models::register_all().unwrap();
        let mut source = Document::new();
        source.make_model_as::<DublinCore>(&NS_DC).unwrap().subject = vec!["a".to_string()].into();
        let mut target = Document::new();
        target.make_model(&NS_DC).unwrap();

        target.merge(&source).unwrap();
        source.model_mut::<DublinCore>().unwrap().subject.push("b".to_string());

        assert_eq!(target.model::<DublinCore>().unwrap().subject.0, vec!["a"]);
        assert_eq!(source.model::<DublinCore>().unwrap().subject.len(), 2);
    }

    fn acme(flag: &str) -> Document {
        let xml = format!(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="" xmlns:acme="http://acme.example.com/ns/"
    acme:flag="{}" acme:only="{}"/>
</rdf:RDF>"#,
            flag, flag
        );
        unmarshal(xml.as_bytes()).unwrap()
    }

    #[test]
    fn incoming_generic_value_wins() {
        let mut target = acme("old");
        target.merge(&acme("new")).unwrap();

        let out = String::from_utf8(marshal(&mut target).unwrap()).unwrap();
        assert!(out.contains("acme:flag=\"new\""));
        assert!(out.contains("acme:only=\"new\""));
        assert!(!out.contains("\"old\""));
        assert_eq!(target, acme("new"));
    }

    #[test]
    fn merge_into_empty_equals_source() {
        models::register_all().unwrap();
        let source = unmarshal(SPLIT_PACKET.as_bytes()).unwrap();
        let mut target = Document::new();
        target.set_toolkit(source.toolkit());
        target.merge(&source).unwrap();
        assert_eq!(target, source);
    }
}

mod removal {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn remove_by_name_and_value() {
        models::register_all().unwrap();
        let mut doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        assert!(doc.remove_namespace_by_name("creatorAtom"));
        assert!(doc.remove_namespace(&NS_XMP_DM));
        assert!(!doc.remove_namespace(&NS_XMP_DM));

        let out = String::from_utf8(marshal(&mut doc).unwrap()).unwrap();
        assert!(!out.contains("creatorAtom"));
        assert!(!out.contains("xmpDM:audioSampleRate"));
        assert!(out.contains("xmpMM:History"));
    }

    #[test]
    fn remove_many() {
        models::register_all().unwrap();
        let mut doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        assert!(doc.remove_namespaces(&[NS_XMP, NS_DC]));
        assert!(doc.model::<XmpBase>().is_none());
        assert!(doc.model::<DublinCore>().is_none());
        assert!(doc.model::<XmpMediaManagement>().is_some());
    }

    #[test]
    fn filter_keeps_listed() {
        models::register_all().unwrap();
        let mut doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        assert!(doc.filter_namespaces(&[NS_XMP_MM]));
        assert_eq!(doc.nodes().len(), 1);
        assert!(doc.model::<XmpMediaManagement>().is_some());
        assert!(!doc.filter_namespaces(&[NS_XMP_MM]));
    }
}

mod closing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn close_is_idempotent() {
        models::register_all().unwrap();
        let mut doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        doc.close();
        doc.close();
        assert!(doc.model::<XmpMediaManagement>().is_none());
    }

    #[test]
    fn about_marks_dirty() {
        let mut doc = Document::new();
        assert!(!doc.is_dirty());
        doc.set_about("uuid:2");
        assert!(doc.is_dirty());
        assert_eq!(doc.about(), "uuid:2");
    }
}

//! Decode / encode round trips

mod fixtures;

use fixtures::{DC_PACKET, PREMIERE_PACKET, SPLIT_PACKET};
use pretty_assertions::assert_eq;
use xmpdoc::models::dc::DublinCore;
use xmpdoc::models::xmp_base::XmpBase;
use xmpdoc::models::xmp_dm::XmpDynamicMedia;
use xmpdoc::models::xmp_mm::XmpMediaManagement;
use xmpdoc::{marshal, models, unmarshal, Document, QName};

fn round_trip(packet: &str) -> (Document, Document) {
    models::register_all().unwrap();
    let mut first = unmarshal(packet.as_bytes()).unwrap();
    let encoded = marshal(&mut first).unwrap();
    let second = unmarshal(&encoded).unwrap();
    (first, second)
}

mod premiere {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_typed_models() {
        models::register_all().unwrap();
        let doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        assert_eq!(
            doc.toolkit(),
            "Adobe XMP Core 5.5-c021 79.155241, 2013/11/25-21:10:40        "
        );

        let base = doc.model::<XmpBase>().unwrap();
        assert_eq!(base.creator_tool, "Adobe Premiere Pro CC (Macintosh)");
        assert_eq!(base.create_date.to_string(), "2015-03-23T22:18:20-04:00");

        let dm = doc.model::<XmpDynamicMedia>().unwrap();
        assert_eq!(dm.audio_sample_rate, 48000);
        assert_eq!(dm.duration.value, 203);
        assert_eq!(dm.duration.scale, "1/24");
        assert_eq!(dm.alt_timecode.time_value, "01:02:03:04");
        assert_eq!(dm.video_frame_size.height, 720.0);
        assert_eq!(dm.project_ref.kind, "movie");

        let mm = doc.model::<XmpMediaManagement>().unwrap();
        assert_eq!(mm.history.len(), 4);
        assert_eq!(mm.history[1].action, "created");
        assert_eq!(mm.ingredients.len(), 2);
        assert_eq!(mm.ingredients[0], mm.ingredients[1]);
        assert_eq!(
            mm.derived_from.document_id,
            "xmp.did:8c22b83c-cfd3-43fe-b402-2d96d4a3d4d4"
        );

        let dc = doc.model::<DublinCore>().unwrap();
        assert_eq!(dc.format, "QuickTime");
    }

    #[test]
    fn pantry_items_are_documents() {
        models::register_all().unwrap();
        let doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        let mm = doc.model::<XmpMediaManagement>().unwrap();
        assert_eq!(mm.pantry.len(), 1);

        let item = &mm.pantry[0];
        let nested = item.model::<XmpMediaManagement>().unwrap();
        assert_eq!(nested.instance_id, "47a9a75b-3a6b-0990-173c-d5a900000074");
        assert_eq!(nested.history.len(), 1);
        let dm = item.model::<XmpDynamicMedia>().unwrap();
        assert_eq!(dm.start_time_scale, 5000);
        assert_eq!(dm.alt_timecode.time_format, "25Timecode");
    }

    #[test]
    fn unknown_namespace_stays_generic() {
        models::register_all().unwrap();
        let doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
        let atom = doc
            .find_ns("creatorAtom", "")
            .expect("creatorAtom namespace is tracked");
        let node = doc.find_node(&atom).unwrap();
        assert!(!node.has_model());
        assert_eq!(node.nodes.len(), 2);
        assert_eq!(
            node.nodes[0].get_attr(&QName::new(atom.uri(), "extension")),
            Some(".prproj")
        );
    }

    #[test]
    fn round_trips() {
        let (first, second) = round_trip(PREMIERE_PACKET);
        assert_eq!(second, first);
    }
}

mod scenario {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_and_subject_survive() {
        let (first, second) = round_trip(DC_PACKET);
        let dc = second.model::<DublinCore>().unwrap();

        let title: Vec<(&str, &str)> = dc.title.iter().collect();
        assert_eq!(title, vec![("x-default", "Hello")]);

        let mut subject = dc.subject.clone().into_inner();
        subject.sort();
        assert_eq!(subject, vec!["a", "b"]);
        assert_eq!(second, first);
    }

    #[test]
    fn encoded_packet_shape() {
        models::register_all().unwrap();
        let mut doc = unmarshal(DC_PACKET.as_bytes()).unwrap();
        let xml = String::from_utf8(marshal(&mut doc).unwrap()).unwrap();
        assert!(xml.starts_with("<?xpacket begin="));
        assert!(xml.contains("xmlns:dc=\"http://purl.org/dc/elements/1.1/\""));
        assert!(xml.contains("<rdf:li xml:lang=\"x-default\">Hello</rdf:li>"));
        assert_eq!(xml.matches("<rdf:li>").count(), 2);
    }
}

mod split_descriptions {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn merges_same_namespace_properties() {
        models::register_all().unwrap();
        let doc = unmarshal(SPLIT_PACKET.as_bytes()).unwrap();
        assert_eq!(doc.toolkit(), "Test Toolkit 1.0");
        let base = doc.model::<XmpBase>().unwrap();
        assert_eq!(base.creator_tool, "Acme Cam 3");
        assert_eq!(base.rating, Some(4));
        assert_eq!(
            doc.nodes()
                .iter()
                .filter(|n| n.namespace() == xmpdoc::core::namespace::ns::XMP)
                .count(),
            1
        );
    }

    #[test]
    fn round_trips() {
        let (first, second) = round_trip(SPLIT_PACKET);
        assert_eq!(second, first);
        let dc = second.model::<DublinCore>().unwrap();
        assert_eq!(dc.creator.0, vec!["Zoe", "Adam", "Mia"]);
    }

    #[test]
    fn unknown_content_is_reproduced() {
        let (first, second) = round_trip(SPLIT_PACKET);
        let acme = first.find_ns("acme", "").unwrap();
        assert_eq!(second.find_node(&acme), first.find_node(&acme));

        let lens = second.find_node(&acme).unwrap().child(&acme.qname("lens")).unwrap();
        assert_eq!(lens.get_attr(&acme.qname("focal")), Some("24"));
        assert_eq!(lens.nodes[0].value, "multi & hard");
    }
}

mod packet_forms {
    use super::*;
    use pretty_assertions::assert_eq;

    const BARE_RDF: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <rdf:Description rdf:about="uuid:1" xmlns:dc="http://purl.org/dc/elements/1.1/" dc:format="image/jpeg"/>
</rdf:RDF>"#;

    #[test]
    fn bare_rdf_without_wrapper() {
        models::register_all().unwrap();
        let doc = unmarshal(BARE_RDF.as_bytes()).unwrap();
        assert_eq!(doc.about(), "uuid:1");
        assert_eq!(doc.model::<DublinCore>().unwrap().format, "image/jpeg");
    }

    #[test]
    fn bom_is_tolerated() {
        models::register_all().unwrap();
        let input = format!("\u{feff}{}", BARE_RDF);
        assert!(unmarshal(input.as_bytes()).is_ok());
    }

    #[test]
    fn about_is_written() {
        let (_, second) = round_trip(BARE_RDF);
        assert_eq!(second.about(), "uuid:1");
    }

    #[test]
    fn compact_output_without_wrapper() {
        models::register_all().unwrap();
        let mut doc = unmarshal(BARE_RDF.as_bytes()).unwrap();
        let options = xmpdoc::XmpOptions::default()
            .indent(0)
            .without_packet_wrapper();
        let xml = String::from_utf8(xmpdoc::marshal_with(&mut doc, options).unwrap()).unwrap();
        assert!(xml.starts_with("<x:xmpmeta"));
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn from_str_parses() {
        models::register_all().unwrap();
        let doc: Document = BARE_RDF.parse().unwrap();
        assert!(doc.model::<DublinCore>().is_some());
    }
}

//! JSON projection of whole documents

mod fixtures;

use fixtures::{PREMIERE_PACKET, SPLIT_PACKET};
use pretty_assertions::assert_eq;
use serde_json::Value;
use xmpdoc::models::xmp_dm::XmpDynamicMedia;
use xmpdoc::models::xmp_mm::XmpMediaManagement;
use xmpdoc::{marshal, models, unmarshal, Document};

#[test]
fn premiere_round_trip() {
    models::register_all().unwrap();
    let doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
    let json = doc.to_json().unwrap();
    let back = Document::from_json(&json).unwrap();
    assert_eq!(back, doc);

    let mm = back.model::<XmpMediaManagement>().unwrap();
    assert_eq!(mm.pantry.len(), 1);
    assert!(mm.pantry[0].model::<XmpDynamicMedia>().is_some());
}

#[test]
fn shape_uses_prefixes() {
    models::register_all().unwrap();
    let doc = unmarshal(PREMIERE_PACKET.as_bytes()).unwrap();
    let value: Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();

    assert_eq!(value["models"]["xmpDM"]["audioSampleRate"], 48000);
    assert_eq!(value["models"]["xmp"]["CreatorTool"], "Adobe Premiere Pro CC (Macintosh)");
    assert_eq!(
        value["namespaces"]["creatorAtom"],
        "http://ns.adobe.com/creatorAtom/1.0/"
    );
    assert!(value["content"]["creatorAtom"]["nodes"].is_array());
    assert!(value["models"].get("creatorAtom").is_none());
}

#[test]
fn json_then_xmp() {
    models::register_all().unwrap();
    let doc = unmarshal(SPLIT_PACKET.as_bytes()).unwrap();
    let mut restored: Document = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
    assert!(!restored.is_dirty());

    let out = marshal(&mut restored).unwrap();
    assert_eq!(unmarshal(&out).unwrap(), doc);
}

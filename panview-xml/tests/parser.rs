use std::fs;
use std::path::PathBuf;

use panview_xml::{find_xpath, parse_file, to_xml_string, NodePath, ParseError};
use pretty_assertions::assert_eq;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parses_panorama_backup() {
    let root = parse_file(&fixture("fixtures/panorama.xml")).expect("parse should succeed");
    assert_eq!(root.tag, "config");
    assert_eq!(root.attr("version"), Some("10.2.0"));

    let groups = root
        .descend(&["devices", "entry", "device-group"])
        .expect("device-group container");
    let names: Vec<&str> = groups.entries().filter_map(|e| e.name()).collect();
    assert_eq!(names, vec!["branch", "empty-dg"]);
}

#[test]
fn xpath_from_cursor_resolves_back_to_the_same_node() {
    let root = parse_file(&fixture("fixtures/panorama.xml")).expect("parse");
    let lan = NodePath::root(&root)
        .descend(&["devices", "entry", "device-group"])
        .and_then(|dg| dg.entry_named("branch"))
        .and_then(|dg| dg.child("address"))
        .and_then(|address| address.entry_named("branch-lan"))
        .expect("branch-lan");

    let xpath = lan.xpath();
    assert_eq!(
        xpath,
        "/config/devices/entry[@name='localhost.localdomain']/device-group/entry[@name='branch']/address/entry[@name='branch-lan']"
    );
    let found = find_xpath(&root, &xpath).expect("lookup");
    assert_eq!(found.node(), lan.node());
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let err = parse_file(&fixture("fixtures/does-not-exist.xml")).expect_err("missing");
    assert!(matches!(err, ParseError::NotFound(_)));
}

#[test]
fn written_backup_parses_back_to_the_same_tree() {
    let root = parse_file(&fixture("fixtures/panorama.xml")).expect("parse");
    let xml = to_xml_string(&root).expect("write");

    let dir = tempfile::tempdir().expect("tempdir should be created");
    let out = dir.path().join("panorama-copy.xml");
    fs::write(&out, xml).expect("write copy");

    let reparsed = parse_file(&out).expect("reparse");
    assert_eq!(reparsed, root);
}

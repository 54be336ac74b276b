/*!
 * Tests for the XLIFF document model
 */

use xlf_auto_translate::errors::DocumentError;
use xlf_auto_translate::xliff::{Node, XliffDocument, XliffVersion};

use crate::common::fixtures::{V1_MESSAGES, V2_ALL_FINAL, V2_ESCAPED_FINAL, V2_MESSAGES};

/// Test version detection on both fixtures
#[test]
fn test_version_withFixtures_shouldDetectFormat() {
    assert_eq!(XliffDocument::parse(V1_MESSAGES).unwrap().version(), XliffVersion::V1);
    assert_eq!(XliffDocument::parse(V2_MESSAGES).unwrap().version(), XliffVersion::V2);
}

/// Test that unknown or missing versions fall back to 1.x
#[test]
fn test_version_withoutVersionAttribute_shouldDefaultToV1() {
    let document = XliffDocument::parse("<xliff><file/></xliff>").unwrap();
    assert_eq!(document.version(), XliffVersion::V1);
}

/// Test that parsing then serializing an untouched document is lossless
#[test]
fn test_roundTrip_withEscapedText_shouldReproduceInputExactly() {
    for xml in [V1_MESSAGES, V2_MESSAGES, V2_ALL_FINAL, V2_ESCAPED_FINAL] {
        let document = XliffDocument::parse(xml).unwrap();
        assert_eq!(document.to_xml().unwrap(), xml);
    }
}

/// Test that text leaves are stored unescaped
#[test]
fn test_parse_withEntities_shouldUnescapeText() {
    let document = XliffDocument::parse(V2_ALL_FINAL).unwrap();
    let unit = document.units()[0];
    let source = unit.child("segment").and_then(|segment| segment.child("source")).unwrap();

    assert_eq!(source.text(), "Hello , it's <fine> & \"quoted\"");
    assert_eq!(source.text_leaf_count(), 2);
}

/// Test that entity references and attribute quoting are read as values
#[test]
fn test_parse_withEntitiesAndSingleQuotes_shouldDecodeValues() {
    let document = XliffDocument::parse(V2_ESCAPED_FINAL).unwrap();
    let unit = document.units()[0];
    let source = unit.child("segment").and_then(|segment| segment.child("source")).unwrap();

    assert_eq!(unit.attribute("id"), Some("u1"));
    assert_eq!(source.text(), "It's \"ok\"\u{a0}now");
}

/// Test unit enumeration for 1.x documents
#[test]
fn test_units_withV1Document_shouldListTransUnits() {
    let document = XliffDocument::parse(V1_MESSAGES).unwrap();
    let ids: Vec<_> = document.units().iter().filter_map(|unit| unit.attribute("id")).collect();
    assert_eq!(ids, vec!["greeting", "welcome", "farewell", "count", "items"]);

    let farewell = document.units()[2];
    assert_eq!(farewell.child("target").and_then(|t| t.attribute("state")), Some("final"));
}

/// Test unit enumeration for 2.0 documents
#[test]
fn test_units_withV2Document_shouldListUnits() {
    let document = XliffDocument::parse(V2_MESSAGES).unwrap();
    let ids: Vec<_> = document.units().iter().filter_map(|unit| unit.attribute("id")).collect();
    assert_eq!(ids, vec!["save", "cancel"]);
    assert!(document.root_element().is_some_and(|root| root.attribute("srcLang") == Some("en")));
}

/// Test that the prolog survives as its own node
#[test]
fn test_parse_shouldKeepDeclaration() {
    let document = XliffDocument::parse(V1_MESSAGES).unwrap();
    let Node::Document(children) = document.root() else {
        panic!("root is not a document node");
    };
    assert!(matches!(&children[0], Node::Declaration(content) if content.contains("encoding=\"UTF-8\"")));
}

/// Test that structural errors are reported
#[test]
fn test_parse_withMalformedXml_shouldFail() {
    assert!(XliffDocument::parse("<xliff><file></xliff>").is_err());
    assert!(matches!(
        XliffDocument::parse("<xliff><file>"),
        Err(DocumentError::UnclosedElement(_)) | Err(DocumentError::Malformed { .. })
    ));
    assert!(XliffDocument::parse("").is_err());
}

/*!
 * End-to-end tests of document translation through a mock translator
 */

use std::sync::Arc;
use std::time::Duration;

use xlf_auto_translate::providers::mock::MockTranslator;
use xlf_auto_translate::providers::{LanguagePair, ProxyRoute};
use xlf_auto_translate::translation::{
    BOILERPLATE, DispatchSettings, FAILURE_MARKER, PlaceholderFilter, SelectionOptions,
    TranslationOptions, TranslationService,
};
use xlf_auto_translate::xliff::{XliffDocument, XliffVersion};

use crate::common::fixtures::{V1_MESSAGES, V2_ALL_FINAL, V2_ESCAPED_FINAL, V2_MESSAGES};
use crate::common::{mock_service, test_stamp};

/// Translate `xml` with a fixed stamp and return the serialized result
async fn translate(service: &TranslationService, xml: &str) -> (String, xlf_auto_translate::translation::TranslationSummary) {
    let mut document = XliffDocument::parse(xml).unwrap();
    let summary = service
        .translate_document_with_stamp(&mut document, &test_stamp(), |_, _| {})
        .await;
    (document.to_xml().unwrap(), summary)
}

fn english_to_french() -> MockTranslator {
    MockTranslator::dictionary([("Hello", "Bonjour"), ("Welcome", "Bienvenue"), ("Cancel", "Annuler")])
}

/// Test that a missing target is created after the source and translated
#[tokio::test]
async fn test_translate_v1_withMissingTarget_shouldCreateTranslatedTarget() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions { clear_state: true, ..Default::default() });

    let (xml, summary) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains("<source>Hello</source>\n        <target state=\"translated\">Bonjour</target>"));
    assert_eq!(summary.version, XliffVersion::V1);
    assert_eq!(summary.units_visited, 5);
    assert_eq!(summary.failed, 0);
}

/// Test that a `new` target is retranslated leaf by leaf, keeping inline markup
#[tokio::test]
async fn test_translate_v1_withNewTarget_shouldKeepPlaceholders() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions { clear_state: true, ..Default::default() });

    let (xml, _) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(
        r#"<target state="translated">Bienvenue <x id="INTERPOLATION" equiv-text="{{ name }}"/>!</target>"#
    ));
}

/// Test that final targets, placeholder-only and plural units never reach the translator
#[tokio::test]
async fn test_translate_v1_shouldOnlyDispatchTranslatableText() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions::default());

    let (xml, summary) = translate(&service, V1_MESSAGES).await;

    let mut texts: Vec<_> = translator.calls().into_iter().map(|call| call.text).collect();
    texts.sort();
    assert_eq!(texts, vec!["Hello".to_string(), "Welcome ".to_string()]);
    assert_eq!(summary.translated, 2);

    assert!(xml.contains(r#"<target state="final">Au revoir</target>"#));
    assert!(xml.contains(r#"<trans-unit id="farewell" datatype="html">"#));
    assert!(xml.contains("<source>{{ count }}</source>\n        <target>{{ count }}</target>"));
    assert_eq!(summary.selection.locked, 1);
    assert_eq!(summary.selection.placeholders_only, 1);
    assert_eq!(summary.selection.plural, 1);
}

/// Test that states are left alone unless clearing is requested
#[tokio::test]
async fn test_translate_v1_withoutClearState_shouldKeepStates() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions::default());

    let (xml, _) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(r#"<target state="new">Bienvenue "#));
    assert!(xml.contains("<target>Bonjour</target>"));
    assert!(!xml.contains("needs-translation"));
}

/// Test that plural units are flagged for a human when clearing states
#[tokio::test]
async fn test_translate_v1_withPluralAndClearState_shouldFlagNeedsTranslation() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions { clear_state: true, ..Default::default() });

    let (xml, _) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(r#"<target state="needs-translation">{VAR_PLURAL, plural, =0 {no items}"#));
}

/// Test that the file element is stamped with language and date
#[tokio::test]
async fn test_translate_v1_shouldStampFileElement() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions::default());

    let (xml, _) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(
        r#"<file source-language="en" datatype="plaintext" original="ng2.template" target-language="fr" date="2024-05-01T12:00:00.000Z">"#
    ));
}

/// Test that skip mode writes the boilerplate without any request
#[tokio::test]
async fn test_translate_inSkipMode_shouldWriteBoilerplate() {
    let translator = MockTranslator::echo();
    let service = mock_service(
        &translator,
        SelectionOptions { skip: true, clear_state: true, ..Default::default() },
    );

    let (xml, summary) = translate(&service, V1_MESSAGES).await;

    assert_eq!(translator.call_count(), 0);
    assert!(xml.contains(&format!("<target state=\"translated\">{}</target>", BOILERPLATE)));
    assert_eq!(summary.selection.boilerplate_leaves, 2);
    assert_eq!(summary.messages(), 2);
}

/// Test that provider failures leave a visible marker and do not abort the run
#[tokio::test]
async fn test_translate_withFailingTranslator_shouldWriteFailureMarker() {
    let translator = MockTranslator::failing();
    let service = mock_service(&translator, SelectionOptions::default());

    let (xml, summary) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(&format!("<target>{}</target>", FAILURE_MARKER)));
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.messages(), 0);
    assert!(xml.contains(r#"<target state="final">Au revoir</target>"#));
}

/// Test that final 1.x units can be marked as approved
#[tokio::test]
async fn test_translate_v1_withAddApproved_shouldMarkFinalUnits() {
    let translator = english_to_french();
    let service = mock_service(
        &translator,
        SelectionOptions { add_approved_to_state_final: true, ..Default::default() },
    );

    let (xml, summary) = translate(&service, V1_MESSAGES).await;

    assert!(xml.contains(r#"<trans-unit id="farewell" datatype="html" approved="yes">"#));
    assert!(xml.contains(r#"<trans-unit id="greeting" datatype="html">"#));
    assert_eq!(summary.selection.approved_marked, 1);
}

/// Test that a 2.0 segment without target gets one inside the segment
#[tokio::test]
async fn test_translate_v2_withMissingTarget_shouldFillSegment() {
    let translator = english_to_french();
    let service = mock_service(&translator, SelectionOptions { clear_state: true, ..Default::default() });

    let (xml, summary) = translate(&service, V2_MESSAGES).await;

    assert!(xml.contains(
        "<segment state=\"translated\">\n        <source>Cancel</source>\n        <target>Annuler</target>\n      </segment>"
    ));
    assert!(xml.contains("<segment state=\"final\">\n        <source>Save</source>\n        <target>Enregistrer</target>"));
    assert!(xml.contains(r#"srcLang="en" trgLang="fr" date="2024-05-01T12:00:00.000Z">"#));
    assert_eq!(summary.version, XliffVersion::V2);
    assert_eq!(translator.call_count(), 1);
}

/// Test that a fully final document only changes by its stamp
#[tokio::test]
async fn test_translate_v2_allFinal_shouldOnlyAddStamp() {
    let translator = MockTranslator::echo();
    let service = mock_service(&translator, SelectionOptions { clear_state: true, ..Default::default() });

    let (xml, summary) = translate(&service, V2_ALL_FINAL).await;

    let expected = V2_ALL_FINAL.replace(
        r#"trgLang="fr">"#,
        r#"trgLang="fr" date="2024-05-01T12:00:00.000Z">"#,
    );
    assert_eq!(xml, expected);
    assert_eq!(translator.call_count(), 0);
    assert_eq!(summary.messages(), 0);
}

/// Test that locked units keep their entities and quoting while siblings are translated
#[tokio::test]
async fn test_translate_v2_withEscapedFinalUnit_shouldKeepItByteForByte() {
    let translator = MockTranslator::dictionary([("Tom & Jerry", "Tom et Jerry")]);
    let service = mock_service(&translator, SelectionOptions::default());

    let (xml, summary) = translate(&service, V2_ESCAPED_FINAL).await;

    let start = V2_ESCAPED_FINAL.find("<unit id='u1'>").unwrap();
    let end = start + V2_ESCAPED_FINAL[start..].find("</unit>").unwrap();
    let locked_unit = &V2_ESCAPED_FINAL[start..end];
    assert!(xml.contains(locked_unit), "locked unit changed:\n{}", xml);
    assert!(xml.contains("<file id='f1'>"));
    assert!(xml.contains("<source>Tom &amp; Jerry</source>\n        <target>Tom et Jerry</target>"));
    assert_eq!(summary.translated, 1);
    assert_eq!(summary.selection.locked, 1);
}

/// Test that concurrency and request spacing hold across a whole document
#[tokio::test]
async fn test_translate_withManyUnits_shouldRespectDispatchLimits() {
    let units: String = (0..6)
        .map(|i| format!(r#"<trans-unit id="u{i}"><source>Message {i}</source></trans-unit>"#))
        .collect();
    let xml = format!(r#"<xliff version="1.2"><file source-language="en"><body>{units}</body></file></xliff>"#);

    let translator = MockTranslator::echo().with_delay(Duration::from_millis(60));
    let options = TranslationOptions {
        pair: LanguagePair::new("en", "fr"),
        target_language: "fr".to_string(),
        dispatch: DispatchSettings::new(2, Duration::from_millis(20)),
        route: ProxyRoute::Direct,
        selection: SelectionOptions::default(),
    };
    let service = TranslationService::new(Arc::new(translator.clone()), options, PlaceholderFilter::new());

    let mut progress = Vec::new();
    let mut document = XliffDocument::parse(&xml).unwrap();
    let summary = service
        .translate_document_with_stamp(&mut document, &test_stamp(), |done, total| progress.push((done, total)))
        .await;

    assert_eq!(summary.translated, 6);
    assert!(translator.peak_concurrency() <= 2);
    let calls = translator.calls();
    for pair in calls.windows(2) {
        let gap = pair[1].started_at.duration_since(pair[0].started_at);
        assert!(gap >= Duration::from_millis(15), "requests started {:?} apart", gap);
    }
    assert_eq!(progress.last(), Some(&(6, 6)));
    assert!(document.to_xml().unwrap().contains("<target>[fr] Message 5</target>"));
}

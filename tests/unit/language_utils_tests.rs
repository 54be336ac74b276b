/*!
 * Tests for ISO language code utilities
 */

use xlf_auto_translate::language_utils::{
    LanguageCodeType, get_language_name, is_auto_detect, language_codes_match,
    normalize_to_part2t, split_region, to_provider_code, validate_language_code,
};

/// Test validation of the supported code forms
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCodeType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code("pt-BR").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zh_Hans").unwrap(), LanguageCodeType::Part1);
}

/// Test rejection of invalid codes
#[test]
fn test_validate_language_code_withInvalidCodes_shouldFail() {
    assert!(validate_language_code("").is_err());
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("english").is_err());
    assert!(validate_language_code("en-").is_err());
    assert!(validate_language_code("en-toolong").is_err());
}

/// Test region splitting
#[test]
fn test_split_region_shouldNormalizeCase() {
    assert_eq!(split_region("ZH-cn"), ("zh".to_string(), Some("CN".to_string())));
    assert_eq!(split_region(" fr "), ("fr".to_string(), None));
}

/// Test provider codes
#[test]
fn test_to_provider_code_shouldPreferTwoLetterCodes() {
    assert_eq!(to_provider_code("fre").unwrap(), "fr");
    assert_eq!(to_provider_code("deu").unwrap(), "de");
    assert_eq!(to_provider_code("zh-cn").unwrap(), "zh-CN");
    assert_eq!(to_provider_code("AUTO").unwrap(), "auto");
    assert!(to_provider_code("zz").is_err());
}

/// Test normalization to ISO 639-2/T
#[test]
fn test_normalize_to_part2t_shouldIgnoreRegion() {
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("dut").unwrap(), "nld");
    assert_eq!(normalize_to_part2t("pt-BR").unwrap(), "por");
}

/// Test language matching across code forms
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldReturnTrue() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("de", "deu"));
    assert!(language_codes_match("pt-BR", "pt"));
    assert!(!language_codes_match("fr", "de"));
    assert!(!language_codes_match("fr", "invalid"));
}

/// Test language names
#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("ger").unwrap(), "German");
    assert!(get_language_name("auto").is_ok());
    assert!(is_auto_detect(" Auto "));
}

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module validates and normalizes the language codes found in XLIFF
/// documents and on the command line: ISO 639-1 (2-letter) and ISO 639-2
/// (3-letter) codes, optionally followed by a region subtag (`zh-CN`,
/// `pt_BR`).
/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Source language value that asks the provider to detect the language
pub const AUTO_DETECT: &str = "auto";

/// ISO 639-2/B codes that differ from their ISO 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    PART2B_TO_PART2T
        .iter()
        .find(|(part2b, _)| *part2b == code)
        .map(|(_, part2t)| *part2t)
}

/// Split `zh-CN` / `pt_BR` into a lowercase primary code and an uppercase region
pub fn split_region(code: &str) -> (String, Option<String>) {
    let code = code.trim();
    match code.split_once(['-', '_']) {
        Some((primary, region)) => (primary.to_lowercase(), Some(region.to_uppercase())),
        None => (code.to_lowercase(), None),
    }
}

/// True for the `auto` source language
pub fn is_auto_detect(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

fn lookup(primary: &str) -> Option<(Language, LanguageCodeType)> {
    match primary.len() {
        2 => Language::from_639_1(primary).map(|lang| (lang, LanguageCodeType::Part1)),
        3 => match part2b_to_part2t(primary) {
            Some(part2t) => Language::from_639_3(part2t).map(|lang| (lang, LanguageCodeType::Part2B)),
            None => Language::from_639_3(primary).map(|lang| (lang, LanguageCodeType::Part2T)),
        },
        _ => None,
    }
}

fn is_valid_region(region: &str) -> bool {
    match region.len() {
        2 => region.chars().all(|c| c.is_ascii_alphabetic()),
        3 => region.chars().all(|c| c.is_ascii_digit()),
        4 => region.chars().all(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-2 code,
/// optionally with a region (or script) subtag
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let (primary, region) = split_region(code);

    if let Some(region) = region.as_deref() {
        if !is_valid_region(region) {
            return Err(anyhow!("Invalid region subtag in language code: {}", code));
        }
    }

    lookup(&primary)
        .map(|(_, code_type)| code_type)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-2/T (3-letter) format, dropping any region
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let (primary, _) = split_region(code);
    lookup(&primary)
        .map(|(lang, _)| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Code to send to the translation provider
///
/// The provider expects ISO 639-1 codes where one exists and keeps region
/// subtags (`zh-CN`). `auto` is passed through.
pub fn to_provider_code(code: &str) -> Result<String> {
    if is_auto_detect(code) {
        return Ok(AUTO_DETECT.to_string());
    }

    let (primary, region) = split_region(code);
    let (lang, _) = lookup(&primary).ok_or_else(|| anyhow!("Invalid language code: {}", code))?;
    let base = lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string());

    Ok(match region {
        Some(region) => format!("{}-{}", base, region),
        None => base,
    })
}

/// Check if two language codes match (represent the same language)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(normalized1), Ok(normalized2)) => normalized1 == normalized2,
        _ => false,
    }
}

/// Get the language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    if is_auto_detect(code) {
        return Ok("auto-detected language".to_string());
    }
    let normalized = normalize_to_part2t(code)?;
    let lang = Language::from_639_3(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}

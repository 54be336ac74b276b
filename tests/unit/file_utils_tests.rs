/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::path::Path;
use xlf_auto_translate::file_utils::{FileManager, FileType};

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "messages.xlf", "<xliff/>")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.xlf"));
}

/// Test that generate_output_path inserts the target language
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let output_path = FileManager::generate_output_path(Path::new("/tmp/i18n/messages.xlf"), "fr");
    assert_eq!(output_path, Path::new("/tmp/i18n/messages.fr.xlf"));

    let output_path = FileManager::generate_output_path(Path::new("messages.xliff"), "zh-CN");
    assert_eq!(output_path, Path::new("messages.zh-CN.xliff"));
}

/// Test that a missing extension falls back to xlf
#[test]
fn test_generate_output_path_withoutExtension_shouldUseXlf() {
    let output_path = FileManager::generate_output_path(Path::new("/data/messages"), "de");
    assert_eq!(output_path, Path::new("/data/messages.de.xlf"));
}

/// Test writing creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateDirectories() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out").join("messages.fr.xlf");

    FileManager::write_to_file(&path, "<xliff/>")?;

    assert_eq!(FileManager::read_to_string(&path)?, "<xliff/>");
    Ok(())
}

/// Test XLIFF detection by extension and by content
#[test]
fn test_detect_file_type_shouldRecognizeXliff() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let by_extension = common::create_test_file(temp_dir.path(), "a.xlf", "")?;
    let by_content = common::create_test_file(
        temp_dir.path(),
        "messages.txt",
        r#"<?xml version="1.0"?><xliff version="2.0"></xliff>"#,
    )?;
    let prefixed = common::create_test_file(temp_dir.path(), "b.xml", "<x:xliff xmlns:x=\"urn\"/>")?;
    let other = common::create_test_file(temp_dir.path(), "notes.txt", "just text")?;

    assert_eq!(FileManager::detect_file_type(&by_extension)?, FileType::Xliff);
    assert_eq!(FileManager::detect_file_type(&by_content)?, FileType::Xliff);
    assert_eq!(FileManager::detect_file_type(&prefixed)?, FileType::Xliff);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.xlf")).is_err());
    Ok(())
}

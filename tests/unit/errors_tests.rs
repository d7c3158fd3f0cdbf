/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use penerjemah::errors::{
    AppError, ModelLoadError, TranslationError, ValidationError,
};

#[test]
fn test_validationError_emptyText_shouldDisplayCorrectly() {
    let error = ValidationError::EmptyText;
    let display = format!("{}", error);
    assert!(display.contains("Nothing to translate"));
}

#[test]
fn test_validationError_tooLong_shouldDisplayLengthAndLimit() {
    let error = ValidationError::TooLong {
        length: 5001,
        max: 5000,
    };
    let display = format!("{}", error);
    assert!(display.contains("5001"));
    assert!(display.contains("5000"));
}

#[test]
fn test_modelLoadError_missingArtifact_shouldDisplayPath() {
    let error = ModelLoadError::MissingArtifact(PathBuf::from("models/indonesia-minangkabau"));
    let display = format!("{}", error);
    assert!(display.contains("Missing model artifact"));
    assert!(display.contains("indonesia-minangkabau"));
}

#[test]
fn test_modelLoadError_checksumMismatch_shouldDisplayBothSums() {
    let error = ModelLoadError::ChecksumMismatch {
        path: PathBuf::from("encoder_model.onnx"),
        expected: "abc123".to_string(),
        actual: "def456".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("abc123"));
    assert!(display.contains("def456"));
}

#[test]
fn test_translationError_timeout_shouldDisplaySeconds() {
    let error = TranslationError::Timeout(30);
    let display = format!("{}", error);
    assert!(display.contains("timed out"));
    assert!(display.contains("30"));
}

#[test]
fn test_appError_fromValidationError_shouldWrapCorrectly() {
    let app_error: AppError = ValidationError::EmptyText.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Validation error"));
    assert!(matches!(app_error, AppError::Validation(_)));
}

#[test]
fn test_appError_fromModelLoadError_shouldWrapCorrectly() {
    let load_error = ModelLoadError::Backend("no such model".to_string());
    let app_error: AppError = load_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Model load error"));
    assert!(matches!(app_error, AppError::ModelLoad(_)));
}

#[test]
fn test_appError_fromTranslationError_shouldWrapCorrectly() {
    let translation_error = TranslationError::Decode("bad logits".to_string());
    let app_error: AppError = translation_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Translation error"));
    assert!(matches!(app_error, AppError::Translation(_)));
}

#[test]
fn test_appError_variants_shouldStayDistinct() {
    // The three outcomes must remain independently matchable
    let errors: Vec<AppError> = vec![
        ValidationError::EmptyText.into(),
        ModelLoadError::Backend("x".to_string()).into(),
        TranslationError::Decode("y".to_string()).into(),
    ];

    let validation = errors
        .iter()
        .filter(|e| matches!(e, AppError::Validation(_)))
        .count();
    let load = errors
        .iter()
        .filter(|e| matches!(e, AppError::ModelLoad(_)))
        .count();
    let translation = errors
        .iter()
        .filter(|e| matches!(e, AppError::Translation(_)))
        .count();

    assert_eq!((validation, load, translation), (1, 1, 1));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_modelLoadError_debug_shouldBeImplemented() {
    let error = ModelLoadError::Tokenizer("bad vocab".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("Tokenizer"));
}

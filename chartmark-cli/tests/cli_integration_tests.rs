//! Integration tests for the Chartmark CLI
//!
//! These tests verify CLI building blocks including:
//! - Configuration loading through the CLI context
//! - Concurrent input loading
//! - Rendering in every output format
//! - Error handling for missing files and unknown entities

use chartmark::ChartmarkError;
use chartmark::config::{RenderConfig, RenderFormat, SegmentationStrategy};
use chartmark_cli::args::{CheckArgs, EntityArgs};
use chartmark_cli::context::{ChartmarkCliContext, load_document, load_entities};
use chartmark_cli::handlers::segment::render_segments;
use chartmark_cli::handlers::{handle_check_command, handle_entity_command};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TEXT: &str = "Denies fever. Sharp pain in the left knee.";

const ENTITIES: &str = r#"{
  "Entities": [
    {"Id": 1, "Text": "fever", "Category": "MEDICAL_CONDITION", "BeginOffset": 7, "EndOffset": 12,
     "Traits": [{"Name": "SYMPTOM", "Score": 0.8}, {"Name": "NEGATION", "Score": 0.9}]},
    {"Id": 2, "Text": "Sharp pain", "Category": "MEDICAL_CONDITION", "BeginOffset": 14, "EndOffset": 24,
     "Traits": [{"Name": "SYMPTOM", "Score": 0.92}],
     "Attributes": [{"Type": "QUALITY", "BeginOffset": 14, "EndOffset": 19, "Text": "Sharp"},
                    {"Type": "DIRECTION", "BeginOffset": 32, "EndOffset": 36, "Text": "left"}],
     "ICD10CMConcepts": [{"Code": "M25.562", "Description": "Pain in left knee", "Score": 0.77}]},
    {"Id": 3, "Text": "knee", "Category": "ANATOMY", "BeginOffset": 37, "EndOffset": 99}
  ]
}"#;

/// Helper to write the test document into an isolated directory
fn write_document(dir: &TempDir) -> (PathBuf, PathBuf) {
    let text_path = dir.path().join("note.txt");
    let entities_path = dir.path().join("note.json");
    fs::write(&text_path, TEXT).expect("Failed to write text");
    fs::write(&entities_path, ENTITIES).expect("Failed to write entities");
    (text_path, entities_path)
}

#[tokio::test]
async fn test_load_document() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (text_path, entities_path) = write_document(&temp_dir);

    let (text, document) = load_document(&text_path, &entities_path).await.unwrap();
    assert_eq!(text, TEXT);
    assert_eq!(document.entities.len(), 3);
    assert_eq!(document.entities[1].concept_suggestions[0].code, "M25.562");
}

#[tokio::test]
async fn test_missing_input_is_io_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.json");

    let result = load_entities(&missing).await;
    match result {
        Err(ChartmarkError::Io(e)) => assert!(e.to_string().contains("missing.json")),
        other => panic!("expected IO error, got {:?}", other.map(|d| d.entities.len())),
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_entities(&path).await, Err(ChartmarkError::Parse(_))));
}

#[test]
fn test_context_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("chartmark.toml");
    fs::write(
        &config_path,
        r#"
[segmentation]
strategy = "per_character"
default_filter = "SYMPTOM"

[render]
format = "markup"
"#,
    )
    .unwrap();

    let ctx = ChartmarkCliContext::new(Some(config_path)).unwrap();
    assert_eq!(ctx.config.segmentation.strategy, SegmentationStrategy::PerCharacter);
    assert_eq!(ctx.config.segmentation.default_filter, "SYMPTOM");
    assert_eq!(ctx.config.render.format, RenderFormat::Markup);
    assert_eq!(
        ctx.highlighter.config().strategy,
        SegmentationStrategy::PerCharacter
    );
}

#[test]
fn test_context_rejects_missing_config_file() {
    let result = ChartmarkCliContext::new(Some(PathBuf::from("/nonexistent/chartmark.toml")));
    assert!(matches!(result, Err(ChartmarkError::Configuration(_))));
}

#[tokio::test]
async fn test_render_formats() {
    colored::control::set_override(false);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (text_path, entities_path) = write_document(&temp_dir);
    let (text, document) = load_document(&text_path, &entities_path).await.unwrap();

    let ctx = ChartmarkCliContext::from_config(Default::default());
    let segments = ctx.highlighter.highlight(&text, &document.entities, "all").unwrap();
    let config = RenderConfig::default();

    let markup = render_segments(&segments, RenderFormat::Markup, &config).unwrap();
    assert_eq!(
        markup,
        "Denies [fever]{SYMPTOM}. [Sharp]{SYMPTOM,attr:Quality}[ pain]{SYMPTOM} in the [left]{attr:Direction} knee."
    );

    let html = render_segments(&segments, RenderFormat::Html, &config).unwrap();
    assert_eq!(html.matches("<span").count(), 4);
    assert!(html.contains(r#"title="Attributes: Direction""#));

    let json = render_segments(&segments, RenderFormat::Json, &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value.as_array().unwrap().len(), segments.len());

    let terminal = render_segments(&segments, RenderFormat::Terminal, &config).unwrap();
    assert_eq!(terminal, TEXT);
}

#[tokio::test]
async fn test_entity_command_reports_unknown_id() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (_, entities_path) = write_document(&temp_dir);

    let found = handle_entity_command(
        EntityArgs {
            id: "2".to_string(),
            entities: entities_path.clone(),
            concepts: 5,
        },
        "json",
    )
    .await;
    assert!(found.is_ok());

    let missing = handle_entity_command(
        EntityArgs {
            id: "42".to_string(),
            entities: entities_path,
            concepts: 5,
        },
        "json",
    )
    .await;
    assert!(matches!(missing, Err(ChartmarkError::EntityNotFound { .. })));
}

#[tokio::test]
async fn test_check_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (text_path, entities_path) = write_document(&temp_dir);

    let (text, document) = load_document(&text_path, &entities_path).await.unwrap();
    let report = document.validate(&text);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].entity_id, "3");

    let result = handle_check_command(
        CheckArgs {
            text: text_path,
            entities: entities_path,
        },
        "table",
    )
    .await;
    assert!(result.is_ok());
}

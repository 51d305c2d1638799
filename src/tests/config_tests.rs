use std::fs;

use crate::errors::{ ErrorClass, FactCheckError, RecoverableError };
use crate::implementations::config::{ render, CheckerConfig, ConfigError };

#[test]
fn test_default_config_has_every_template() {
    let config = CheckerConfig::default();
    for name in ["refine", "extract", "verify", "summarize"] {
        assert!(config.template(name).is_ok(), "missing template {}", name);
    }
    assert_eq!(config.pipeline.max_links, 10);
    assert_eq!(config.refine_temperature, Some(0.3));
}

#[test]
fn test_render_replaces_every_placeholder() {
    let rendered = render("{{a}} and {{b}} and {{a}}", &[("a", "x"), ("b", "y")]);
    assert_eq!(rendered, "x and y and x");
}

#[test]
fn test_missing_template_is_an_error() {
    let config = CheckerConfig::default();
    match config.template("nope") {
        Err(ConfigError::TemplateNotFound(name)) => assert_eq!(name, "nope"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_from_file_fills_in_defaults() {
    let path = std::env::temp_dir().join(format!("factcheck-config-{}.yaml", std::process::id()));
    fs::write(
        &path,
        "llm_api:\n  api_key: test-key\n  model: custom-model\npipeline:\n  max_links: 3\n  concurrency: 2\n  chunk_token_threshold: 500\n  overlap_rate: 0.2\n  request_timeout_secs: 30\n"
    ).unwrap();

    let config = CheckerConfig::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.model(), "custom-model");
    assert_eq!(config.extraction_model(), "custom-model");
    assert_eq!(config.get_api_key().unwrap(), "test-key");
    assert_eq!(config.pipeline.max_links, 3);
    assert!(config.pipeline.deadline().is_none());
    assert!(config.template("verify").is_ok());
    assert_eq!(config.feed.hl, "en-IN");
}

#[test]
fn test_error_classes() {
    let transient = FactCheckError::ExternalService {
        service: "HTTP".to_string(),
        message: "503".to_string(),
    };
    assert_eq!(transient.class(), ErrorClass::TransientExternalFailure);
    assert!(transient.is_recoverable());

    let malformed = FactCheckError::MalformedOutput("no json".to_string());
    assert_eq!(malformed.class(), ErrorClass::MalformedModelOutput);

    let fatal = FactCheckError::Config(ConfigError::MissingApiKey("GROQ_API_KEY".to_string()));
    assert_eq!(fatal.class(), ErrorClass::FatalProcessFailure);
    assert!(!fatal.is_recoverable());
    assert!(fatal.recovery_strategy().is_none());
}

#[test]
fn test_partial_pipeline_section_keeps_other_defaults() {
    let path = std::env::temp_dir().join(format!("factcheck-partial-{}.yaml", std::process::id()));
    fs::write(&path, "pipeline:\n  concurrency: 8\nfeed:\n  hl: en-US\n").unwrap();

    let config = CheckerConfig::from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.pipeline.concurrency, 8);
    assert_eq!(config.pipeline.max_links, 10);
    assert_eq!(config.pipeline.chunk_token_threshold, 1200);
    assert_eq!(config.pipeline.request_timeout_secs, 120);
    assert_eq!(config.feed.hl, "en-US");
    assert_eq!(config.feed.endpoint, "https://news.google.com/rss/search");
}

#[test]
fn test_no_evidence_class_has_a_strategy() {
    assert_eq!(
        ErrorClass::NoEvidenceFound.recovery_strategy(),
        Some("verify against an empty evidence set")
    );
    assert!(ErrorClass::FatalProcessFailure.recovery_strategy().is_none());
}

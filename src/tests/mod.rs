mod config_tests;
mod content_extractor_tests;

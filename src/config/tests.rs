// Author: Dustin Pilgrim
// License: MIT

#[cfg(test)]
use super::*;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

const SAMPLE: &str = r#"
# Service config
{server} Main listener
    host = "localhost"
    port = 8080
    debug = True
    ratio = 0.5
    border = "Rounded"
    allowed = [
        "auth",
        "logging",
    ]
    limits = {"cpu": 2, "memory": 512}
    pair = (1, "two")
    max-connections = 64

{db.primary}
    url = "postgres://db"
    retry.count = 3
"#;

#[test]
fn test_config_from_string() {
    let config = ScfConfig::from_str(SAMPLE).expect("Failed to parse config");

    let host: String = config.get("server.host").expect("Failed to get host");
    assert_eq!(host, "localhost");

    let port: u16 = config.get("server.port").expect("Failed to get port");
    assert_eq!(port, 8080);

    let debug: bool = config.get("server.debug").expect("Failed to get debug");
    assert!(debug);

    let ratio: f64 = config.get("server.ratio").expect("Failed to get ratio");
    assert_eq!(ratio, 0.5);

    // Integers widen to floats.
    let port_f: f64 = config.get("server.port").expect("Failed to get port as float");
    assert_eq!(port_f, 8080.0);

    let allowed: Vec<String> = config.get("server.allowed").expect("Failed to get allowed");
    assert_eq!(allowed, vec!["auth", "logging"]);

    let limits: HashMap<String, u32> = config.get("server.limits").expect("Failed to get limits");
    assert_eq!(limits.get("memory"), Some(&512));

    assert!(config.has("server.host"));
    assert!(!config.has("server.nonexistent"));
    assert!(config.diagnostics().is_empty());
}

#[test]
fn test_nested_access_into_values() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();

    let second: String = config.get("server.allowed.1").unwrap();
    assert_eq!(second, "logging");

    let cpu: i64 = config.get("server.limits.cpu").unwrap();
    assert_eq!(cpu, 2);

    let two: String = config.get("server.pair.1").unwrap();
    assert_eq!(two, "two");

    assert!(!config.has("server.allowed.9"));
}

#[test]
fn test_dotted_section_and_key_names() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();

    let url: String = config.get("db.primary.url").unwrap();
    assert_eq!(url, "postgres://db");

    let retries: u32 = config.get("db.primary.retry.count").unwrap();
    assert_eq!(retries, 3);
}

#[test]
fn test_snake_and_kebab_lookup() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();
    let max: usize = config.get("server.max_connections").expect("kebab key via snake path");
    assert_eq!(max, 64);
}

#[test]
fn test_order_preservation() {
    let config = ScfConfig::from_str("{b}\n{a}\nthird = 3\nfirst = 1\nsecond = 2").unwrap();
    assert_eq!(config.sections(), vec!["b", "a"]);
    assert_eq!(config.get_keys("a").unwrap(), vec!["third", "first", "second"]);
    assert!(matches!(config.get_keys("missing"), Err(ScfError::NotFound { .. })));
}

#[test]
fn test_optional_and_default() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();

    let missing: Option<String> = config.get_optional("server.missing").unwrap();
    assert!(missing.is_none());

    let present: Option<u16> = config.get_optional("server.port").unwrap();
    assert_eq!(present, Some(8080));

    // A type mismatch is still an error.
    assert!(config.get_optional::<bool>("server.port").is_err());

    assert_eq!(config.get_or("server.timeout", 30u64), 30);
    assert_eq!(config.get_or("server.port", 1u16), 8080);
}

#[test]
fn test_type_error_has_line_info() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();
    match config.get::<u16>("server.host") {
        Err(ScfError::TypeError { line, message, .. }) => {
            assert_eq!(line, 4);
            assert!(message.contains("host = \"localhost\""));
        }
        other => panic!("Expected TypeError, got {:?}", other),
    }
}

#[test]
fn test_integer_out_of_range() {
    let config = ScfConfig::from_str("{s}\nbig = 70000\nneg = -1").unwrap();
    assert!(matches!(config.get::<u16>("s.big"), Err(ScfError::TypeError { code: Some(406), .. })));
    assert!(matches!(config.get::<u64>("s.neg"), Err(ScfError::TypeError { code: Some(406), .. })));
    assert_eq!(config.get::<i32>("s.neg").unwrap(), -1);
}

#[test]
fn test_string_enum_validation() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();

    let border = config.get_string_enum("server.border", &["plain", "rounded", "thick"]);
    assert_eq!(border.unwrap(), "Rounded");

    match config.get_string_enum("server.border", &["plain"]) {
        Err(ScfError::ValidationError { line, code, .. }) => {
            assert_eq!(line, 8);
            assert_eq!(code, Some(451));
        }
        other => panic!("Expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_get_validated() {
    let config = ScfConfig::from_str(SAMPLE).unwrap();

    let port: u16 = config
        .get_validated("server.port", |p: &u16| *p >= 1024, ">= 1024")
        .unwrap();
    assert_eq!(port, 8080);

    let result = config.get_validated("server.port", |p: &u16| *p < 1024, "< 1024");
    assert!(matches!(result, Err(ScfError::ValidationError { code: Some(450), .. })));
}

#[test]
fn test_duplicates_are_collected() {
    let config = ScfConfig::from_str("{s}\nk = 1\nk = 2").unwrap();
    assert_eq!(config.diagnostics().len(), 1);
    assert_eq!(config.get::<i64>("s.k").unwrap(), 2);

    let strict = ScfConfig::from_str_with("{s}\nk = 1\nk = 2", &ParseOptions::strict());
    assert!(matches!(strict, Err(ScfError::DuplicateKey { .. })));
}

#[test]
fn test_from_file_resolves_relative_imports() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("shared.scf"), "{shared}\ntoken = 'abc'").unwrap();
    fs::write(dir.path().join("main.scf"), "<shared.scf>\n{app}\nname = 'demo'").unwrap();

    let config = ScfConfig::from_file(dir.path().join("main.scf")).expect("Failed to load config");

    let token: String = config.get("shared.token").unwrap();
    assert_eq!(token, "abc");
    let name: String = config.get("app.name").unwrap();
    assert_eq!(name, "demo");
    assert!(config.raw_content().ends_with("{shared}\ntoken = 'abc'"));
}

#[test]
fn test_from_file_with_fallback() {
    let dir = tempdir().unwrap();
    let primary = dir.path().join("missing.scf");
    let fallback = dir.path().join("fallback.scf");
    fs::write(&fallback, "{s}\nsource = 'fallback'").unwrap();

    let config = ScfConfig::from_file_with_fallback(&primary, &fallback).unwrap();
    assert_eq!(config.get::<String>("s.source").unwrap(), "fallback");

    let none = dir.path().join("also-missing.scf");
    match ScfConfig::from_file_with_fallback(&primary, &none) {
        Err(ScfError::FileError { path, .. }) => {
            assert!(path.contains("missing.scf"));
            assert!(path.contains("fallback: "));
        }
        other => panic!("Expected FileError, got {:?}", other),
    }
}

#[test]
fn test_fallback_not_used_for_parse_errors() {
    let dir = tempdir().unwrap();
    let primary = dir.path().join("broken.scf");
    let fallback = dir.path().join("fallback.scf");
    fs::write(&primary, "k = 1").unwrap();
    fs::write(&fallback, "{s}\nk = 1").unwrap();

    let result = ScfConfig::from_file_with_fallback(&primary, &fallback);
    assert!(matches!(result, Err(ScfError::OutOfSectionValue { .. })));
}

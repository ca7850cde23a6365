//! Integration tests for layered TrictConfig loading.
//!
//! Precedence: defaults < TOML text (`[trict]` table wins over top-level keys) < TRICT_* env vars.

mod common;

use rstest::rstest;
use trict::{Separator, Trict, TrictConfig, TrictError, DEFAULT_MAX_DEPTH};

#[ctor::ctor]
fn init() {
    common::init_test_setup();
}

// ============================================================
// TOML layer
// ============================================================

#[test]
fn given_empty_toml_when_loading_then_defaults() {
    let config = TrictConfig::from_toml_str("").unwrap();
    assert_eq!(config, TrictConfig::default());
}

#[test]
fn given_trict_table_when_loading_then_values_applied() {
    let config = TrictConfig::from_toml_str(
        r#"
[trict]
separator = "/"
strict_get = false
max_depth = 16
"#,
    )
    .unwrap();
    assert_eq!(config.separator, Separator::Str("/".into()));
    assert!(!config.strict_get);
    assert_eq!(config.max_depth, 16);
}

#[test]
fn given_top_level_keys_and_table_when_loading_then_table_wins() {
    let config = TrictConfig::from_toml_str(
        r#"
separator = "::"
strict_get = false

[trict]
separator = "/"
"#,
    )
    .unwrap();
    assert_eq!(config.separator, Separator::Str("/".into()));
    assert!(!config.strict_get, "top-level value kept where table is silent");
    assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
}

#[test]
fn given_empty_separator_when_loading_then_disabled() {
    let config = TrictConfig::from_toml_str(r#"separator = """#).unwrap();
    assert_eq!(config.separator, Separator::Disabled);
}

#[rstest]
#[case("strict_get = \"maybe\"")]
#[case("max_depth = -1")]
#[case("[trict")]
fn given_malformed_toml_when_loading_then_config_error(#[case] content: &str) {
    assert!(matches!(
        TrictConfig::from_toml_str(content),
        Err(TrictError::Config { .. })
    ));
}

#[test]
fn given_loaded_config_when_constructing_trict_then_applied() {
    let config = TrictConfig::from_toml_str(
        r#"
[trict]
separator = "/"
strict_get = false
"#,
    )
    .unwrap();
    let tr: Trict<i64> = Trict::from_flat_dict_with_config([("a/b", 1i64)], config).unwrap();
    assert_eq!(tr.get_leaf("a/b").unwrap(), Some(&1));
    assert_eq!(tr.get("a/missing").unwrap(), None);
}

// ============================================================
// Serde
// ============================================================

#[test]
fn given_config_when_serialized_to_toml_then_disabled_separator_is_empty_string() {
    let config = TrictConfig::default().with_separator(Separator::Disabled);
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("separator = \"\""), "{}", text);
    let back: TrictConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

// ============================================================
// Environment layer
// ============================================================

/// The only test touching TRICT_* variables, so no other test observes them.
#[test]
fn given_env_vars_when_loading_then_override_toml() {
    std::env::set_var("TRICT_SEPARATOR", "|");
    std::env::set_var("TRICT_MAX_DEPTH", "42");

    let result = TrictConfig::load(Some("[trict]\nseparator = \"/\"\nstrict_get = false\n"));

    std::env::remove_var("TRICT_SEPARATOR");
    std::env::remove_var("TRICT_MAX_DEPTH");

    let config = result.unwrap();
    assert_eq!(config.separator, Separator::Str("|".into()));
    assert_eq!(config.max_depth, 42);
    assert!(!config.strict_get);
}

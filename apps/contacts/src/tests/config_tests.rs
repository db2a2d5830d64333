use super::{apply_env, apply_file, Settings};

use std::collections::HashMap;

use client_core::DEFAULT_ENDPOINT;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.api_endpoint, DEFAULT_ENDPOINT);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_overrides_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
api_endpoint = "https://contacts.internal/api/Contatos"
log_filter = "debug"
"#,
    )
    .expect("valid file");
    assert_eq!(
        settings.api_endpoint,
        "https://contacts.internal/api/Contatos"
    );
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn malformed_file_is_rejected_without_partial_apply() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "api_endpoint = [1, 2").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_short_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("CONTACTS_API_ENDPOINT", "http://a/api/Contatos"),
            ("APP__API_ENDPOINT", "http://b/api/Contatos"),
            ("CONTACTS_LOG", "warn"),
        ]),
    );
    assert_eq!(settings.api_endpoint, "http://b/api/Contatos");
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn env_overrides_file() {
    let mut settings = Settings::default();
    apply_file(&mut settings, r#"api_endpoint = "http://file/api/Contatos""#)
        .expect("valid file");
    apply_env(
        &mut settings,
        env_from(&[("CONTACTS_API_ENDPOINT", "http://env/api/Contatos")]),
    );
    assert_eq!(settings.api_endpoint, "http://env/api/Contatos");
}

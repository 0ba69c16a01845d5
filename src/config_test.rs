use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_variables() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:18080/api");
    assert_eq!(cfg.ws_url, "ws://localhost:18080/ws");
    assert!(!cfg.demo_mode);
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_PATH));
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn api_base_url_drives_ws_url() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("BLOODCONNECT_API_BASE_URL", "http://10.0.0.5:9000/api/")]))
        .unwrap();
    assert_eq!(cfg.api_base_url, "http://10.0.0.5:9000/api");
    assert_eq!(cfg.ws_url, "ws://10.0.0.5:9000/ws");
}

#[test]
fn explicit_ws_url_wins() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("BLOODCONNECT_API_BASE_URL", "http://10.0.0.5:9000/api"),
        ("BLOODCONNECT_WS_URL", "ws://push.example.test/ws"),
    ]))
    .unwrap();
    assert_eq!(cfg.ws_url, "ws://push.example.test/ws");
}

#[test]
fn demo_mode_parses_booleans() {
    for (raw, expected) in [("true", true), ("1", true), ("ON", true), ("false", false), ("0", false)] {
        let cfg = ClientConfig::from_lookup(lookup_from(&[("BLOODCONNECT_DEMO_MODE", raw)])).unwrap();
        assert_eq!(cfg.demo_mode, expected, "BLOODCONNECT_DEMO_MODE={raw}");
    }
}

#[test]
fn demo_mode_rejects_garbage() {
    let err = ClientConfig::from_lookup(lookup_from(&[("BLOODCONNECT_DEMO_MODE", "maybe")])).unwrap_err();
    assert!(err.to_string().contains("BLOODCONNECT_DEMO_MODE"));
}

#[test]
fn storage_path_override() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("BLOODCONNECT_STORAGE_PATH", "/tmp/bc.json")])).unwrap();
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/bc.json"));
}

#[test]
fn session_config_delays() {
    let cfg = SessionConfig::default();
    assert_eq!(cfg.demo_redirect_delay, Duration::from_secs(1));
    assert_eq!(cfg.fallback_redirect_delay, Duration::from_millis(1500));
    assert!(!cfg.demo_mode);
    assert!(SessionConfig::demo().demo_mode);
}

#[test]
fn session_config_follows_client_demo_flag() {
    let client = ClientConfig { demo_mode: true, ..ClientConfig::default() };
    assert!(SessionConfig::from(&client).demo_mode);
}

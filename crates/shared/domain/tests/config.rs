use serde_json::json;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use tscope_domain::config::{ApiConfig, MediaConfig, NewsConfig, ServerConfig, non_blank};

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.address, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(server.port, 5000);
    assert!(server.ssl.is_none());

    let news = NewsConfig::default();
    assert_eq!(news.default_country, "us");
    assert_eq!(news.rss.trusted_feeds.len(), 11);
    assert_eq!(news.rss.fallback_feeds.len(), 3);
    assert_eq!(news.rss.stream_window, 15);

    let cfg = ApiConfig::default();
    assert_eq!(cfg.llm.model, "gpt-4o-mini");
    assert_eq!(cfg.llm.fallback_model.as_deref(), Some("gpt-3.5-turbo"));
    assert!((cfg.factcheck.match_threshold - 60.0).abs() < f64::EPSILON);
    assert_eq!(cfg.storage.static_dir, PathBuf::from("public"));
}

#[test]
fn partial_sections_keep_defaults() {
    let raw = json!({
        "server": { "address": "0.0.0.0", "port": 8080 },
        "news": { "news_api_key": "abc", "rss": { "refresh_interval_secs": 0 } },
        "media": { "processing_delay_ms": 0 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");

    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.news.news_api_key.as_deref(), Some("abc"));
    assert_eq!(cfg.news.rss.refresh_interval_secs, 0);
    assert_eq!(cfg.news.rss.trusted_feeds.len(), 11, "unspecified lists keep defaults");
    assert_eq!(cfg.media.processing_delay_ms, 0);
    assert_eq!(cfg.media.upload_dir, PathBuf::from("uploads"));
}

#[test]
fn extension_allow_list_ignores_case() {
    let media = MediaConfig::default();
    assert!(media.is_allowed_extension("MP4"));
    assert!(media.is_allowed_extension("jpeg"));
    assert!(!media.is_allowed_extension("gif"));
    assert!(!media.is_allowed_extension(""));
}

#[test]
fn blank_keys_count_as_missing() {
    assert_eq!(non_blank(Some(&"  ".to_owned())), None);
    assert_eq!(non_blank(Some(&" key ".to_owned())), Some("key"));
    assert_eq!(non_blank(None), None);
}

#[test]
fn deref_mut_clones_on_write() {
    let original = ApiConfig::default();
    let mut changed = original.clone();
    changed.server.port = 9000;

    assert_eq!(original.server.port, 5000);
    assert_eq!(changed.server.port, 9000);
}

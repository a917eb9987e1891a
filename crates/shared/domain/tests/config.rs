use cosmo_domain::config::{ApiConfig, DatabaseConfig, ServerConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 5555);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.path, PathBuf::from("cosmodrome.db"));
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "path": "/tmp/test.db" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.path, PathBuf::from("/tmp/test.db"));
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let raw = json!({ "server": { "port": 9000 } });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 9000);
    assert_eq!(cfg.database.path, PathBuf::from("cosmodrome.db"));
}

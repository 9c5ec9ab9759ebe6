#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use jmxgate_core::error::BridgeError;
use jmxgate_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8778"
  mountt: "/jolokia" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, BridgeError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.mount, "/jolokia");
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8778");
    assert!(cfg.agent.policy_location.is_none());
}

#[test]
fn full_config_round_trips_into_engine_config() {
    let ok = r#"
version: 1
gateway:
  mount: "/mgmt"
  max_body_bytes: 4096
agent:
  agent_id: "fixed-agent"
  policy_location: "  "
engine:
  maxDepth: "15"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    let ec = config::EngineConfig::resolve(&cfg).expect("resolve");
    assert_eq!(ec.agent_id, "fixed-agent");
    assert!(ec.policy_location.is_none(), "blank location means unset");
    assert_eq!(ec.overrides["maxDepth"], "15");
}

#[test]
fn generated_agent_id_has_axum_suffix() {
    let cfg = config::load_from_str("version: 1\n").unwrap();
    let ec = config::EngineConfig::resolve(&cfg).unwrap();
    assert!(ec.agent_id.ends_with("-axum"), "{}", ec.agent_id);
}

#[test]
fn rejects_bad_mount_and_version() {
    for bad in [
        "version: 1\ngateway:\n  mount: \"jolokia\"\n",
        "version: 1\ngateway:\n  mount: \"/\"\n",
        "version: 1\ngateway:\n  mount: \"/jolokia/\"\n",
        "version: 1\ngateway:\n  max_body_bytes: 10\n",
        "version: 2\n",
    ] {
        assert!(config::load_from_str(bad).is_err(), "accepted: {bad}");
    }
}

#[test]
fn unknown_location_expression_fails_startup() {
    let cfg = config::load_from_str("version: 1\nagent:\n  policy_location: \"${nope}/p.yaml\"\n").unwrap();
    assert!(config::EngineConfig::resolve(&cfg).is_err());
}

#[test]
fn load_from_file_and_missing_file_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jmxgate.yaml");
    std::fs::write(&path, "version: 1\ngateway:\n  mount: \"/mgmt\"\n").unwrap();
    let path = path.to_string_lossy().into_owned();

    assert_eq!(config::load_from_file(&path).unwrap().gateway.mount, "/mgmt");
    assert_eq!(config::load_or_default(&path).unwrap().gateway.mount, "/mgmt");

    let absent = dir.path().join("absent.yaml").to_string_lossy().into_owned();
    assert!(config::load_from_file(&absent).is_err());
    assert_eq!(config::load_or_default(&absent).unwrap().gateway.mount, "/jolokia");
}


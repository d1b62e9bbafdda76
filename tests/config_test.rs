//! Configuration loading against testdata/config.

use std::path::PathBuf;

use lexmetrics::config::{self, Config};
use lexmetrics::{Analyzer, Operation, Registry, Thresholds};
use tempfile::TempDir;

fn config_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/config/lexmetrics.yaml")
}

#[test]
fn test_load_explicit_config() {
    let config = Config::load(Some(&config_path())).expect("config should load");
    assert_eq!(config.version, "1");
    assert_eq!(config.aliases["pyx"], "python");
    assert_eq!(config.thresholds(), Thresholds { high: 5, critical: 20 });
    assert!(config.complexity_analyzer().is_none());

    let registry = Registry::builtin().unwrap();
    config::validate(&config, registry).expect("config should be valid");
}

#[test]
fn test_config_aliases_feed_the_analyzer() {
    let config = Config::load(Some(&config_path())).unwrap();
    let registry = Registry::builtin().unwrap();
    let analyzer = Analyzer::new(registry).with_aliases(config.aliases.clone());
    assert!(analyzer.supports("jsm", Operation::ReturnCount));
    assert_eq!(analyzer.profile_for("jsm").map(|p| p.id), Some("javascript"));
}

#[test]
fn test_exclusions_from_file() {
    let config = Config::load(Some(&config_path())).unwrap();
    let set = config.exclusion_set().unwrap();
    assert!(set.is_match("web/generated/api.ts"));
    assert!(!set.is_match("web/src/api.ts"));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let err = Config::load(Some(&temp.path().join("absent.yaml"))).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.yaml"));
}

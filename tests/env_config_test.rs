//! Environment overrides. Kept in its own test binary since it mutates the
//! process environment.

use filter_manager::config::Config;

#[test]
fn test_environment_overrides_defaults() {
    std::env::set_var("FILTER_MANAGER__SERVER__HTTP_PORT", "9200");
    std::env::set_var("FILTER_MANAGER__OBSERVABILITY__LOG_LEVEL", "debug");

    let config = Config::load(None).unwrap();

    assert_eq!(config.server.http_port, 9200);
    assert_eq!(config.observability.log_level, "debug");
    assert_eq!(config.server.host, "0.0.0.0");
}

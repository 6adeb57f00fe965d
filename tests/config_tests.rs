//! Config loading and validation round-trips.

use std::io::Write;

use flipscan::config::Config;
use flipscan::error::{ConfigError, Error};

fn write_temp_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("flipscan-config-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn minimal_config_fills_in_defaults() {
    let file = write_temp_config("");

    let config = Config::load(file.path()).expect("empty config is valid");

    assert_eq!(config.network.search_url, "https://www.ebay.com/sch/i.html");
    assert_eq!(config.matcher.min_query_tokens, 3);
    assert_eq!(config.matcher.required_token_ratio, 0.70);
    assert_eq!(config.matcher.jaccard_threshold, 0.35);
    assert_eq!(config.filter.min_sample, 5);
    assert_eq!(config.entitlement.free_daily_limit, 10);
    assert_eq!(config.watch.debounce_ms, 1000);
}

#[test]
fn overridden_fields_survive_the_round_trip() {
    let file = write_temp_config(
        r#"
[network]
search_url = "https://www.ebay.co.uk/sch/i.html"
site_url = "https://www.ebay.co.uk"

[matcher]
jaccard_threshold = 0.5

[entitlement]
free_daily_limit = 3
"#,
    );

    let config = Config::load(file.path()).expect("valid config");

    assert_eq!(config.network.site_url, "https://www.ebay.co.uk");
    assert_eq!(config.matcher.jaccard_threshold, 0.5);
    // Untouched tables keep their defaults.
    assert_eq!(config.matcher.min_query_tokens, 3);
    assert_eq!(config.entitlement.free_daily_limit, 3);
}

#[test]
fn out_of_range_matcher_ratio_is_rejected() {
    let file = write_temp_config(
        r#"
[matcher]
required_token_ratio = 1.5
"#,
    );

    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "required_token_ratio",
            ..
        })) => {}
        Err(err) => panic!("expected invalid ratio error, got {err}"),
        Ok(config) => panic!(
            "expected invalid ratio to be rejected, got {}",
            config.matcher.required_token_ratio
        ),
    }
}

#[test]
fn empty_search_url_is_rejected() {
    let file = write_temp_config(
        r#"
[network]
search_url = ""
"#,
    );

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::MissingField {
            field: "search_url"
        }))
    ));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let config =
        Config::load_or_default("/nonexistent/flipscan.toml").expect("defaults when absent");

    assert_eq!(config.entitlement.free_daily_limit, 10);
}

#[test]
fn unparseable_toml_is_a_parse_error() {
    let file = write_temp_config("this is not toml = = =");

    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

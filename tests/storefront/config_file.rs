use gamehost::config::{Config, DEFAULT_CHECKOUT_URL};
use gamehost::{BillingPlan, PerformanceTier};

#[test]
fn minimal_config_deserializes_with_defaults() {
    let toml = r#"
[api]
base_url = "https://api.gamehost.example"
"#;

    let parsed: Config = toml::from_str(toml).expect("minimal config should deserialize");

    assert_eq!(parsed.api.base_url, "https://api.gamehost.example");
    assert_eq!(parsed.api.checkout_url, DEFAULT_CHECKOUT_URL);
    assert_eq!(parsed.http.timeout_secs, 30);
    assert_eq!(parsed.defaults.plan, BillingPlan::Monthly);
    assert_eq!(parsed.defaults.tier, PerformanceTier::Standard);
    assert_eq!(parsed.observability.log_level, "warn");
}

#[test]
fn unknown_plan_is_rejected() {
    let toml = r#"
[defaults]
plan = "weekly"
"#;

    assert!(toml::from_str::<Config>(toml).is_err());
}

#[test]
fn empty_config_is_valid() {
    let parsed: Config = toml::from_str("").expect("empty config should deserialize");
    assert!(parsed.validate().is_ok());
}

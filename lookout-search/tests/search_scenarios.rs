mod common;

use lookout_config::LookoutConfigLoader;
use lookout_search::SearchClient;
use lookout_search::decode::{Model, decode_model, envelope_results};
use lookout_search::enums::{Adult, EnumDomain};
use lookout_search::error::SearchError;
use lookout_search::options::{CommonOptions, WebOptions};
use lookout_search::params::web_params;
use serde_json::json;

#[test]
fn web_scenario_builds_the_documented_parameter_set() {
    common::init_test_tracing();

    let options = WebOptions {
        common: CommonOptions {
            limit: Some(10),
            offset: Some(10),
            adult: Some(Adult::Strict),
            ..Default::default()
        },
        ..Default::default()
    };
    let set = web_params("rust", &options);

    assert_eq!(set.rendered("$top").as_deref(), Some("'10'"));
    assert_eq!(set.rendered("$skip").as_deref(), Some("'11'"));
    assert_eq!(set.rendered("Adult").as_deref(), Some("'Strict'"));
}

#[test]
fn bad_symbol_fails_before_any_network_activity() {
    common::init_test_tracing();

    // Symbolic resolution happens while assembling options; a bad symbol
    // never reaches the client.
    let err = Adult::resolve("blocked").unwrap_err();
    assert!(matches!(err, SearchError::InvalidEnumValue { .. }));
}

#[test]
fn full_body_decodes_through_envelope_and_registry() {
    common::init_test_tracing();

    let body = serde_json::to_vec(&json!({
        "d": {
            "results": [{
                "__metadata": { "type": "ExpandableSearchResult" },
                "WebTotal": "5",
                "Web": [
                    {
                        "__metadata": { "type": "WebResult" },
                        "Title": "Lookout",
                        "Url": "https://example.test/lookout"
                    }
                ],
                "Image": []
            }]
        }
    }))
    .unwrap();

    let payload = envelope_results(&body).unwrap();
    let first = payload.as_array().unwrap().first().unwrap();
    let composite = match decode_model(first).unwrap() {
        Model::Composite(c) => *c,
        other => panic!("expected composite, got {}", other.kind()),
    };

    assert_eq!(composite.web_total, Some(5));
    assert_eq!(composite.web[0].title.as_deref(), Some("Lookout"));
    assert!(composite.image.is_empty());
}

#[test]
fn client_wires_up_from_yaml_config() {
    common::init_test_tracing();

    let config = LookoutConfigLoader::new()
        .with_yaml_str(
            r#"
account_key: "test-key"
web_only: true
market: "en-US"
"#,
        )
        .load()
        .expect("valid config");

    assert!(SearchClient::from_config(&config).is_ok());
}

/// Live smoke test against the real service; needs a marketplace account
/// key and network access.
#[tokio::test]
#[ignore]
async fn live_web_search_smoketest() -> anyhow::Result<()> {
    common::init_test_tracing();

    let key = std::env::var("LOOKOUT_ACCOUNT_KEY").expect("LOOKOUT_ACCOUNT_KEY not set");
    let client = SearchClient::new(key)?;

    let results = client
        .web(
            "rust language",
            &WebOptions {
                common: CommonOptions {
                    limit: Some(3),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await?;

    tracing::debug!(count = results.len(), "live web results");
    assert!(!results.is_empty());
    Ok(())
}

use super::*;
use profiler_client::UpsertOutcome;

fn listing(backend: BackendKind, names: &[&str]) -> BackendListing {
    BackendListing {
        backend,
        names: names.iter().map(|n| n.to_string()).collect(),
    }
}

fn keys(name: &str, keys: &[&str]) -> ProfileKeys {
    ProfileKeys {
        name: name.to_string(),
        backend: BackendKind::Local,
        keys: keys.iter().map(|k| k.to_string()).collect(),
    }
}

#[test]
fn test_text_single_listing_has_no_header() {
    let out = TextFormatter
        .format_listings(&[listing(BackendKind::Local, &["alpha", "beta"])])
        .unwrap();
    assert_eq!(out, "alpha\nbeta");
}

#[test]
fn test_text_multiple_listings_have_headers() {
    let out = TextFormatter
        .format_listings(&[
            listing(BackendKind::Local, &["alpha"]),
            listing(BackendKind::Consul, &["shared"]),
        ])
        .unwrap();
    assert_eq!(
        out,
        "[Local Profiles]\nalpha\n\n[Consul Remote Profiles]\nshared"
    );
}

#[test]
fn test_text_show_multiple_profiles() {
    let out = TextFormatter
        .format_profile_keys(&[
            keys("demo", &["profile_name", "FOO"]),
            keys("prod", &["profile_name"]),
        ])
        .unwrap();
    assert_eq!(out, "[demo]\nprofile_name\nFOO\n\n[prod]\nprofile_name");
}

#[test]
fn test_text_add_messages() {
    let created = AddReport {
        backend: BackendKind::Local,
        outcome: UpsertOutcome {
            created: true,
            change: Some(SetOutcome::Inserted),
        },
        registered: true,
    };
    assert_eq!(
        TextFormatter
            .format_add(&AddOutput::new("demo", Some("FOO"), &created))
            .unwrap(),
        "Created profile 'demo' in the local backend\nAdded FOO to 'demo'"
    );

    let unchanged = AddReport {
        backend: BackendKind::Consul,
        outcome: UpsertOutcome {
            created: false,
            change: Some(SetOutcome::Unchanged),
        },
        registered: false,
    };
    assert_eq!(
        TextFormatter
            .format_add(&AddOutput::new("demo", Some("FOO"), &unchanged))
            .unwrap(),
        "FOO already set in 'demo'"
    );
}

#[test]
fn test_json_listing_uses_backend_tags() {
    let out = JsonFormatter
        .format_listings(&[listing(BackendKind::Ssm, &[])])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value, serde_json::json!([{ "backend": "ssm", "names": [] }]));
}

#[test]
fn test_json_add_omits_missing_key() {
    let report = AddReport {
        backend: BackendKind::Local,
        outcome: UpsertOutcome {
            created: true,
            change: None,
        },
        registered: true,
    };
    let out = JsonFormatter
        .format_add(&AddOutput::new("demo", None, &report))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "name": "demo",
            "backend": "local",
            "created": true,
            "registered": true
        })
    );
}

//! Consul KV backend tests.
//!
//! # Invariants
//! - Every write carries a `cas` query parameter
//! - The `profiler/` folder marker never shows up as a profile
//! - A rejected check-and-set surfaces as a conflict

mod common;

use common::*;
use profiler_client::endpoints::consul;
use profiler_client::{ClientError, ConsulStore, SetOutcome};
use secrecy::SecretString;
use wiremock::matchers::{body_string, header, method, path, query_param, query_param_is_missing};

fn store(server: &MockServer) -> ConsulStore {
    ConsulStore::new(Client::new(), &server.uri(), None)
}

async fn mount_folder_marker(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/"))
        .and(query_param_is_missing("keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body("profiler/", "", 3)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_key_decodes_value_and_index() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(kv_body("profiler/demo", "profile_name: demo\n", 42)),
        )
        .mount(&mock_server)
        .await;

    let pair = consul::get_key(&Client::new(), &mock_server.uri(), None, "profiler/demo")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(pair.modify_index, 42);
    assert_eq!(pair.value_str().unwrap(), "profile_name: demo\n");
}

#[tokio::test]
async fn test_get_missing_key_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let pair = consul::get_key(&Client::new(), &mock_server.uri(), None, "profiler/ghost")
        .await
        .unwrap();
    assert!(pair.is_none());
    assert!(!store(&mock_server).exists("ghost").await.unwrap());
}

#[tokio::test]
async fn test_token_header_sent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .and(header("X-Consul-Token", "acl-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(kv_body("profiler/demo", "profile_name: demo\n", 1)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = ConsulStore::new(
        Client::new(),
        &mock_server.uri(),
        Some(SecretString::new("acl-token".to_string().into())),
    );
    assert!(store.exists("demo").await.unwrap());
}

#[tokio::test]
async fn test_list_excludes_folder_marker() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/"))
        .and(query_param("keys", ""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "profiler/",
            "profiler/prod",
            "profiler/dev",
        ])))
        .mount(&mock_server)
        .await;

    let names = store(&mock_server).list().await.unwrap();
    assert_eq!(names, vec!["dev".to_string(), "prod".to_string()]);
}

#[tokio::test]
async fn test_list_without_folder_is_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    assert!(store(&mock_server).list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_fetch_variables_in_stored_order() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\nZ: 1\nA: 2",
            9,
        )))
        .mount(&mock_server)
        .await;

    let vars = store(&mock_server).fetch_variables("demo").await.unwrap();
    assert_eq!(
        vars.iter().collect::<Vec<_>>(),
        vec![("profile_name", "demo"), ("Z", "1"), ("A", "2")]
    );
}

#[tokio::test]
async fn test_malformed_blob_is_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\nbroken line\n",
            9,
        )))
        .mount(&mock_server)
        .await;

    let err = store(&mock_server).fetch_variables("demo").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
}

#[tokio::test]
async fn test_upsert_creates_folder_and_profile() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/profiler/"))
        .and(query_param("cas", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/profiler/demo"))
        .and(query_param("cas", "0"))
        .and(body_string("profile_name: demo\nFOO: bar\n"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = store(&mock_server)
        .upsert("demo", Some(("FOO", "bar")))
        .await
        .unwrap();
    assert!(outcome.created);
    assert_eq!(outcome.change, Some(SetOutcome::Inserted));
}

#[tokio::test]
async fn test_upsert_replaces_in_place_with_cas() {
    let mock_server = MockServer::start().await;
    mount_folder_marker(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\nFOO: bar\nBAR: x\n",
            17,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/profiler/demo"))
        .and(query_param("cas", "17"))
        .and(body_string("profile_name: demo\nFOO: baz\nBAR: x\n"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = store(&mock_server)
        .upsert("demo", Some(("FOO", "baz")))
        .await
        .unwrap();
    assert!(!outcome.created);
    assert_eq!(outcome.change, Some(SetOutcome::Replaced));
}

#[tokio::test]
async fn test_identical_upsert_skips_write() {
    let mock_server = MockServer::start().await;
    mount_folder_marker(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\nFOO: bar\n",
            5,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = store(&mock_server)
        .upsert("demo", Some(("FOO", "bar")))
        .await
        .unwrap();
    assert_eq!(outcome.change, Some(SetOutcome::Unchanged));
}

#[tokio::test]
async fn test_lost_cas_is_conflict() {
    let mock_server = MockServer::start().await;
    mount_folder_marker(&mock_server).await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\n",
            5,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/kv/profiler/demo"))
        .and(query_param("cas", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string("false"))
        .mount(&mock_server)
        .await;

    let err = store(&mock_server)
        .upsert("demo", Some(("FOO", "bar")))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Conflict(name) if name == "demo"));
}

#[tokio::test]
async fn test_newline_value_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = store(&mock_server)
        .upsert("demo", Some(("FOO", "two\nlines")))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::InvalidVariable(_)));
}

#[tokio::test]
async fn test_delete_missing_profile_is_not_found() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = store(&mock_server).delete("ghost").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_existing_profile() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kv_body(
            "profiler/demo",
            "profile_name: demo\n",
            5,
        )))
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(1)
        .mount(&mock_server)
        .await;

    store(&mock_server).delete("demo").await.unwrap();
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/kv/profiler/demo"))
        .respond_with(ResponseTemplate::new(500).set_body_string("rpc error"))
        .mount(&mock_server)
        .await;

    let err = store(&mock_server).fetch_variables("demo").await.unwrap_err();
    match err {
        ClientError::ApiError {
            status, message, ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "rpc error");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_agent_is_unavailable() {
    // Port 9 (discard) is closed on test hosts.
    let store = ConsulStore::new(Client::new(), "http://127.0.0.1:9", None);
    let err = store.list().await.unwrap_err();
    assert!(err.is_unavailable(), "got {err:?}");
}

//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML definition → connector → HTTP requests → records

use clap::Parser;
use entity_connectors::cli::{Cli, Runner};
use entity_connectors::{
    load_connector, load_connector_from_str, BlockingConnector, EntityConnector, Error, FieldType,
    Filter, RestConnector, SyncStatus,
};
use serde_json::{json, Value};
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HELPDESK_YAML: &str = r#"
name: helpdesk
title: Helpdesk
base_url: "{{ config.base_url }}/api/v3"
auth:
  type: api_key
  location: header
  header_name: apikey
  value: "{{ config.api_key }}"
http:
  max_retries: 0
  requests_per_second: 0
pagination:
  type: page_number
  page_param: _page
  size_param: _perPage
  max_page_size: 100
entities:
  - name: tickets
    endpoint: /tickets
  - name: messages
    endpoint: "/tickets/{ticketId}/messages"
    root_path: response.messages
    required_filters: [ticketId]
"#;

const GEO_YAML: &str = r#"
name: geo
base_url: "{{ config.base_url }}/v1/geo"
auth:
  type: custom_headers
  headers:
    X-RapidAPI-Key: "{{ config.api_key }}"
http:
  max_retries: 0
  requests_per_second: 0
pagination:
  type: offset
  max_page_size: 10
entities:
  - name: countries
    endpoint: /countries
    root_path: data
    total_path: metadata.totalCount
  - name: regions
    endpoint: "/countries/{countryId}/regions"
    root_path: data
    required_filters: [countryId]
    total_path: metadata.totalCount
"#;

const CHAT_YAML: &str = r#"
name: chat
base_url: "{{ config.base_url }}"
auth:
  type: bearer
  token: "{{ config.token }}"
http:
  max_retries: 0
  requests_per_second: 0
pagination:
  type: cursor
  cursor_path: response_metadata.next_cursor
  max_page_size: 200
entities:
  - name: channels
    endpoint: /conversations.list
    root_path: channels
"#;

fn build(yaml: &str, config: Value) -> RestConnector {
    let def = load_connector_from_str(yaml).unwrap();
    RestConnector::from_definition(&def, &config).unwrap()
}

fn helpdesk(server: &MockServer) -> RestConnector {
    build(
        HELPDESK_YAML,
        json!({"base_url": server.uri(), "api_key": "la-key"}),
    )
}

// ============================================================================
// Entity reads
// ============================================================================

#[tokio::test]
async fn test_get_entities_with_auth_and_path_substitution() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets/T-1/messages"))
        .and(header("apikey", "la-key"))
        .and(query_param("type", "M"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"messages": [{"id": "m1"}, {"id": "m2"}]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = helpdesk(&mock_server);
    let records = connector
        .get_entities(
            "messages",
            &[Filter::new("ticketId", "T-1"), Filter::new("type", "M")],
        )
        .await
        .unwrap();

    assert_eq!(records, vec![json!({"id": "m1"}), json!({"id": "m2"})]);
}

#[tokio::test]
async fn test_configuration_errors_never_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let connector = helpdesk(&mock_server);

    let err = connector.get_entities("messages", &[]).await.unwrap_err();
    assert!(matches!(err, Error::MissingRequiredFilter { .. }));

    let err = connector
        .get_entities_page("invoices", &[], 1, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownEntity { .. }));
}

#[tokio::test]
async fn test_upstream_errors_become_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let connector = helpdesk(&mock_server);

    let records = connector.get_entities("tickets", &[]).await.unwrap();
    assert!(records.is_empty());

    let page = connector
        .get_entities_page("tickets", &[], 1, 25)
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.total_records, 0);
}

#[tokio::test]
async fn test_malformed_body_becomes_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&mock_server)
        .await;

    let records = helpdesk(&mock_server)
        .get_entities("tickets", &[])
        .await
        .unwrap();
    assert!(records.is_empty());
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_page_number_pagination_flow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets"))
        .and(query_param("_page", "3"))
        .and(query_param("_perPage", "100"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 201}, {"id": 202}])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = helpdesk(&mock_server)
        .get_entities_page("tickets", &[], 3, 1000)
        .await
        .unwrap();

    assert_eq!(page.page_number, 3);
    assert_eq!(page.page_size, 100);
    assert_eq!(page.items.len(), 2);
    assert!(!page.total_known);
}

#[tokio::test]
async fn test_offset_pagination_with_total() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geo/countries/US/regions"))
        .and(header("X-RapidAPI-Key", "rapid"))
        .and(query_param("offset", "10"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"isoCode": "CA", "name": "California"}],
            "metadata": {"currentOffset": 10, "totalCount": 56}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = build(
        GEO_YAML,
        json!({"base_url": mock_server.uri(), "api_key": "rapid"}),
    );
    let page = connector
        .get_entities_page("regions", &[Filter::new("countryId", "US")], 2, 10)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total_records, 56);
    assert_eq!(page.total_pages, 6);
    assert!(page.total_known);
}

#[tokio::test]
async fn test_cursor_pagination_flow() {
    let mock_server = MockServer::start().await;

    // Second page, only when the cursor is sent
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("cursor", "dXNlcjpVMEc5V0ZYTlo="))
        .and(header("Authorization", "Bearer xoxb-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C3"}],
            "response_metadata": {"next_cursor": ""}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // First page
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C1"}, {"id": "C2"}],
            "response_metadata": {"next_cursor": "dXNlcjpVMEc5V0ZYTlo="}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = build(
        CHAT_YAML,
        json!({"base_url": mock_server.uri(), "token": "xoxb-1"}),
    );
    let page = connector
        .get_entities_page("channels", &[], 2, 2)
        .await
        .unwrap();

    assert_eq!(page.items, vec![json!({"id": "C3"})]);
    assert_eq!(page.next_cursor, None);
}

#[tokio::test]
async fn test_get_entities_reads_every_cursor_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("cursor", "next-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C3"}],
            "response_metadata": {"next_cursor": ""}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("limit", "200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C1"}, {"id": "C2"}],
            "response_metadata": {"next_cursor": "next-1"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let connector = build(
        CHAT_YAML,
        json!({"base_url": mock_server.uri(), "token": "xoxb-1"}),
    );
    let records = connector.get_entities("channels", &[]).await.unwrap();

    assert_eq!(
        records,
        vec![json!({"id": "C1"}), json!({"id": "C2"}), json!({"id": "C3"})]
    );
}

// ============================================================================
// Structure and sync
// ============================================================================

#[tokio::test]
async fn test_structure_inference_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geo/countries"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "code": "US",
                "currencyCodes": ["USD"],
                "name": "United States of America",
                "wikiDataId": "Q30"
            }],
            "metadata": {"totalCount": 199}
        })))
        .mount(&mock_server)
        .await;

    let connector = build(
        GEO_YAML,
        json!({"base_url": mock_server.uri(), "api_key": "rapid"}),
    );
    let structure = connector.get_structure("countries").await.unwrap();

    let names: Vec<&str> = structure.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["code", "currencyCodes", "name", "wikiDataId"]);
    assert_eq!(
        structure.field("currencyCodes").unwrap().field_type,
        FieldType::ObjectArray
    );
}

#[tokio::test]
async fn test_sync_all_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}, {"id": 3}])),
        )
        .mount(&mock_server)
        .await;

    let summaries = helpdesk(&mock_server).sync_all(&[], 2).await;

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].entity, "messages");
    assert_eq!(summaries[0].status, SyncStatus::Skipped);
    assert_eq!(summaries[1].entity, "tickets");
    assert_eq!(summaries[1].status, SyncStatus::Synced);
    assert_eq!(summaries[1].records, 3);
}

#[test]
fn test_blocking_connector_over_http() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mock_server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/tickets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 9}])))
            .mount(&server)
            .await;
        server
    });

    let blocking = BlockingConnector::new(helpdesk(&mock_server)).unwrap();
    let records = blocking.get_entities("tickets", &[]).unwrap();
    assert_eq!(records, vec![json!({"id": 9})]);

    drop(blocking);
    drop(mock_server);
}

// ============================================================================
// Definitions and CLI
// ============================================================================

#[test]
fn test_builtin_connectors_load() {
    for name in ["liveagent", "loomly", "geodb", "slack"] {
        let def = load_connector(name).unwrap();
        assert_eq!(def.name, name);
    }
}

#[test]
fn test_builtin_requires_connection_config() {
    let def = load_connector("liveagent").unwrap();
    let err = RestConnector::from_definition(&def, &json!({})).unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_cli_runner_page_command() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/tickets/T-9/messages"))
        .and(query_param("_page", "1"))
        .and(query_param("_perPage", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": {"messages": [{"id": "m1"}]}
        })))
        .mount(&mock_server)
        .await;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(HELPDESK_YAML.as_bytes()).unwrap();

    let config = json!({"base_url": mock_server.uri(), "api_key": "k"}).to_string();
    let cli = Cli::try_parse_from([
        "entity-connectors",
        "--connector",
        file.path().to_str().unwrap(),
        "--config-json",
        config.as_str(),
        "page",
        "messages",
        "-F",
        "ticketId=T-9",
        "--size",
        "5",
    ])
    .unwrap();

    let output = Runner::new(cli).execute().await.unwrap();
    assert_eq!(output["type"], "PAGE");
    assert_eq!(output["page"]["items"], json!([{"id": "m1"}]));
    assert_eq!(output["page"]["page_size"], 5);
}

#[tokio::test]
async fn test_cli_runner_entities_and_list() {
    let cli = Cli::try_parse_from(["entity-connectors", "-c", "geodb", "entities"]).unwrap();
    let output = Runner::new(cli).execute().await.unwrap();
    assert_eq!(output["connector"], "geodb");
    assert_eq!(output["entities"][1]["name"], "regions");
    assert_eq!(output["entities"][1]["required_filters"], json!(["countryId"]));

    let cli = Cli::try_parse_from(["entity-connectors", "list"]).unwrap();
    let output = Runner::new(cli).execute().await.unwrap();
    assert_eq!(output["connectors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_cli_runner_without_connector_fails() {
    let cli = Cli::try_parse_from(["entity-connectors", "validate"]).unwrap();
    let err = Runner::new(cli).execute().await.unwrap_err();
    assert!(err.to_string().contains("Connector not specified"));
}

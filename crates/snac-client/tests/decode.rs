use reqwest::StatusCode;
use snac_client::{
    ClientError, HostClient, Preferences, PreviewResult, ProcessCode, ProcessResponse,
    ClientConfig, decode_body,
};
use snac_model::{SchemaModel, SchemaType};

#[test]
fn decodes_preview() {
    let preview: PreviewResult = decode_body(
        StatusCode::OK,
        r#"{"preview": ["Resource: Jacob Miller Papers"], "total": 120}"#,
    )
    .unwrap();
    assert_eq!(preview.sample_items.len(), 1);
    assert_eq!(preview.total_item_count, 120);
}

#[test]
fn error_body_with_success_status_is_a_server_error() {
    let result: Result<PreviewResult, _> = decode_body(
        StatusCode::OK,
        r#"{"status": "error", "message": "SNAC schema could not be parsed."}"#,
    );
    assert_eq!(
        result,
        Err(ClientError::Server {
            message: "SNAC schema could not be parsed.".to_string()
        })
    );
}

#[test]
fn exception_body_is_a_server_error() {
    let result: Result<ProcessResponse, _> = decode_body(
        StatusCode::OK,
        r#"{"code": "error", "message": "java.lang.NullPointerException", "stack": "..."}"#,
    );
    assert!(matches!(result, Err(ClientError::Server { .. })));
}

#[test]
fn non_json_failure_is_a_server_error() {
    let result: Result<PreviewResult, _> =
        decode_body(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
    assert_eq!(
        result,
        Err(ClientError::Server {
            message: "host returned HTTP 500 Internal Server Error".to_string()
        })
    );
}

#[test]
fn malformed_success_is_a_decode_error() {
    let result: Result<PreviewResult, _> = decode_body(StatusCode::OK, "{");
    assert!(matches!(result, Err(ClientError::Decode(_))));

    let result: Result<ProcessResponse, _> = decode_body(StatusCode::OK, r#"{"code": "maybe"}"#);
    assert!(matches!(result, Err(ClientError::Decode(_))));
}

#[test]
fn decodes_process_response() {
    let response: ProcessResponse = decode_body(
        StatusCode::OK,
        r#"{"code": "ok", "historyEntry": {"id": 1699, "description": "Save SNAC schema", "time": "2024-03-07T10:00:00Z"}}"#,
    )
    .unwrap();
    assert_eq!(response.code, ProcessCode::Ok);
    assert_eq!(response.history_entry.map(|h| h.id), Some(1699));
}

#[test]
fn decodes_model_payload() {
    let body = serde_json::to_string(&SchemaModel::builtin()).unwrap();
    let model: SchemaModel = decode_body(StatusCode::OK, &body).unwrap();
    assert_eq!(model.required_fields(SchemaType::Entity), vec!["CPF Type"]);
}

#[test]
fn decodes_preferences() {
    let body = r#"{
        "env": "prod",
        "dev": {"name": "Development", "web_url": "https://snac-dev.example", "api_key": "abc", "api_url": "https://api-dev.example"},
        "prod": {"name": "Production", "web_url": "https://snac.example", "api_key": "", "api_url": "https://api.example"},
        "preview": {"max_items": 10},
        "upload": {"api_response": false}
    }"#;
    let prefs: Preferences = decode_body(StatusCode::OK, body).unwrap();
    assert_eq!(prefs.active().map(|e| e.name.as_str()), Some("Production"));
    assert!(!prefs.has_active_api_key());
    assert_eq!(prefs.environments.len(), 2);

    insta::assert_json_snapshot!(prefs.preview, @r#"
    {
      "max_items": 10
    }
    "#);
}

#[tokio::test]
async fn project_commands_require_a_project() {
    let client = HostClient::new(ClientConfig::new("http://127.0.0.1:9/").unwrap()).unwrap();
    let result = client.perform_uploads(&Default::default()).await;
    assert!(matches!(result, Err(ClientError::Config(_))));
}

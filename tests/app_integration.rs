use serde_json::{Value, json};
use std::fs;
use std::path::Path;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .and(header("apikey", "test-key"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str, output: &std::path::Path) -> String {
        let config_path = dir.join("config.yaml");
        let config_content = format!(
            r#"
            api_key: "test-key"
            output_path: "{}"
            provider:
              base_url: {}
              timeout_secs: 10
        "#,
            output.display(),
            base_url
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path.to_str().unwrap().to_string()
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_full_update_flow_with_mock() {
    let mock_response = r#"{
        "meta": {"last_updated_at": "2024-02-29T23:59:59Z"},
        "data": {"USD": 1.0, "EUR": 0.92, "JPY": 150.12}
    }"#;
    let mock_server = test_utils::create_mock_server(200, mock_response).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("files/exchange_rates.json");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), &output);

    let before = chrono::Local::now().naive_local();
    let result = xrate::run_command(
        xrate::AppCommand::Update(xrate::UpdateOptions::default()),
        Some(&config_path),
    )
    .await;
    assert!(
        result.is_ok(),
        "Update failed with: {:?}",
        result.err()
    );

    let written = read_json(&output);
    info!(?written, "Rate document after update");
    assert_eq!(written["data"], json!({"USD": 1.0, "EUR": 0.92, "JPY": 150.12}));
    assert_eq!(written["meta"]["last_updated_at"], "2024-02-29T23:59:59Z");

    let update_time = chrono::NaiveDateTime::parse_from_str(
        written["updateTime"].as_str().expect("updateTime missing"),
        "%Y-%m-%d %H:%M:%S",
    )
    .expect("updateTime has the wrong format");
    let after = chrono::Local::now().naive_local();
    assert!(update_time >= before - chrono::Duration::seconds(1));
    assert!(update_time <= after);

    // Status reads back what update wrote
    let status = xrate::run_command(
        xrate::AppCommand::Status { output: None },
        Some(&config_path),
    )
    .await;
    assert!(status.is_ok(), "Status failed with: {:?}", status.err());
}

#[test_log::test(tokio::test)]
async fn test_error_payload_keeps_previous_document() {
    let mock_server =
        test_utils::create_mock_server(200, r#"{"error": "invalid credential"}"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("exchange_rates.json");
    let previous = r#"{"data": {"USD": 1.0}, "updateTime": "2024-02-29 09:00:00"}"#;
    fs::write(&output, previous).unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), &output);

    let result = xrate::run_command(
        xrate::AppCommand::Update(xrate::UpdateOptions::default()),
        Some(&config_path),
    )
    .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Downloaded JSON does not contain the 'data' block."
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), previous);
}

#[test_log::test(tokio::test)]
async fn test_http_error_status_does_not_write() {
    let mock_server =
        test_utils::create_mock_server(429, r#"{"message": "API rate limit exceeded"}"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("exchange_rates.json");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), &output);

    let result = xrate::run_command(
        xrate::AppCommand::Update(xrate::UpdateOptions::default()),
        Some(&config_path),
    )
    .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "HTTP error: 429 Too Many Requests from exchange rate provider"
    );
    assert!(!output.exists());
}

#[test_log::test(tokio::test)]
async fn test_empty_body_is_a_parse_error() {
    let mock_server = test_utils::create_mock_server(200, "").await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("exchange_rates.json");
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), &output);

    let result = xrate::run_command(
        xrate::AppCommand::Update(xrate::UpdateOptions::default()),
        Some(&config_path),
    )
    .await;

    assert!(
        result
            .unwrap_err()
            .to_string()
            .starts_with("Failed to parse exchange rate response")
    );
    assert!(!output.exists());
}

#[test_log::test(tokio::test)]
async fn test_command_line_overrides_take_precedence() {
    let mock_server = test_utils::create_mock_server(200, r#"{"data": {"GBP": 0.79}}"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_output = dir.path().join("from_config.json");
    let override_output = dir.path().join("override/exchange_rates.json");
    // Config points at an unreachable provider with the wrong key
    let config_path = dir.path().join("config.yaml");
    fs::write(
        &config_path,
        format!(
            "api_key: \"wrong-key\"\noutput_path: \"{}\"\nprovider:\n  base_url: \"http://127.0.0.1:1\"\n",
            config_output.display()
        ),
    )
    .unwrap();

    let options = xrate::UpdateOptions {
        output: Some(override_output.display().to_string()),
        api_key: Some("test-key".to_string()),
        base_url: Some(mock_server.uri()),
    };
    let result = xrate::run_command(
        xrate::AppCommand::Update(options),
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Update failed with: {:?}", result.err());

    assert!(!config_output.exists());
    assert_eq!(read_json(&override_output)["data"], json!({"GBP": 0.79}));
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = dir.path().join("missing.yaml");

    let result = xrate::run_command(
        xrate::AppCommand::Status { output: None },
        Some(missing.to_str().unwrap()),
    )
    .await;
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}

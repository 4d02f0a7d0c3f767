//! Integration tests for a full harvest run
//!
//! One wiremock server plays both the Places API (under `/v1`) and the
//! listings' websites (under `/site-*`).

use mail_ripple::config::{CrawlerConfig, OutputConfig, PlacesConfig, UserAgentConfig};
use mail_ripple::harvest::HEADER;
use mail_ripple::storage::{SheetStore, SqliteStorage};
use mail_ripple::{run_harvest, Config};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config(server: &MockServer, summary_path: Option<String>) -> Config {
    Config {
        crawler: CrawlerConfig {
            page_budget: 5,
            fetch_timeout_secs: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        places: PlacesConfig {
            api_key: "test-key".to_string(),
            query: "avvocati".to_string(),
            zip_codes: vec!["22100".to_string(), "22063".to_string()],
            max_result_count: 20,
            endpoint: format!("{}/v1", server.uri()),
        },
        output: OutputConfig {
            database_path: "unused".to_string(),
            sheet_name: "Leads".to_string(),
            summary_path,
        },
    }
}

async fn mount_places(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/places:searchText"))
        .and(header("X-Goog-Api-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [
                {"name": "places/rossi"},
                {"name": "places/bianchi"},
                {"name": "places/missing"},
                {"name": "places/rossi"}
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/places/rossi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "places/rossi",
            "displayName": {"text": "Studio Rossi"},
            "rating": 4.5,
            "userRatingCount": 12,
            "formattedAddress": "Via Roma 1, 22100 Como",
            "internationalPhoneNumber": "+39 031 000000",
            "websiteUri": format!("{}/site-rossi/", server.uri())
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/places/bianchi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "places/bianchi",
            "displayName": {"text": "Studio Bianchi"}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/places/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(server)
        .await;
}

async fn mount_website(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/site-rossi/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<p>info@rossi.example</p><a href="contatti">Contatti</a>"#,
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/site-rossi/contatti"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<p>avv@rossi.example info@rossi.example</p>"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_harvest_writes_sheet() {
    let server = MockServer::start().await;
    mount_places(&server).await;
    mount_website(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let summary_path = temp_dir.path().join("leads.md");
    let mut storage = SqliteStorage::new(&temp_dir.path().join("leads.db")).unwrap();

    let config = create_test_config(&server, Some(summary_path.display().to_string()));
    let report = run_harvest(&config, &mut storage).await.unwrap();

    assert_eq!(report.zip_codes_searched, 2);
    assert_eq!(report.unique_places, 3);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.listings_with_email, 1);

    let sheet = storage.find_sheet("Leads").unwrap().expect("sheet exists");
    let rows = storage.rows(sheet.id).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>());
    assert_eq!(
        rows[1],
        vec![
            "Studio Rossi".to_string(),
            "4.5".to_string(),
            "12".to_string(),
            "Via Roma 1, 22100 Como".to_string(),
            "+39 031 000000".to_string(),
            format!("{}/site-rossi/", server.uri()),
            "avv@rossi.example, info@rossi.example".to_string(),
        ]
    );
    assert_eq!(rows[2][0], "Studio Bianchi");
    assert_eq!(rows[2][6], "");

    let markdown = std::fs::read_to_string(&summary_path).unwrap();
    assert!(markdown.starts_with("# Leads"));
    assert!(markdown.contains("- **Listings with email**: 1"));
}

#[tokio::test]
async fn test_rerun_replaces_previous_rows() {
    let server = MockServer::start().await;
    mount_places(&server).await;
    mount_website(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let mut storage = SqliteStorage::new(&temp_dir.path().join("leads.db")).unwrap();
    let config = create_test_config(&server, None);

    run_harvest(&config, &mut storage).await.unwrap();
    run_harvest(&config, &mut storage).await.unwrap();

    let sheet = storage.find_sheet("Leads").unwrap().expect("sheet exists");
    assert_eq!(storage.row_count(sheet.id).unwrap(), 3);
    assert_eq!(storage.list_sheets().unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_searches_leave_header_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .expect(2)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let mut storage = SqliteStorage::new(&temp_dir.path().join("leads.db")).unwrap();

    let report = run_harvest(&create_test_config(&server, None), &mut storage)
        .await
        .unwrap();

    assert_eq!(report.zip_codes_searched, 2);
    assert_eq!(report.unique_places, 0);
    assert_eq!(report.rows_written, 0);

    let sheet = storage.find_sheet("Leads").unwrap().expect("sheet exists");
    assert_eq!(storage.row_count(sheet.id).unwrap(), 1);
}

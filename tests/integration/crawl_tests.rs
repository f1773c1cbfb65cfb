//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a mock course catalog and run the full
//! crawl → export cycle end-to-end.

use catalog_crawl::config::Config;
use catalog_crawl::crawler::RunController;
use catalog_crawl::output::export_csv;
use catalog_crawl::state::Level;
use catalog_crawl::CatalogError;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SCHOOLS: &str = "/class-descriptions/4780/index-v2.json";
const MEAS_SUBJECTS: &str = "/class-descriptions/4780/MEAS/index-v2.json";
const EECS_CLASSES: &str = "/class-descriptions/4780/MEAS/EECS/index-v2.json";
const EECS_211_SECTIONS: &str = "/class-descriptions/4780/MEAS/EECS/211/index-v2.json";
const SECTION_FULL: &str = "/class-descriptions/4780/MEAS/EECS/211/10001-v2.json";
const SECTION_MINIMAL: &str = "/class-descriptions/4780/MEAS/EECS/211/10002-v2.json";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = base_url.to_string();
    config.fetch.timeout_ms = 300;
    config.run.max_attempts = 5;
    config.output.cache_dir = dir.path().join("cache").to_string_lossy().into_owned();
    config.output.csv_path = dir
        .path()
        .join("results.csv")
        .to_string_lossy()
        .into_owned();
    config
}

/// Appends the trailing sentinel element every catalog response carries
fn with_sentinel(mut items: Vec<Value>) -> Value {
    items.push(json!({"generated": "sentinel"}));
    Value::Array(items)
}

async fn mount_json(server: &MockServer, url_path: &str, items: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(with_sentinel(items)))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, url_path: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .filter(|r| r.url.path() == url_path)
        .count()
}

/// Mounts the upper levels of a catalog with one school, subject and class
async fn mount_single_class(server: &MockServer) {
    mount_json(server, SCHOOLS, vec![json!({"id": "MEAS", "name": "McCormick"})]).await;
    mount_json(
        server,
        MEAS_SUBJECTS,
        vec![json!({"name": "EECS", "path": "/class-descriptions/4780/MEAS/EECS"})],
    )
    .await;
    mount_json(
        server,
        EECS_CLASSES,
        vec![json!({"name": "EECS 211-0", "path": "/class-descriptions/4780/MEAS/EECS/211"})],
    )
    .await;
}

/// Mounts the two-section catalog used by most tests
async fn mount_catalog(server: &MockServer) {
    mount_single_class(server).await;
    mount_json(
        server,
        EECS_211_SECTIONS,
        vec![
            json!({"path": "/class-descriptions/4780/MEAS/EECS/211/10001"}),
            json!({"path": "/class-descriptions/4780/MEAS/EECS/211/10002"}),
        ],
    )
    .await;
    mount_json(
        server,
        SECTION_FULL,
        vec![json!({
            "title": "MEAS EECS 211-0 Fundamentals of Computer Programming II",
            "topic": "Systems",
            "class_mtg_info": [{"meet_t": "MoWeFr 9:00am - 9:50am", "meet_l": "Tech LR3"}],
            "descriptions": [
                {"name": "Overview of class", "value": "Pointers, memory"},
                {"name": "Evaluation Method", "value": "Exams<br/>Labs"},
                {"name": "Class Notes", "value": "Bring a laptop"}
            ],
            "instructors": [{"instructor_name": "Ada Lovelace"}],
            "enrl_requirement": "Add Consent: Instructor Consent Required<br/>Drop Consent: Instructor Consent Required",
            "class_attributes": "Formal Studies Distro Area"
        })],
    )
    .await;
    mount_json(server, SECTION_MINIMAL, vec![json!({"class_num": 10002})]).await;
}

#[tokio::test]
async fn test_end_to_end_export() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);

    let mut controller = RunController::new(&config).expect("Failed to create controller");
    let report = controller.run().await.expect("Crawl failed");
    assert_eq!(report.attempts, 1);
    assert_eq!(report.records.len(), 2);

    let csv_path = std::path::Path::new(&config.output.csv_path);
    let summary = export_csv(&report.records, csv_path).expect("Export failed");
    assert_eq!(summary.rows, 2);

    let content = std::fs::read_to_string(csv_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "school,title,topic,time,custom_minutes_per_week,location,requirements,description_evaluation_method,description_overview"
    );
    assert_eq!(
        lines[1],
        r#"MEAS,EECS 211-0 Fundamentals of Computer Programming II,Systems,MoWeFr 9:00am - 9:50am,150,Tech LR3,"[""AddInstructorConsent"",""DropInstructorConsent""]",Exams;Labs,"Pointers, memory""#
    );
    assert_eq!(lines[2], "MEAS,,,,,,,,");

    let minimal = &report.records[1];
    assert_eq!(minimal.context.subject, "EECS");
    assert_eq!(minimal.context.class, "EECS 211-0");
    assert_eq!(minimal.keys(), vec!["school", "subject", "class"]);

    let unused: Vec<&str> = summary.unused_keys.iter().map(String::as_str).collect();
    assert_eq!(
        unused,
        vec![
            "attributes",
            "class",
            "custom_days_per_week",
            "description_notes",
            "instructors",
            "subject"
        ]
    );
}

#[tokio::test]
async fn test_ill_typed_detail_field_drops_only_its_column() {
    let mock_server = MockServer::start().await;
    mount_single_class(&mock_server).await;
    mount_json(
        &mock_server,
        EECS_211_SECTIONS,
        vec![json!({"path": "/class-descriptions/4780/MEAS/EECS/211/10001"})],
    )
    .await;
    mount_json(
        &mock_server,
        SECTION_FULL,
        vec![json!({
            "title": "MEAS EECS 211-0 Programming II",
            "topic": ["not", "a", "string"],
            "class_mtg_info": [{"meet_t": "TuTh 2:00pm - 3:20pm", "meet_l": "Tech LR5"}],
            "descriptions": [
                {"name": "Class Notes", "value": null},
                {"name": "Evaluation Method", "value": "Exams<br/>Labs"}
            ],
            "enrl_requirement": "Add Consent: Department Consent Required"
        })],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let report = RunController::new(&config).unwrap().run().await.unwrap();
    assert_eq!(report.records.len(), 1);

    let csv_path = std::path::Path::new(&config.output.csv_path);
    export_csv(&report.records, csv_path).unwrap();
    let content = std::fs::read_to_string(csv_path).unwrap();
    assert_eq!(
        content.lines().nth(1).unwrap(),
        r#"MEAS,EECS 211-0 Programming II,,TuTh 2:00pm - 3:20pm,160,Tech LR5,"[""AddDepartmentConsent""]",Exams;Labs,"#
    );
}

#[tokio::test]
async fn test_traversal_order_and_skips() {
    let mock_server = MockServer::start().await;

    mount_json(
        &mock_server,
        SCHOOLS,
        vec![
            json!({"id": "WCAS", "name": "Weinberg"}),
            json!({"id": "MEAS", "name": "McCormick"}),
            json!({"name": "Orphan"}),
        ],
    )
    .await;
    mount_json(
        &mock_server,
        "/class-descriptions/4780/WCAS/index-v2.json",
        vec![json!({"name": "MATH", "path": "/s/MATH"})],
    )
    .await;
    mount_json(
        &mock_server,
        MEAS_SUBJECTS,
        vec![
            json!({"name": "EECS", "path": "/s/EECS"}),
            json!({"name": "BME", "path": "/s/BME"}),
            json!({"path": "/s/NONAME"}),
        ],
    )
    .await;
    mount_json(
        &mock_server,
        "/s/MATH/index-v2.json",
        vec![json!({"name": "MATH 220", "path": "/c/220"})],
    )
    .await;
    mount_json(
        &mock_server,
        "/s/EECS/index-v2.json",
        vec![
            json!({"name": "EECS 311", "path": "/c/311"}),
            json!({"name": "EECS 211", "path": "/c/211"}),
        ],
    )
    .await;
    mount_json(
        &mock_server,
        "/s/BME/index-v2.json",
        vec![json!({"name": "BME 101", "path": "/c/101"})],
    )
    .await;
    mount_json(&mock_server, "/c/220/index-v2.json", vec![json!({"path": "/x/m1"})]).await;
    mount_json(&mock_server, "/c/311/index-v2.json", vec![json!({"path": "/x/e3"})]).await;
    mount_json(
        &mock_server,
        "/c/211/index-v2.json",
        vec![
            json!({"path": "/x/e2b"}),
            json!({"path": "/x/e2a"}),
            json!({"name": "no path"}),
        ],
    )
    .await;
    mount_json(&mock_server, "/c/101/index-v2.json", vec![json!({"path": "/x/b1"})]).await;
    for id in ["m1", "e3", "e2b", "e2a", "b1"] {
        mount_json(
            &mock_server,
            &format!("/x/{}-v2.json", id),
            vec![json!({"topic": id})],
        )
        .await;
    }

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let report = RunController::new(&config)
        .unwrap()
        .run()
        .await
        .expect("Crawl failed");

    let topics: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.topic.as_deref().unwrap())
        .collect();
    assert_eq!(topics, vec!["b1", "e2b", "e2a", "e3", "m1"]);

    let schools: Vec<&str> = report
        .records
        .iter()
        .map(|r| r.context.school.as_str())
        .collect();
    assert_eq!(schools, vec!["MEAS", "MEAS", "MEAS", "MEAS", "WCAS"]);

    // Nameless subjects are skipped before any fetch
    assert_eq!(requests_to(&mock_server, "/s/NONAME/index-v2.json").await, 0);
}

#[tokio::test]
async fn test_shared_section_recorded_once() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, SCHOOLS, vec![json!({"id": "MEAS", "name": "McCormick"})]).await;
    mount_json(
        &mock_server,
        MEAS_SUBJECTS,
        vec![json!({"name": "EECS", "path": "/s/EECS"})],
    )
    .await;
    mount_json(
        &mock_server,
        "/s/EECS/index-v2.json",
        vec![
            json!({"name": "EECS 211", "path": "/c/211"}),
            json!({"name": "EECS 311", "path": "/c/311"}),
        ],
    )
    .await;
    mount_json(&mock_server, "/c/211/index-v2.json", vec![json!({"path": "/x/shared"})]).await;
    mount_json(
        &mock_server,
        "/c/311/index-v2.json",
        vec![json!({"path": "/x/shared"}), json!({"path": "/x/own"})],
    )
    .await;
    mount_json(&mock_server, "/x/shared-v2.json", vec![json!({"topic": "shared"})]).await;
    mount_json(&mock_server, "/x/own-v2.json", vec![json!({"topic": "own"})]).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let report = RunController::new(&config).unwrap().run().await.unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].topic.as_deref(), Some("shared"));
    assert_eq!(report.records[0].context.class, "EECS 211");
    assert_eq!(report.records[1].topic.as_deref(), Some("own"));
    assert_eq!(requests_to(&mock_server, "/x/shared-v2.json").await, 1);
}

#[tokio::test]
async fn test_restart_after_server_error() {
    let mock_server = MockServer::start().await;

    // The minimal section fails once with a 500, then succeeds
    Mock::given(method("GET"))
        .and(path(SECTION_MINIMAL))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let mut controller = RunController::new(&config).unwrap();
    let report = controller.run().await.expect("Crawl failed");

    assert_eq!(report.attempts, 2);
    // Records of the aborted attempt are discarded
    assert_eq!(report.records.len(), 2);
    assert_eq!(
        report.records[0].title.as_deref(),
        Some("EECS 211-0 Fundamentals of Computer Programming II")
    );

    // The second attempt served everything else from the cache
    assert_eq!(requests_to(&mock_server, SCHOOLS).await, 1);
    assert_eq!(requests_to(&mock_server, SECTION_FULL).await, 1);
    assert_eq!(requests_to(&mock_server, SECTION_MINIMAL).await, 2);
    assert!(controller.cache().stats().hits >= 5);
}

#[tokio::test]
async fn test_restart_after_timeout() {
    let mock_server = MockServer::start().await;

    // Slower than the 300ms client timeout, once
    Mock::given(method("GET"))
        .and(path(SECTION_FULL))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(with_sentinel(vec![json!({"topic": "slow"})]))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let report = RunController::new(&config).unwrap().run().await.unwrap();

    assert_eq!(report.attempts, 2);
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.records[0].topic.as_deref(), Some("Systems"));
}

#[tokio::test]
async fn test_cache_serves_second_run_without_network() {
    let mock_server = MockServer::start().await;
    mount_catalog(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);

    let first = RunController::new(&config).unwrap().run().await.unwrap();
    let requests_after_first = mock_server.received_requests().await.unwrap().len();
    assert_eq!(requests_after_first, 6);

    // A fresh controller over the same cache directory
    let mut controller = RunController::new(&config).unwrap();
    let second = controller.run().await.unwrap();

    assert_eq!(mock_server.received_requests().await.unwrap().len(), 6);
    assert_eq!(first.records, second.records);
    assert_eq!(controller.cache().stats().hits, 6);
    assert_eq!(controller.cache().stats().misses, 0);
}

#[tokio::test]
async fn test_malformed_response_is_empty_without_restart() {
    let mock_server = MockServer::start().await;
    mount_single_class(&mock_server).await;
    Mock::given(method("GET"))
        .and(path(EECS_211_SECTIONS))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let mut controller = RunController::new(&config).unwrap();
    let report = controller.run().await.unwrap();

    assert_eq!(report.attempts, 1);
    assert!(report.records.is_empty());
    // Malformed payloads are never cached
    assert_eq!(controller.cache().stats().writes, 3);
}

#[tokio::test]
async fn test_schema_violation_aborts() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, SCHOOLS, vec![json!({"id": "MEAS", "name": "McCormick"})]).await;
    mount_json(&mock_server, MEAS_SUBJECTS, vec![json!({"name": "EECS"})]).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), &dir);
    let err = RunController::new(&config)
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Schema {
            level: Level::Subject,
            ..
        }
    ));
    assert_eq!(err.exit_code(), 3);
}

#[tokio::test]
async fn test_restarts_exhausted() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(&mock_server.uri(), &dir);
    config.run.max_attempts = 3;

    let err = RunController::new(&config)
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::RestartsExhausted { attempts: 3 }));
    assert_eq!(err.exit_code(), 4);
    assert_eq!(requests_to(&mock_server, SCHOOLS).await, 3);
}

#[tokio::test]
async fn test_unreachable_cache_dir_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let mut config = create_test_config("http://127.0.0.1:1", &dir);
    config.output.cache_dir = blocker.join("cache").to_string_lossy().into_owned();

    let err = RunController::new(&config).err().expect("cache dir must fail");
    assert!(matches!(err, CatalogError::CacheIo { .. }));
    assert_eq!(err.exit_code(), 2);
}

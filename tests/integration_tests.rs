use doctor_finder::app::{self, Session};
use doctor_finder::domain::ports::{ConfigProvider, DoctorSource};
use doctor_finder::utils::validation::Validate;
use doctor_finder::{
    ConsultMode, DoctorFinder, FetchState, FilterState, FinderError, HttpDoctorSource, SortBy,
    TomlConfig,
};
use httpmock::prelude::*;
use std::io::Cursor;
use tempfile::TempDir;

fn mock_doctors() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "101",
            "name": "Dr. Sneha Kulkarni",
            "photo": "https://img.example.com/sneha.jpg",
            "specialities": [{"name": "Dentist"}],
            "fees": "₹ 600",
            "experience": "11 Years of experience",
            "languages": ["English", "Marathi"],
            "clinic": {"name": "Pearl Dental", "address": {"locality": "Kothrud", "city": "Pune"}},
            "video_consult": true,
            "in_clinic": true
        },
        {
            "id": "102",
            "name": "Dr. Rahul Verma",
            "photo": "null",
            "specialities": [{"name": "General Physician"}, {"name": "Diabetologist"}],
            "fees": "₹ 400",
            "experience": "22 Years of experience",
            "languages": ["Hindi"],
            "clinic": {"name": "City Care", "address": {"locality": "Baner", "city": "Pune"}},
            "video_consult": false,
            "in_clinic": true
        },
        {
            "id": "103",
            "name": "Dr. Snehal Patil",
            "photo": null,
            "specialities": [{"name": "Dermatologist"}],
            "fees": null,
            "experience": "4 Years of experience",
            "languages": [],
            "clinic": null,
            "video_consult": true,
            "in_clinic": false
        }
    ])
}

fn config_for(server: &MockServer) -> TomlConfig {
    TomlConfig::default().with_endpoint(Some(server.url("/doctors.json")))
}

#[tokio::test]
async fn test_end_to_end_list_with_filters() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(mock_doctors());
    });

    let config = config_for(&server);
    assert!(config.validate().is_ok());
    let mut finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));

    let mut filters = FilterState::new();
    filters.set_mode(ConsultMode::Video);
    filters.set_sort(SortBy::FeesAsc);

    let out = app::list_doctors(&mut finder, &config, &filters, false, None)
        .await
        .unwrap();

    api_mock.assert();
    assert!(!out.contains("Dr. Rahul Verma"));
    let sneha = out.find("Dr. Sneha Kulkarni").unwrap();
    let snehal = out.find("Dr. Snehal Patil").unwrap();
    assert!(sneha < snehal, "missing fee must sort last");
    assert!(out.contains("Location: Kothrud, Pune"));
    assert!(out.contains("Photo: https://via.placeholder.com/80"));
}

#[tokio::test]
async fn test_specialty_filter_matches_any_selected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(200).json_body(mock_doctors());
    });

    let config = config_for(&server);
    let mut finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));
    finder.load().await.unwrap();

    let mut filters = FilterState::new();
    filters.toggle_specialty("Diabetologist", true);
    filters.toggle_specialty("Dermatologist", true);
    let ids: Vec<&str> = finder
        .view(&filters)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, vec!["102", "103"]);

    filters.set_sort(SortBy::ExperienceDesc);
    filters.set_search_term("sneh");
    let ids: Vec<&str> = finder
        .view(&filters)
        .iter()
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, vec!["103"]);

    assert_eq!(
        finder.specialties(),
        vec!["Dentist", "Dermatologist", "Diabetologist", "General Physician"]
    );
}

#[tokio::test]
async fn test_fetch_failure_renders_error_message() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(503);
    });

    let config = config_for(&server);
    let mut finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));
    let err = finder.load().await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, FinderError::HttpStatus { status: 503, .. }));
    assert!(matches!(finder.state(), FetchState::Failed(_)));

    let rendered = doctor_finder::view::render_results(finder.state(), &[], config.placeholder_photo());
    assert!(rendered.starts_with("Error loading doctors: API returned status 503"));
}

#[tokio::test]
async fn test_export_json_to_file() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(200).json_body(mock_doctors());
    });

    let temp_dir = TempDir::new().unwrap();
    let export_path = temp_dir.path().join("exports").join("pune.json");
    let config = config_for(&server);
    let mut finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));

    let mut filters = FilterState::new();
    filters.set_mode(ConsultMode::Clinic);
    app::list_doctors(&mut finder, &config, &filters, false, Some(&export_path))
        .await
        .unwrap();

    let exported: Vec<doctor_finder::Doctor> =
        serde_json::from_slice(&std::fs::read(&export_path).unwrap()).unwrap();
    let ids: Vec<&str> = exported.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["101", "102"]);
}

#[tokio::test]
async fn test_unsupported_export_extension() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(200).json_body(mock_doctors());
    });

    let config = config_for(&server);
    let mut finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));
    let result = app::list_doctors(
        &mut finder,
        &config,
        &FilterState::new(),
        false,
        Some(std::path::Path::new("doctors.xml")),
    )
    .await;

    assert!(matches!(result, Err(FinderError::UnsupportedExport { .. })));
}

#[tokio::test]
async fn test_interactive_session_over_http() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/doctors.json");
        then.status(200).json_body(mock_doctors());
    });

    let config = config_for(&server);
    let finder = DoctorFinder::new(HttpDoctorSource::from_config(&config));
    let mut session = Session::new(finder, &config);

    let script = "type sneh\nup\nenter\nbook 103\nrefetch\nquit\n";
    let mut out = Vec::new();
    session
        .run(Cursor::new(script.as_bytes()), &mut out)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    api_mock.assert_hits(2);
    assert_eq!(session.filters().search_term, "Dr. Snehal Patil");
    assert!(out.contains("  > 2. Dr. Snehal Patil"));
    assert!(out.contains("Booking appointment with Dr. Snehal Patil"));
}

#[tokio::test]
async fn test_config_file_drives_source() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/custom.json");
        then.status(200).json_body(mock_doctors());
    });

    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("doctor-finder.toml");
    let content = format!(
        r#"
[source]
endpoint = "{}"
timeout_seconds = 5

[display]
suggestion_limit = 1
"#,
        server.url("/custom.json")
    );
    tokio::fs::write(&config_path, content).await.unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    assert!(config.validate().is_ok());

    let source = HttpDoctorSource::from_config(&config);
    assert_eq!(source.describe(), server.url("/custom.json"));
    let mut finder = DoctorFinder::new(source);

    let out = app::suggest_names(&mut finder, &config, "sneh").await.unwrap();
    api_mock.assert();
    assert_eq!(out, "Dr. Sneha Kulkarni  [101]\n");
}

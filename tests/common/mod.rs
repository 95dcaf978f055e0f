//! Shared fixtures: a small module database with two study programs and a
//! canned HTTP endpoint standing in for Google

#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use module_catalogue::db::{self, ModuleSource};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};

pub const MODULE_BASE_URL: &str = "https://moses.example.org/modul.html";
pub const PROGRAM_BASE_URL: &str = "https://moses.example.org/studiengang.html";

const SCHEMA: &[&str] = &[
    "CREATE TABLE programs (id INTEGER PRIMARY KEY, title TEXT NOT NULL, degree TEXT NOT NULL, faculty TEXT)",
    "CREATE TABLE study_areas (id INTEGER PRIMARY KEY, title TEXT, program_id INTEGER, parent_id INTEGER)",
    "CREATE TABLE modules (id INTEGER, version INTEGER, title TEXT, ects INTEGER, exam_type TEXT, PRIMARY KEY (id, version))",
    "CREATE TABLE modules_study_areas (module_id INTEGER, module_version INTEGER, study_area_id INTEGER)",
    "CREATE TABLE module_parts (module_id INTEGER, module_version INTEGER, type TEXT)",
];

const DATA: &[&str] = &[
    "INSERT INTO programs VALUES (31, 'Informatik', 'Master of Science', 'IV'), (7, 'Physik', 'Bachelor of Science', 'II')",
    "INSERT INTO study_areas VALUES
        (1, 'Informatik', 31, NULL),
        (2, 'Pflichtbereich', 31, 1),
        (3, 'Wahlpflichtbereich', 31, 1),
        (4, 'Physik', 7, NULL),
        (5, 'Grundlagen', 7, 4)",
    "INSERT INTO modules VALUES
        (100, 1, 'Compilerbau', 6, 'Portfolioprüfung'),
        (101, 2, 'Datenbanken', 6, 'schriftliche Prüfung'),
        (101, 1, 'Datenbanken (alt)', 6, 'schriftliche Prüfung'),
        (102, 1, 'Robotik \"Praxis\"', 9, 'mündliche Prüfung'),
        (200, 1, 'Mechanik', 12, NULL)",
    "INSERT INTO modules_study_areas VALUES
        (101, 2, 2),
        (100, 1, 2),
        (102, 1, 3),
        (100, 1, 3),
        (200, 1, 5)",
    "INSERT INTO module_parts VALUES
        (100, 1, 'VL'),
        (100, 1, 'UE'),
        (100, 1, 'VL'),
        (101, 2, 'VL'),
        (102, 1, 'PJ')",
];

pub async fn seed(pool: &SqlitePool) {
    for statement in SCHEMA.iter().chain(DATA.iter()) {
        sqlx::query(statement).execute(pool).await.unwrap();
    }
}

/// Row source over a freshly seeded in-memory database
pub async fn memory_source() -> ModuleSource {
    let pool = db::connect_memory().await.unwrap();
    seed(&pool).await;
    ModuleSource::new(pool, MODULE_BASE_URL)
}

/// A request as seen by [`FakeEndpoint`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: &'static str,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local HTTP server answering every request with one JSON response
pub struct FakeEndpoint {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeEndpoint {
    pub async fn start(status: u16, body: &'static str) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(answer).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, requests }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// The only request received, failing if there were more or none
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {:?}", requests);
        requests[0].clone()
    }
}

async fn answer(
    State(state): State<FakeState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    state.requests.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// HTTP client that never goes through a proxy, for talking to [`FakeEndpoint`]
pub fn local_http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

// tests/api_tests.rs

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use codelab::{
    api::PlatformClient,
    editor::{EditorService, ManualClock},
    routes,
    state::AppState,
    store::SqliteDraftStore,
};
use tokio::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
struct Upload {
    field_name: String,
    file_name: Option<String>,
    content: String,
}

#[derive(Clone)]
struct MockPlatform {
    accept_submissions: bool,
    uploads: Arc<Mutex<Vec<Upload>>>,
}

async fn mock_get_question(Path(id): Path<String>) -> (StatusCode, Json<serde_json::Value>) {
    match id.as_str() {
        "Q1" => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "questionText": "Write a program that prints the sum of two integers."
            })),
        ),
        "Q404" => (StatusCode::OK, Json(serde_json::json!({ "success": false }))),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "boom" })),
        ),
    }
}

async fn mock_submit_code(
    State(platform): State<MockPlatform>,
    mut multipart: Multipart,
) -> Json<serde_json::Value> {
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content = field.text().await.unwrap_or_default();
        platform.uploads.lock().await.push(Upload {
            field_name,
            file_name,
            content,
        });
    }
    Json(serde_json::json!({ "success": platform.accept_submissions }))
}

async fn mock_view_submissions(
    headers: HeaderMap,
    Path(assignment_id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some("Bearer author-token");
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "unauthorized" })),
        );
    }
    if assignment_id == "empty" {
        return (StatusCode::OK, Json(serde_json::json!({ "success": true })));
    }
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "subDetails": [
                { "username": "carol", "rollNumber": "103" },
                { "username": "alice", "rollNumber": "101" },
                { "username": "bob", "rollNumber": "102" }
            ]
        })),
    )
}

/// Spawns the mock CodeLab platform on a random port.
async fn spawn_platform(accept_submissions: bool) -> (String, MockPlatform) {
    let platform = MockPlatform {
        accept_submissions,
        uploads: Arc::new(Mutex::new(Vec::new())),
    };

    let app = Router::new()
        .route("/getQuestion/{id}", get(mock_get_question))
        .route("/submitCode/{id}", post(mock_submit_code))
        .route(
            "/verified/author/viewStudentSubmission/{id}",
            get(mock_view_submissions),
        )
        .with_state(platform.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, platform)
}

/// Spawns the editor service against `platform_url`, backed by an in-memory
/// SQLite draft store and a clock pinned at `clock`.
async fn spawn_app(platform_url: &str, clock: Arc<ManualClock>) -> String {
    let drafts = SqliteDraftStore::connect("sqlite::memory:", 1)
        .await
        .expect("Failed to open draft store");
    let platform = Arc::new(PlatformClient::new(Url::parse(platform_url).unwrap()));

    let editor = EditorService::new(platform.clone(), platform.clone(), Arc::new(drafts), clock);
    let state = AppState {
        editor: Arc::new(editor),
        roster: platform,
    };
    let app = routes::create_router(state, &["http://localhost:5173".to_string()]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://127.0.0.1:{}", listener.local_addr().unwrap().port());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn open_session(
    client: &reqwest::Client,
    address: &str,
    question_id: &str,
) -> serde_json::Value {
    let response = client
        .post(format!("{}/api/sessions", address))
        .json(&serde_json::json!({
            "question_id": question_id,
            "course_ref": "CS101",
            "assignment_ref": "A1"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
    response.json().await.expect("Failed to parse session json")
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;

    let response = reqwest::get(format!("{}/random_path_that_does_not_exist", address))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn draft_survives_into_a_new_session_until_expiry() {
    let (platform_url, _) = spawn_platform(true).await;
    let clock = Arc::new(ManualClock::new(1_000_000));
    let address = spawn_app(&platform_url, clock.clone()).await;
    let client = reqwest::Client::new();

    // 1. First session: question loads, editor starts empty
    let first = open_session(&client, &address, "Q1").await;
    assert_eq!(first["state"], "editing");
    assert_eq!(
        first["prompt_text"],
        "Write a program that prints the sum of two integers."
    );
    assert_eq!(first["source_text"], "");

    // 2. Type something
    let ack: serde_json::Value = client
        .put(format!("{}/api/sessions/{}/code", address, first["id"].as_str().unwrap()))
        .json(&serde_json::json!({ "source_text": "int main(){return 0;}" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ack["draft_saved"], true);
    assert_eq!(ack["draft_expires_at"], 1_300_000);

    // 3. Reopening just before expiry restores the draft
    clock.set(1_299_999);
    let second = open_session(&client, &address, "Q1").await;
    assert_eq!(second["source_text"], "int main(){return 0;}");

    // 4. At expiry it is gone
    clock.set(1_300_000);
    let third = open_session(&client, &address, "Q1").await;
    assert_eq!(third["source_text"], "");
}

#[tokio::test]
async fn failed_question_fetch_still_opens_session() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let rejected = open_session(&client, &address, "Q404").await;
    assert_eq!(rejected["prompt_text"], "Failed to load question.");
    assert_eq!(rejected["state"], "editing");

    let errored = open_session(&client, &address, "Q500").await;
    assert_eq!(errored["prompt_text"], "Error fetching question text.");
}

#[tokio::test]
async fn open_rejects_unsafe_identifiers() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/sessions", address))
        .json(&serde_json::json!({
            "question_id": "../../etc",
            "course_ref": "CS101",
            "assignment_ref": "A1"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn submit_uploads_code_file_and_navigates() {
    let (platform_url, platform) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let session = open_session(&client, &address, "Q1").await;
    let id = session["id"].as_str().unwrap();

    client
        .put(format!("{}/api/sessions/{}/code", address, id))
        .json(&serde_json::json!({ "source_text": "int main(){}" }))
        .send()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/sessions/{}/submit", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["notice"], "Code submitted successfully!");
    assert_eq!(outcome["navigate_to"], "/enrolled/CS101/A1");

    let uploads = platform.uploads.lock().await.clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].field_name, "codeFile");
    assert_eq!(uploads[0].file_name.as_deref(), Some("Q1.c"));
    assert_eq!(uploads[0].content, "int main(){}");

    // The session is retired after a successful submit
    let again = client
        .post(format!("{}/api/sessions/{}/submit", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(again.status().as_u16(), 404);
}

#[tokio::test]
async fn rejected_submit_leaves_session_editable() {
    let (platform_url, _) = spawn_platform(false).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let session = open_session(&client, &address, "Q1").await;
    let id = session["id"].as_str().unwrap();
    client
        .put(format!("{}/api/sessions/{}/code", address, id))
        .json(&serde_json::json!({ "source_text": "int main(){}" }))
        .send()
        .await
        .unwrap();

    let outcome: serde_json::Value = client
        .post(format!("{}/api/sessions/{}/submit", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(outcome["success"], false);
    assert_eq!(outcome["notice"], "Failed to submit code.");
    assert!(outcome.get("navigate_to").is_none());

    let snapshot: serde_json::Value = client
        .get(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["state"], "editing");
    assert_eq!(snapshot["source_text"], "int main(){}");
}

#[tokio::test]
async fn keystroke_flag_and_dismissal() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let session = open_session(&client, &address, "Q1").await;
    let id = session["id"].as_str().unwrap();

    let verdict: serde_json::Value = client
        .post(format!("{}/api/sessions/{}/keystrokes", address, id))
        .json(&serde_json::json!({ "keyCode": 33, "ctrlKey": true }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(verdict["prevent_default"], true);
    assert_eq!(verdict["activity"], "suspicious_input_detected");

    let snapshot: serde_json::Value = client
        .delete(format!("{}/api/sessions/{}/activity", address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(snapshot["activity"], "none");
}

#[tokio::test]
async fn closed_session_returns_404() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let session = open_session(&client, &address, "Q1").await;
    let id = session["id"].as_str().unwrap();

    let closed = client
        .delete(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(closed.status().as_u16(), 204);

    let gone = client
        .get(format!("{}/api/sessions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_eq!(gone.status().as_u16(), 404);
}

#[tokio::test]
async fn roster_is_sorted_and_requires_token() {
    let (platform_url, _) = spawn_platform(true).await;
    let address = spawn_app(&platform_url, Arc::new(ManualClock::new(0))).await;
    let client = reqwest::Client::new();

    let anonymous = client
        .get(format!("{}/api/assignments/A1/submissions", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    let default_order: Vec<serde_json::Value> = client
        .get(format!("{}/api/assignments/A1/submissions", address))
        .bearer_auth("author-token")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let rolls: Vec<_> = default_order
        .iter()
        .map(|e| e["rollNumber"].as_str().unwrap())
        .collect();
    assert_eq!(rolls, ["101", "102", "103"]);

    let by_name_desc: Vec<serde_json::Value> = client
        .get(format!(
            "{}/api/assignments/A1/submissions?sort=username&direction=desc",
            address
        ))
        .bearer_auth("author-token")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = by_name_desc
        .iter()
        .map(|e| e["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["carol", "bob", "alice"]);

    let empty: Vec<serde_json::Value> = client
        .get(format!("{}/api/assignments/empty/submissions", address))
        .bearer_auth("author-token")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(empty.is_empty());

    // A token the platform refuses surfaces as a gateway error.
    let refused = client
        .get(format!("{}/api/assignments/A1/submissions", address))
        .bearer_auth("student-token")
        .send()
        .await
        .unwrap();
    assert_eq!(refused.status().as_u16(), 502);
}

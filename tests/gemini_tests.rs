// tests/gemini_tests.rs

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};
use testprep::{config::Config, generator::GeminiClient, routes, state::AppState};

/// What the fake Gemini endpoint answers with.
#[derive(Clone, Copy)]
enum Behaviour {
    Candidates,
    ApiError,
    NotJson,
}

#[derive(Clone)]
struct FakeGemini {
    behaviour: Behaviour,
    requests: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn generate_content(
    State(fake): State<FakeGemini>,
    Query(query): Query<std::collections::HashMap<String, String>>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let key = query.get("key").cloned().unwrap_or_default();
    fake.requests.lock().unwrap().push((key, body));

    match fake.behaviour {
        Behaviour::Candidates => (
            StatusCode::OK,
            Json(json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "Question: What is 2+2? Options: a) 3 b) 4 c) 5 d) 6 Answer: b" }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            })),
        )
            .into_response(),
        Behaviour::ApiError => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": 400, "message": "API key not valid." } })),
        )
            .into_response(),
        Behaviour::NotJson => (StatusCode::OK, "<html>upstream down</html>").into_response(),
    }
}

/// Starts a fake Gemini server and the app pointed at it.
/// Returns the app's base URL and the requests the fake received.
async fn spawn_with_fake(behaviour: Behaviour) -> (String, Arc<Mutex<Vec<(String, Value)>>>) {
    let fake = FakeGemini {
        behaviour,
        requests: Arc::new(Mutex::new(Vec::new())),
    };
    let requests = fake.requests.clone();

    let fake_app = Router::new()
        .route(
            "/v1beta/models/gemini-2.0-flash:generateContent",
            post(generate_content),
        )
        .with_state(fake);
    let fake_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let fake_url = format!("http://{}", fake_listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(fake_listener, fake_app).await.unwrap();
    });

    let address = spawn_app(fake_url.parse().unwrap()).await;
    (address, requests)
}

async fn spawn_app(gemini_url: url::Url) -> String {
    let config = Config::for_endpoint(gemini_url);
    let generator = GeminiClient::new(&config).expect("Failed to build Gemini client");
    let state = AppState::new(Arc::new(generator));
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    address
}

async fn generate(address: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/api/tests", address))
        .json(&json!({
            "subject": "chemistry",
            "chapters": ["Atomic Structure", "Equilibrium"],
            "difficulty": 1,
            "question_count": 12
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn stores_generated_content_raw() {
    let (address, requests) = spawn_with_fake(Behaviour::Candidates).await;

    let response = generate(&address).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();

    let questions = &body["test"]["questions"];
    assert_eq!(questions["role"], "model");
    assert!(
        questions["parts"][0]["text"]
            .as_str()
            .unwrap()
            .starts_with("Question: What is 2+2?")
    );
    assert_eq!(body["test"]["total_questions"], 12);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let (key, sent) = &requests[0];
    assert_eq!(key, "test-key");
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.starts_with(
        "Generate 12 easy level multiple-choice questions for chemistry chapters: Atomic Structure, Equilibrium."
    ));
}

#[tokio::test]
async fn unexpected_shape_stores_placeholder() {
    let (address, _) = spawn_with_fake(Behaviour::ApiError).await;

    let response = generate(&address).await;
    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["test"]["questions"], "No questions generated.");
}

#[tokio::test]
async fn non_json_body_aborts_creation() {
    let (address, requests) = spawn_with_fake(Behaviour::NotJson).await;

    let response = generate(&address).await;
    assert_eq!(response.status().as_u16(), 502);
    assert_eq!(requests.lock().unwrap().len(), 1);

    let history: Vec<Value> = reqwest::get(format!("{}/api/tests", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn unreachable_service_aborts_creation() {
    // Grab a free port, then close it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let address = spawn_app(dead_url.parse().unwrap()).await;

    let response = generate(&address).await;
    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to generate questions. Try again.");
}

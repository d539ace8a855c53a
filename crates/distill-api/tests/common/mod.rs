use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use distill_api::{router, state::ApiState};
use distill_search::{CategoryRecord, MemoryStore, SectionRecord, TopicRecord};
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn category(id: &str, title: &str, description: &str) -> CategoryRecord {
    CategoryRecord {
        category_id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        icon: Some("Brain".to_string()),
        color: Some("from-purple-500 to-pink-500".to_string()),
    }
}

pub fn topic(
    id: &str,
    title: &str,
    description: &str,
    tags: &[&str],
    category_id: &str,
    updated_at: Option<&str>,
    content: Value,
) -> TopicRecord {
    TopicRecord {
        topic_id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        difficulty: Some("Intermediate".to_string()),
        read_time: Some("10 min".to_string()),
        updated_at: updated_at.map(str::to_string),
        category_id: Some(category_id.to_string()),
        content,
    }
}

/// Handbook fixture shared by the integration tests
pub fn sample_store() -> MemoryStore {
    MemoryStore::new()
        .with_sections(vec![
            SectionRecord {
                section_id: "advanced".to_string(),
                title: "Advanced".to_string(),
                description: None,
                position: 2,
            },
            SectionRecord {
                section_id: "foundations".to_string(),
                title: "Foundations".to_string(),
                description: Some("Start here".to_string()),
                position: 1,
            },
        ])
        .with_categories(vec![
            category("ml", "Machine Learning", "Classical learning algorithms"),
            category("llms", "Large Language Models", "Prompting, fine-tuning and agents"),
        ])
        .with_topics(vec![
            topic(
                "transformer-architecture",
                "Transformer Architecture",
                "How modern language models are built",
                &["Theory"],
                "llms",
                Some("2025-01-10T08:00:00Z"),
                json!({ "body": "..." }),
            ),
            topic(
                "gradient-descent",
                "Gradient Descent",
                "Optimizing model parameters step by step",
                &["Optimization", "Theory"],
                "ml",
                Some("2024-06-01"),
                json!({
                    "quiz": [
                        {
                            "question": "What does the learning rate control?",
                            "options": ["Step size", "Batch size", "Model depth"]
                        },
                        {
                            "question": "Which variant samples mini-batches?",
                            "options": ["SGD", "Newton's method"]
                        }
                    ]
                }),
            ),
            topic(
                "retrieval-augmented-generation",
                "Retrieval Augmented Generation",
                "Grounding answers in retrieved documents",
                &["Practice"],
                "llms",
                None,
                json!({ "quiz": [] }),
            ),
        ])
}

/// Test state builder for an in-memory backed `ApiState`
pub struct TestStateBuilder {
    store: Arc<MemoryStore>,
    search_max_query_length: usize,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            store: Arc::new(sample_store()),
            search_max_query_length: 200,
        }
    }

    pub fn store(mut self, store: MemoryStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn search_max_query_length(mut self, max: usize) -> Self {
        self.search_max_query_length = max;
        self
    }

    /// Build the state and keep a handle on the store for assertions
    pub fn build(self) -> (ApiState, Arc<MemoryStore>) {
        let state = ApiState {
            store: self.store.clone(),
            search_max_query_length: self.search_max_query_length,
        };
        (state, self.store)
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a test client over the full router
pub fn client(state: ApiState) -> TestClient {
    TestClient::new(router::router().with_state(state))
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and get the response
    pub async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        TestResponse {
            status,
            body: body_bytes.to_vec(),
            headers,
        }
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request");

        self.request(request).await
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
    #[allow(dead_code)]
    pub headers: HeaderMap,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn json<T: for<'de> Deserialize<'de>>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Assert status code
    pub fn assert_status(&self, expected: StatusCode) {
        assert_eq!(
            self.status,
            expected,
            "Expected status {}, got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
    }
}

use axum::extract::{Multipart, Path, State};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use knowledge_frontend::config::{
    KnowledgeServiceSettings, ServerSettings, Settings, TelemetrySettings,
};
use knowledge_frontend::startup::Application;

pub const TEST_SPACE: &str = "demo-space";

/// A request the stub knowledge service saw.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub operation: String,
    pub space: String,
    pub body: Value,
}

/// In-process stand-in for the knowledge service REST API.
#[derive(Clone)]
pub struct StubKnowledge {
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    list_response: Arc<Mutex<Value>>,
    action_response: Arc<Mutex<Value>>,
}

impl Default for StubKnowledge {
    fn default() -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            list_response: Arc::new(Mutex::new(list_ok(vec![], 0))),
            action_response: Arc::new(Mutex::new(json!({ "success": true }))),
        }
    }
}

impl StubKnowledge {
    fn record(&self, operation: &str, space: String, body: Value) {
        self.requests.lock().unwrap().push(RecordedRequest {
            operation: operation.to_string(),
            space,
            body,
        });
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/knowledge/:space/document/list", post(stub_list))
            .route("/knowledge/:space/document/sync", post(stub_sync))
            .route("/knowledge/:space/document/add", post(stub_add))
            .route("/knowledge/:space/document/upload", post(stub_upload))
            .with_state(self.clone())
    }
}

async fn stub_list(
    State(stub): State<StubKnowledge>,
    Path(space): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record("list", space, body.clone());

    let mut response = stub.list_response.lock().unwrap().clone();
    // Echo the requested page the way the real service does.
    if let (Some(page), Some(data)) = (body.get("page"), response.get_mut("data")) {
        if data.is_object() {
            data["page"] = page.clone();
        }
    }
    Json(response)
}

async fn stub_sync(
    State(stub): State<StubKnowledge>,
    Path(space): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record("sync", space, body);
    Json(stub.action_response.lock().unwrap().clone())
}

async fn stub_add(
    State(stub): State<StubKnowledge>,
    Path(space): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record("add", space, body);
    Json(stub.action_response.lock().unwrap().clone())
}

async fn stub_upload(
    State(stub): State<StubKnowledge>,
    Path(space): Path<String>,
    mut multipart: Multipart,
) -> Json<Value> {
    let mut body = json!({});
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "doc_file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.unwrap_or_default();
                body["file_name"] = json!(file_name);
                body["size"] = json!(data.len());
            }
            _ => {
                let value = field.text().await.unwrap_or_default();
                body[name.as_str()] = json!(value);
            }
        }
    }
    stub.record("upload", space, body);
    Json(stub.action_response.lock().unwrap().clone())
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub stub: StubKnowledge,
}

impl TestApp {
    pub async fn spawn() -> Self {
        knowledge_frontend::services::metrics::init_metrics();

        // Stub knowledge service on a random port.
        let stub = StubKnowledge::default();
        let stub_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let stub_port = stub_listener.local_addr().unwrap().port();
        let stub_router = stub.router();
        tokio::spawn(async move {
            axum::serve(stub_listener, stub_router).await.ok();
        });

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port for testing
            },
            knowledge_service: KnowledgeServiceSettings {
                url: format!("http://127.0.0.1:{}", stub_port),
            },
            telemetry: TelemetrySettings::default(),
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            client,
            stub,
        }
    }

    pub fn set_list_response(&self, value: Value) {
        *self.stub.list_response.lock().unwrap() = value;
    }

    pub fn set_action_response(&self, value: Value) {
        *self.stub.action_response.lock().unwrap() = value;
    }

    pub fn recorded(&self, operation: &str) -> Vec<RecordedRequest> {
        self.stub
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.operation == operation)
            .cloned()
            .collect()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.recorded(operation).len()
    }

    /// Load the documents page for the test space and return its HTML.
    pub async fn get_documents_page(&self) -> String {
        self.client
            .get(format!("{}/documents?name={}", self.address, TEST_SPACE))
            .send()
            .await
            .expect("Failed to load documents page")
            .text()
            .await
            .expect("Failed to read documents page body")
    }

    /// Open the wizard and pick a datasource type, as the UI would.
    pub async fn open_wizard_with_type(&self, document_type: &str) -> String {
        self.client
            .post(format!("{}/documents/wizard/open", self.address))
            .form(&[("name", TEST_SPACE)])
            .send()
            .await
            .expect("Failed to open wizard");

        self.client
            .post(format!("{}/documents/wizard/choose", self.address))
            .form(&[("name", TEST_SPACE), ("document_type", document_type)])
            .send()
            .await
            .expect("Failed to choose datasource type")
            .text()
            .await
            .expect("Failed to read wizard body")
    }
}

pub fn doc_json(id: i64, name: &str, status: &str, result: Option<&str>) -> Value {
    json!({
        "id": id,
        "doc_name": name,
        "doc_type": "TEXT",
        "chunk_size": 12,
        "last_sync": "2026-07-12T10:03:09",
        "status": status,
        "result": result,
    })
}

pub fn list_ok(documents: Vec<Value>, total: u64) -> Value {
    json!({
        "success": true,
        "data": {
            "data": documents,
            "total": total,
            "page": 1,
        },
    })
}

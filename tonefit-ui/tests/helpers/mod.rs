//! Stub backend for integration tests
//!
//! Serves `/predict-color` and `/recommend` on an ephemeral local port,
//! records what each request carried, and answers with scripted replies.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Multipart, Query, RawQuery, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scripted reply for one endpoint
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub body: String,
}

impl StubReply {
    pub fn json(value: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body: value.to_string(),
        }
    }

    pub fn error(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

/// One multipart part received by `/predict-color`
#[derive(Debug, Clone)]
pub struct RecordedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub len: usize,
}

/// One request received by `/recommend`
#[derive(Debug, Clone)]
pub struct RecordedRecommend {
    pub raw_query: Option<String>,
    pub params: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body_len: usize,
}

#[derive(Clone)]
struct StubState {
    predict_reply: Arc<Mutex<StubReply>>,
    recommend_reply: Arc<Mutex<StubReply>>,
    uploads: Arc<Mutex<Vec<Vec<RecordedPart>>>>,
    recommends: Arc<Mutex<Vec<RecordedRecommend>>>,
}

/// Running stub backend
pub struct StubBackend {
    pub base_url: String,
    state: StubState,
}

impl StubBackend {
    /// Start a backend answering both endpoints with the given replies
    pub async fn start(predict_reply: StubReply, recommend_reply: StubReply) -> Self {
        let state = StubState {
            predict_reply: Arc::new(Mutex::new(predict_reply)),
            recommend_reply: Arc::new(Mutex::new(recommend_reply)),
            uploads: Arc::new(Mutex::new(Vec::new())),
            recommends: Arc::new(Mutex::new(Vec::new())),
        };

        let router = Router::new()
            .route("/predict-color", post(predict_color))
            .route("/recommend", post(recommend))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind stub backend");
        let addr = listener.local_addr().expect("Should have local address");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Stub backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn set_predict_reply(&self, reply: StubReply) {
        *self.state.predict_reply.lock().unwrap() = reply;
    }

    pub fn set_recommend_reply(&self, reply: StubReply) {
        *self.state.recommend_reply.lock().unwrap() = reply;
    }

    /// Multipart parts of every prediction request, in arrival order
    pub fn uploads(&self) -> Vec<Vec<RecordedPart>> {
        self.state.uploads.lock().unwrap().clone()
    }

    /// Every recommendation request, in arrival order
    pub fn recommends(&self) -> Vec<RecordedRecommend> {
        self.state.recommends.lock().unwrap().clone()
    }
}

/// Base URL of a port nothing listens on
pub async fn closed_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn predict_color(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.expect("Should read multipart") {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.expect("Should read part bytes");
        parts.push(RecordedPart {
            name,
            file_name,
            content_type,
            len: bytes.len(),
        });
    }
    state.uploads.lock().unwrap().push(parts);

    let reply = state.predict_reply.lock().unwrap().clone();
    (reply.status, [(header::CONTENT_TYPE, "application/json")], reply.body)
}

async fn recommend(
    State(state): State<StubState>,
    RawQuery(raw_query): RawQuery,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    state.recommends.lock().unwrap().push(RecordedRecommend {
        raw_query,
        params,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body_len: body.len(),
    });

    let reply = state.recommend_reply.lock().unwrap().clone();
    (reply.status, [(header::CONTENT_TYPE, "application/json")], reply.body)
}

/// Prediction body as the backend sends it
pub fn prediction_json(class: &str, note: Option<&str>) -> Value {
    let mut body = json!({
        "predicted_class": class,
        "confidence": 0.82,
        "class_probabilities": {
            "spring": 0.05, "summer": 0.82, "autumn": 0.03, "winter": 0.10
        },
        "all_probs": [0.05, 0.82, 0.03, 0.10]
    });
    if let Some(note) = note {
        body["note"] = json!(note);
    }
    body
}

/// Product object as the backend sends it
pub fn product_json(id: &str, price: Option<u32>) -> Value {
    json!({
        "id": id,
        "brand": "롬앤",
        "name": format!("쥬시 래스팅 틴트 {}", id),
        "option_name": "08 애플 브라운",
        "price": price,
        "price_str": price.map(|p| format!("{}원", p)).unwrap_or_else(|| "가격 정보 없음".to_string()),
        "img_url": format!("https://img.example/{}.jpg", id),
        "shade_hex": if price.is_some() { json!("#b5524a") } else { Value::Null },
        "product_url": format!("https://shop.example/{}", id),
        "reason": "웜톤에 어울리는 코랄 계열"
    })
}

/// Recommendation body as the backend sends it
pub fn search_json(products: Vec<Value>, personal_color: &str, query: &str) -> Value {
    json!({
        "total_found": products.len(),
        "products": products,
        "personal_color": personal_color,
        "query": query
    })
}

/// Tiny JPEG-looking payload
pub fn jpeg_bytes() -> Vec<u8> {
    vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46]
}

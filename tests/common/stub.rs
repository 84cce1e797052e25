//! In-process stand-in for the catalog HTTP API.
//!
//! Serves the `/v1/public/characters` envelope from a fixed record list and
//! records every query it receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};

pub const ART: &str = "http://i.annihil.us/u/prod/marvel/i/mg/3/40/4bb4680432f73";

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ok,
    ServerError,
    RateLimited,
}

pub struct Stub {
    pub records: Vec<Value>,
    pub mode: Mutex<Mode>,
    pub queries: Mutex<Vec<HashMap<String, String>>>,
}

pub fn record(id: u64, name: &str, with_art: bool) -> Value {
    let thumbnail = if with_art {
        json!({ "path": ART, "extension": "jpg" })
    } else {
        json!({
            "path": "http://i.annihil.us/u/prod/marvel/i/mg/b/40/image_not_available",
            "extension": "jpg"
        })
    };
    json!({
        "id": id,
        "name": name,
        "description": "",
        "modified": "2014-04-29T14:18:17-0400",
        "thumbnail": thumbnail,
        "comics": { "available": 2, "returned": 1, "items": [{ "resourceURI": "x", "name": "Comic" }] },
        "urls": [{ "type": "detail", "url": "http://marvel.com/characters" }]
    })
}

pub fn envelope(offset: usize, limit: usize, total: usize, results: Vec<Value>) -> Value {
    json!({
        "code": 200,
        "status": "Ok",
        "data": {
            "offset": offset,
            "limit": limit,
            "total": total,
            "count": results.len(),
            "results": results,
        }
    })
}

fn failure(mode: Mode) -> Option<Response> {
    match mode {
        Mode::Ok => None,
        Mode::ServerError => Some(
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "code": 500, "status": "Something broke" })),
            )
                .into_response(),
        ),
        Mode::RateLimited => Some(
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, "30")],
                Json(json!({ "code": 429, "status": "You have exceeded your rate limit" })),
            )
                .into_response(),
        ),
    }
}

async fn list_characters(
    State(stub): State<Arc<Stub>>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    stub.queries.lock().push(query.clone());
    if let Some(response) = failure(*stub.mode.lock()) {
        return response;
    }

    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(20);
    if let Some(prefix) = query.get("nameStartsWith") {
        let matches: Vec<Value> = stub
            .records
            .iter()
            .filter(|r| r["name"].as_str().is_some_and(|n| n.starts_with(prefix.as_str())))
            .take(limit)
            .cloned()
            .collect();
        let total = matches.len();
        return Json(envelope(0, limit, total, matches)).into_response();
    }

    let offset: usize = query.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let results: Vec<Value> = stub.records.iter().skip(offset).take(limit).cloned().collect();
    Json(envelope(offset, limit, stub.records.len(), results)).into_response()
}

async fn get_character(
    State(stub): State<Arc<Stub>>,
    Path(id): Path<u64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    stub.queries.lock().push(query);
    if let Some(response) = failure(*stub.mode.lock()) {
        return response;
    }
    match stub.records.iter().find(|r| r["id"] == json!(id)) {
        Some(found) => Json(envelope(0, 1, 1, vec![found.clone()])).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": 404, "status": "We couldn't find that character" })),
        )
            .into_response(),
    }
}

pub async fn spawn_stub(records: Vec<Value>) -> (Arc<Stub>, SocketAddr) {
    let stub = Arc::new(Stub {
        records,
        mode: Mutex::new(Mode::Ok),
        queries: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/v1/public/characters", get(list_characters))
        .route("/v1/public/characters/:id", get(get_character))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (stub, addr)
}

pub fn heroes(n: u64) -> Vec<Value> {
    (1..=n).map(|id| record(id, &format!("Hero {id}"), true)).collect()
}

/// Serve the stub from a dedicated thread, for tests that block on a child process
pub fn spawn_stub_thread(records: Vec<Value>) -> (Arc<Stub>, SocketAddr) {
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let started = spawn_stub(records).await;
            tx.send(started).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use tokio::sync::Notify;

use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

/// Raw backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves requests to the backend and back.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns `TransportError` when no response could be obtained.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// Transport backed by `reqwest`, resolving paths against a base URL.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        }
        .header(ACCEPT, "application/json")
        .header(CONTENT_TYPE, "application/json");

        if let Some(token) = request.bearer.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(ApiResponse { status, body })
    }
}

//
// ─── SCRIPTED TRANSPORT ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

#[derive(Default)]
struct Script {
    routes: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<ApiRequest>,
    observed: usize,
}

/// In-memory transport for tests and prototyping.
///
/// Replies are queued per `(method, path)`; the last queued reply for a route
/// repeats. Unscripted routes answer `404 {"error": "not found"}`.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
    arrived: Arc<Notify>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, method: Method, path: &str, reply: Scripted) {
        self.lock()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Queue a JSON reply.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.push(method, path, Scripted::Respond(ApiResponse::json(status, &body)));
    }

    /// Queue a network failure.
    pub fn fail(&self, method: Method, path: &str, reason: &str) {
        self.push(method, path, Scripted::Fail(reason.to_string()));
    }

    /// Every request seen so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }

    /// Wait for the next request not yet returned by this method.
    pub async fn next_request(&self) -> ApiRequest {
        loop {
            {
                let mut script = self.lock();
                if script.observed < script.requests.len() {
                    let request = script.requests[script.observed].clone();
                    script.observed += 1;
                    return request;
                }
            }
            self.arrived.notified().await;
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = {
            let mut script = self.lock();
            let key = (request.method, request.path.clone());
            script.requests.push(request);
            match script.routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };
        self.arrived.notify_one();

        match reply {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(TransportError::Unavailable(reason)),
            None => Ok(ApiResponse::json(
                404,
                &serde_json::json!({ "error": "not found" }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Post,
            path: path.to_string(),
            bearer: None,
            body: None,
        }
    }

    #[tokio::test]
    async fn scripted_replies_drain_then_repeat_last() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::Post, "/a", 500, serde_json::json!({}));
        transport.respond(Method::Post, "/a", 200, serde_json::json!({}));

        let statuses = [
            transport.send(request("/a")).await.unwrap().status,
            transport.send(request("/a")).await.unwrap().status,
            transport.send(request("/a")).await.unwrap().status,
        ];
        assert_eq!(statuses, [500, 200, 200]);
    }

    #[tokio::test]
    async fn unscripted_routes_are_not_found() {
        let transport = ScriptedTransport::new();
        let response = transport.send(request("/missing")).await.unwrap();
        assert_eq!(response.status, 404);
        assert_eq!(transport.requests_to("/missing").len(), 1);
    }

    #[tokio::test]
    async fn next_request_yields_each_request_once() {
        let transport = ScriptedTransport::new();
        transport.send(request("/one")).await.unwrap();
        transport.send(request("/two")).await.unwrap();
        assert_eq!(transport.next_request().await.path, "/one");
        assert_eq!(transport.next_request().await.path, "/two");
    }

    #[test]
    fn reqwest_transport_joins_base_and_path() {
        let transport = ReqwestTransport::new("http://localhost:5000/");
        assert_eq!(
            transport.url("/api/quiz/1/submit"),
            "http://localhost:5000/api/quiz/1/submit"
        );
    }
}

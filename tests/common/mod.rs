#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pgrest::core::error::PgrestError;
use pgrest::prelude::*;
use pgrest::transport::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

pub const BASE_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "users")]
pub struct User {
    #[record(primary_key)]
    pub username: String,
    pub status: Option<String>,
    pub catchphrase: Option<String>,
    pub age_range: Option<String>,
}

impl User {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            status: Some("ONLINE".to_string()),
            catchphrase: None,
            age_range: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "messages")]
pub struct Message {
    #[record(primary_key)]
    pub id: Option<i64>,
    pub username: String,
    pub message: String,
    pub channel_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Record)]
#[record(table = "kitchen_sink")]
pub struct KitchenSink {
    #[record(primary_key, column = "id")]
    #[serde(rename = "id")]
    pub sink_id: i32,
    pub string_value: Option<String>,
    pub int_value: Option<i32>,
}

/// Records every request and replays queued responses (`200 []` once the queue is empty).
#[derive(Clone, Default)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<pgrest::Result<HttpResponse>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, response: HttpResponse) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn respond_json(&self, status: u16, body: &str) -> &Self {
        self.respond(HttpResponse::new(status, body))
    }

    pub fn fail_with(&self, error: PgrestError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> pgrest::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(200, "[]")))
    }
}

pub fn client_with(options: ClientOptions) -> (Client, MockTransport) {
    let mock = MockTransport::new();
    let client = Client::with_transport(BASE_URL, options, mock.clone());
    (client, mock)
}

pub fn client() -> (Client, MockTransport) {
    client_with(ClientOptions::default())
}

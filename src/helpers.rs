//! Helper utilities shared by the load test programs
//!
//! Provides common functionality for:
//! - HTTP client configuration
//! - Typed views of the board API response envelope
//! - Unique test identity generation
//! - Sending the signup request through the load engine

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use goose::goose::GooseResponse;
use goose::prelude::*;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::TEST_PASSWORD;

/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "/auth/login";

/// Signup endpoint, relative to the base URL
pub const SIGNUP_PATH: &str = "/auth/signup";

/// Post listing endpoint with the fixed first-page query
pub const POSTS_PATH: &str = "/posts?page=0&size=20";

/// Response envelope returned by every board API endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Payload of a successful login response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub access_token: String,
}

/// Creates a configured HTTP client for the setup phase and live tests.
/// The load-generating requests use goose's managed client instead.
pub fn create_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("Failed to create HTTP client")
}

/// Checks that the board API is reachable. Any HTTP response counts as
/// running; only a transport-level failure means the server is down.
pub async fn assert_server_running(client: &Client) -> Result<(), String> {
    let url = format!("{}{}", crate::BASE_URL, POSTS_PATH);

    client
        .get(&url)
        .send()
        .await
        .map(|_| ())
        .map_err(|e| format!("Server not accessible: {}. Make sure the server is running.", e))
}

/// Process-wide iteration counter feeding the identity uniqueness key
static ITERATION: AtomicU64 = AtomicU64::new(0);

/// A freshly generated signup identity, unique for the whole run.
///
/// The uniqueness key composes the virtual-user index, a monotonic iteration
/// counter, and the wall-clock millisecond timestamp, so no two iterations
/// can collide in the target system even across concurrent users.
#[derive(Debug, Clone)]
pub struct TestIdentity {
    pub email: String,
    pub nickname: String,
    pub name: String,
}

impl TestIdentity {
    /// Generates a unique identity tagged with the scenario `prefix`.
    ///
    /// # Arguments
    /// * `prefix` - scenario tag embedded in the email/nickname (e.g. "load")
    /// * `user_index` - index of the virtual user running this iteration
    /// * `display_name` - fixed human-readable name sent in the signup body
    pub fn generate(prefix: &str, user_index: usize, display_name: &str) -> Self {
        let iteration = ITERATION.fetch_add(1, Ordering::Relaxed);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();

        Self {
            email: format!("{}-{}-{}-{}@test.com", prefix, user_index, iteration, timestamp),
            nickname: format!("{}-{}-{}-{}", prefix, user_index, iteration, timestamp),
            name: display_name.to_string(),
        }
    }
}

/// Sends one signup request through the load engine and returns the raw
/// response for check evaluation. The request body is built fresh per
/// iteration; nothing is shared between virtual users.
pub async fn submit_signup(
    user: &mut GooseUser,
    identity: &TestIdentity,
) -> Result<GooseResponse, Box<TransactionError>> {
    let payload = json!({
        "email": identity.email,
        "password": TEST_PASSWORD,
        "nickname": identity.nickname,
        "name": identity.name,
    });

    let request_builder = user
        .get_request_builder(&GooseMethod::Post, SIGNUP_PATH)?
        .json(&payload);

    let signup_request = GooseRequest::builder()
        .method(GooseMethod::Post)
        .path(SIGNUP_PATH)
        .set_request_builder(request_builder)
        .build();

    user.request(signup_request).await
}

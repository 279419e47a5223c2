//! Setup phase: one-time token acquisition
//!
//! Runs in `main` before the load engine starts. Unlike iteration checks,
//! every failure here is fatal: the run aborts with a non-zero exit before a
//! single iteration executes.

use anyhow::{bail, Context};
use serde_json::json;

use crate::context::SetupContext;
use crate::helpers::{create_client, ApiEnvelope, LoginData, LOGIN_PATH};
use crate::{TEST_EMAIL, TEST_PASSWORD};

/// Authenticates the fixed test credential against the login endpoint and
/// returns the shared context for all subsequent iterations.
///
/// Fatal on non-success status, an unparseable response body, or a missing
/// or empty token field.
pub async fn acquire_token(base_url: &str) -> anyhow::Result<SetupContext> {
    let client = create_client();
    let url = format!("{}{}", base_url, LOGIN_PATH);

    let response = client
        .post(&url)
        .json(&json!({
            "email": TEST_EMAIL,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .context("login request failed")?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        bail!("login failed: status {}, body: {}", status, body);
    }

    let envelope: ApiEnvelope<LoginData> = response
        .json()
        .await
        .context("login response was not valid JSON")?;

    let token = envelope
        .data
        .map(|data| data.access_token)
        .unwrap_or_default();

    if !envelope.success || token.is_empty() {
        bail!("login response did not contain an access token");
    }

    tracing::info!("Access token acquired");

    Ok(SetupContext { token })
}

use gloo_net::http::Request;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::Activity;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request; the detail is user-presentable.
    #[error("{0}")]
    Rejected(String),
    /// Transport failure or a body that was not the expected JSON.
    #[error("network request failed: {0}")]
    Network(#[from] gloo_net::Error),
}

// Signup and unregister both answer {"message": …} on success and
// {"detail": …} on rejection.
#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

fn encode(s: &str) -> String {
    js_sys::encode_uri_component(s)
        .as_string()
        .unwrap_or_default()
}

/// Signup and unregister share one path; only the HTTP method differs.
pub fn signup_url(activity: &str, email: &str) -> String {
    format!(
        "/activities/{}/signup?email={}",
        encode(activity),
        encode(email)
    )
}

/// Fetches the whole activity collection, in server order.
pub async fn fetch_activities() -> Result<Vec<(String, Activity)>, ApiError> {
    let resp = Request::get("/activities").send().await?;
    // Status is deliberately not checked here: anything that parses as an
    // object renders, anything else falls out as Network.
    let map: Map<String, Value> = resp.json().await?;
    Ok(map
        .iter()
        .map(|(name, details)| (name.clone(), Activity::from_value(details)))
        .collect())
}

pub async fn signup(activity: &str, email: &str) -> Result<String, ApiError> {
    let resp = Request::post(&signup_url(activity, email)).send().await?;
    let body: MutationResponse = resp.json().await?;
    if resp.ok() {
        Ok(body.message.unwrap_or_default())
    } else {
        Err(ApiError::Rejected(
            body.detail.unwrap_or_else(|| "An error occurred".to_string()),
        ))
    }
}

pub async fn unregister(activity: &str, identifier: &str) -> Result<String, ApiError> {
    let resp = Request::delete(&signup_url(activity, identifier))
        .send()
        .await?;
    let body: MutationResponse = resp.json().await?;
    if resp.ok() {
        Ok(body
            .message
            .unwrap_or_else(|| "Participant removed".to_string()))
    } else {
        Err(ApiError::Rejected(
            body.detail.unwrap_or_else(|| "An error occurred".to_string()),
        ))
    }
}

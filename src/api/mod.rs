// ============================================================================
// src/api/mod.rs – internal API client
// ============================================================================

pub mod transport;
pub mod twofactor;

use crate::config::Config;
use anyhow::Result;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use thiserror::Error;
use transport::{RawResponse, Transport};

const INTERNAL_PREFIX: &str = "/internal";
pub const SECRET_HEADER: &str = "Gateshell-Shared-Secret";

/// Every way a call to the internal API can fail. Nothing escapes this
/// boundary as a panic; the command turns these into its terminal error
/// block using the Display text.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connect, timeout, broken pipe.
    #[error("internal API unreachable")]
    Unreachable,

    /// Non-2xx status without a parsable error body.
    #[error("internal API error ({0})")]
    Status(u16),

    /// The API reported a logical failure; the message is shown verbatim.
    #[error("{0}")]
    Denied(String),

    /// The body was not the JSON shape this client expects.
    #[error("malformed response from internal API")]
    Malformed,
}

/// Error body the API attaches to non-2xx replies.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct Client {
    transport: Transport,
    secret: Option<String>,
}

impl Client {
    /// Pick the transport from the configured URL scheme. Fails fast on a
    /// scheme this client cannot speak.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self {
            transport: Transport::from_config(&cfg.api)?,
            secret: cfg.api.secret.clone(),
        })
    }

    /// One GET against the internal API. Returns the raw 2xx body; non-2xx
    /// and transport failures are folded into ApiError.
    pub fn get(&self, path_and_query: &str) -> Result<Vec<u8>, ApiError> {
        let path = normalize_path(path_and_query);
        let secret_b64 = self
            .secret
            .as_deref()
            .map(|s| BASE64.encode(s.as_bytes()));

        tracing::debug!(path = %path, "internal API request");
        let RawResponse { status, body } = self.transport.get(&path, secret_b64.as_deref())?;

        if !(200..300).contains(&status) {
            tracing::warn!(status, "internal API returned an error status");
            return match serde_json::from_slice::<ErrorBody>(&body) {
                Ok(parsed) => Err(ApiError::Denied(parsed.message)),
                Err(_) => Err(ApiError::Status(status)),
            };
        }

        Ok(body)
    }
}

/// All internal endpoints live under one prefix; callers pass the short
/// path and get the canonical one.
fn normalize_path(path: &str) -> String {
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if path.starts_with(INTERNAL_PREFIX) {
        path
    } else {
        format!("{INTERNAL_PREFIX}{path}")
    }
}

// ============================================================================
// src/api/twofactor.rs – two-factor recovery-code regeneration call
// ============================================================================

use super::{ApiError, Client};
use crate::session::KeyId;
use serde::Deserialize;

const PATH: &str = "/two_factor_recovery_codes";

/// 200 body: `success` decides which of the other two fields is meaningful.
#[derive(Debug, Deserialize)]
struct Response {
    success: bool,
    #[serde(default)]
    recovery_codes: Vec<String>,
    #[serde(default)]
    message: String,
}

/// Regenerate the recovery codes bound to `key_id`. Exactly one request;
/// codes come back in server order. A logical refusal (`success: false`)
/// surfaces its message verbatim as `ApiError::Denied`.
pub fn recovery_codes(client: &Client, key_id: KeyId) -> Result<Vec<String>, ApiError> {
    let body = client.get(&format!("{PATH}?key_id={key_id}"))?;

    let parsed: Response = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!(error = %err, "two_factor_recovery_codes body did not parse");
        ApiError::Malformed
    })?;

    if parsed.success {
        Ok(parsed.recovery_codes)
    } else {
        Err(ApiError::Denied(parsed.message))
    }
}

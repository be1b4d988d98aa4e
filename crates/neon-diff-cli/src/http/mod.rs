//! reqwest-backed clients for the two remote APIs.
//!
//! The pipeline only sees the [`ControlPlaneApi`] and [`ReviewApi`] traits;
//! these modules supply the concrete transports. Every request carries a
//! fixed timeout so a stalled remote cannot hang the run.
//!
//! [`ControlPlaneApi`]: neon_diff_core::api::ControlPlaneApi
//! [`ReviewApi`]: neon_diff_core::api::ReviewApi

pub mod github;
pub mod neon;

use std::time::Duration;

use neon_diff_core::api::ApiResponse;
use neon_diff_core::error::{DiffError, Result};

/// Timeout applied to every remote call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// User-Agent presented to both APIs.
pub(crate) const USER_AGENT: &str = concat!("neon-schema-diff v", env!("CARGO_PKG_VERSION"));

/// Maps a transport failure into the pipeline error type.
pub(crate) fn transport_error(err: &reqwest::Error) -> DiffError {
    DiffError::Transport(err.to_string())
}

/// Decodes a response into the status-plus-body shape the core checks.
///
/// Non-success responses keep their status and carry a default body; the
/// core treats the status as authoritative and never reads the body then.
pub(crate) async fn decode<T>(response: reqwest::Response) -> Result<ApiResponse<T>>
where
    T: serde::de::DeserializeOwned + Default,
{
    let status = response.status().as_u16();
    if !response.status().is_success() {
        return Ok(ApiResponse::new(status, T::default()));
    }
    let data = response
        .json()
        .await
        .map_err(|err| transport_error(&err))?;
    Ok(ApiResponse::new(status, data))
}

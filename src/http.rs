//! Shared HTTP plumbing for the provider adapters.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!("catchment/", env!("CARGO_PKG_VERSION"));

pub(crate) fn client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// Decode a 2xx JSON body; anything else becomes [`Error::Status`].
pub(crate) async fn read_json<T: DeserializeOwned>(provider: &'static str, response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(Error::status(provider, status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| Error::invalid(provider, format!("{}: {}", e, truncate(&body))))
}

pub(crate) fn truncate(body: &str) -> String {
    body.chars().take(Error::BODY_LIMIT).collect()
}

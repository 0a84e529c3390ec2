use crate::config::FetchConfig;
use crate::error::VaultError;
use crate::types::pokemon::PokemonDocument;
use reqwest::StatusCode;
use std::time::Duration;

/// Outcome of fetching one id.
///
/// A non-2xx status is reportable data for the caller, not an error: the
/// loop logs it and moves on without consulting the failure policy.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(PokemonDocument),
    HttpFailure(StatusCode),
}

/// Stateless PokeAPI caller. One GET per id, no retries.
pub struct PokeApi;

impl PokeApi {
    /// GET a single record. 2xx bodies are read and parsed into a document;
    /// non-2xx statuses come back as `HttpFailure` without touching the body.
    pub async fn fetch(
        client: &reqwest::Client,
        fetch: &FetchConfig,
        id: u32,
    ) -> Result<FetchOutcome, VaultError> {
        let url = fetch.endpoint_for(id)?;
        let resp = client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Ok(FetchOutcome::HttpFailure(status));
        }

        let bytes = resp.bytes().await?;
        let doc = PokemonDocument::from_bytes(&bytes)?;
        Ok(FetchOutcome::Fetched(doc))
    }
}

/// Shared HTTP client: short connect window, bounded request time, rustls.
pub fn build_http_client() -> Result<reqwest::Client, VaultError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("pokevault/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(15))
        .build()?;
    Ok(client)
}

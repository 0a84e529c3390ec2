use crate::api::poke_api::{FetchOutcome, PokeApi, build_http_client};
use crate::config::{FailurePolicy, FetchConfig, PolicyConfig};
use crate::db::postgres::{RecordStorage, StoreOutcome};
use crate::error::{FailureKind, VaultError};
use tracing::{debug, error, info, warn};

/// What to do with the remainder of the run after a failed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemDisposition {
    Continue,
    Abort,
}

/// Per-run tally. On a completed run the counters partition the attempted
/// ids: `attempted == inserted + already_present + http_skipped +
/// error_skipped`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSummary {
    pub attempted: u64,
    pub inserted: u64,
    pub already_present: u64,
    pub http_skipped: u64,
    pub error_skipped: u64,
}

impl HarvestSummary {
    /// Ids that produced a parseable document, whether or not the row was new.
    pub fn fetched(&self) -> u64 {
        self.inserted + self.already_present
    }
}

/// Map a failure category to a disposition under the configured policy.
/// Only network and parse failures are configurable; database failures and
/// anything uncategorized always abort.
pub fn decide(policy: &PolicyConfig, kind: FailureKind) -> ItemDisposition {
    let choice = match kind {
        FailureKind::Network => policy.on_network_error,
        FailureKind::Parse => policy.on_parse_error,
        FailureKind::Database | FailureKind::Other => FailurePolicy::Abort,
    };
    match choice {
        FailurePolicy::Abort => ItemDisposition::Abort,
        FailurePolicy::Skip => ItemDisposition::Continue,
    }
}

/// Sequential fetch-and-store pass over a fixed id range.
pub struct Harvester {
    client: reqwest::Client,
    storage: RecordStorage,
    fetch: FetchConfig,
    policy: PolicyConfig,
}

impl Harvester {
    pub fn new(
        storage: RecordStorage,
        fetch: FetchConfig,
        policy: PolicyConfig,
    ) -> Result<Self, VaultError> {
        Ok(Self {
            client: build_http_client()?,
            storage,
            fetch,
            policy,
        })
    }

    /// Visit every id in ascending order, one request at a time.
    ///
    /// Non-2xx responses are logged and skipped. Network and parse failures
    /// go through `decide`; an `Abort` disposition ends the run with the
    /// remaining ids unvisited. Rows are keyed by the id extracted from the
    /// payload, not the id that was requested.
    pub async fn run(&self) -> Result<HarvestSummary, VaultError> {
        let mut summary = HarvestSummary::default();

        for id in self.fetch.id_range() {
            summary.attempted += 1;

            let doc = match PokeApi::fetch(&self.client, &self.fetch, id).await {
                Ok(FetchOutcome::Fetched(doc)) => doc,
                Ok(FetchOutcome::HttpFailure(status)) => {
                    warn!(id, %status, "fetch failed; skipping id");
                    summary.http_skipped += 1;
                    continue;
                }
                Err(e) => match decide(&self.policy, e.kind()) {
                    ItemDisposition::Continue => {
                        warn!(id, error = %e, "fetch failed; policy skips this id");
                        summary.error_skipped += 1;
                        continue;
                    }
                    ItemDisposition::Abort => {
                        error!(id, error = %e, "fetch failed; policy aborts the run");
                        return Err(e);
                    }
                },
            };

            match self.storage.insert_new(doc.id, &doc.body).await? {
                StoreOutcome::Inserted => {
                    info!(id = doc.id, "stored new record");
                    summary.inserted += 1;
                }
                StoreOutcome::AlreadyPresent => {
                    debug!(id = doc.id, "record already present; skipped");
                    summary.already_present += 1;
                }
            }
        }

        Ok(summary)
    }
}

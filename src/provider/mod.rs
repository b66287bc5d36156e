pub mod client;
pub mod types;

use async_trait::async_trait;
use types::ProviderResponse;

/// Remote DNS hosting API surface the zone handlers depend on.
///
/// HTTP-level failure is reported through the `success` flag; `Err` is
/// reserved for transport faults. Callers treat both as the negative branch.
#[async_trait]
pub trait ZoneProvider: Send + Sync {
    async fn create_zone(&self, zone: &str) -> anyhow::Result<ProviderResponse>;
    async fn destroy_zone(&self, zone: &str) -> anyhow::Result<ProviderResponse>;
}

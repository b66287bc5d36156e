use serde::{Deserialize, Serialize};

/// Raw outcome of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub success: bool,
    pub body: String,
}

/// Body the provider returns when a zone has been created.
#[derive(Debug, Serialize, Deserialize)]
pub struct ZoneCreatedBody {
    pub dns_servers: Vec<String>,
}

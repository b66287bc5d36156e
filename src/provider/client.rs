use crate::provider::ZoneProvider;
use crate::provider::types::ProviderResponse;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

#[derive(Clone)]
pub struct DnsProviderClient {
    http: Client,
    base_url: String, // e.g. "https://dns.example-hosting.net/v1"
    api_key: String,
}

impl DnsProviderClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn auth_header(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("X-API-Key", &self.api_key)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn read(res: reqwest::Response) -> anyhow::Result<ProviderResponse> {
        let success = res.status().is_success();
        let body = res.text().await?;
        Ok(ProviderResponse { success, body })
    }
}

#[async_trait]
impl ZoneProvider for DnsProviderClient {
    async fn create_zone(&self, zone: &str) -> anyhow::Result<ProviderResponse> {
        #[derive(Serialize)]
        struct CreateBody<'a> {
            zone: &'a str,
        }

        let url = self.url("zones");
        let res = self
            .auth_header(self.http.post(url))
            .json(&CreateBody { zone })
            .send()
            .await?;
        Self::read(res).await
    }

    async fn destroy_zone(&self, zone: &str) -> anyhow::Result<ProviderResponse> {
        let url = self.url(&format!("zones/{}", zone));
        let res = self.auth_header(self.http.delete(url)).send().await?;
        Self::read(res).await
    }
}

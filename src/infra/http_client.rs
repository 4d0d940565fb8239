use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("lh_schedule/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        // Every load cycle must see the sheet as it is now
        let resp = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = resp.text().await?;
        Ok(HttpGetResult {
            status,
            body,
            content_type,
        })
    }
}

use crate::error::Result;
use async_trait::async_trait;

// Fetch-side port: the only way the pipeline reaches the network
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpGetResult>;
}

#[derive(Clone, Debug)]
pub struct HttpGetResult {
    pub status: u16,
    pub body: String,
    pub content_type: String,
}

impl HttpGetResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

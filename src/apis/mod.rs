pub mod demo;
pub mod sheet;

use crate::app::ports::HttpClientPort;
use crate::config::{SourceConfig, SourceEncoding};
use crate::error::Result;
use crate::infra::http_client::ReqwestHttp;
use crate::parser::create_decoder;
use crate::types::{Performer, RawRow};
use std::sync::Arc;

pub use demo::DemoSource;
pub use sheet::SheetSource;

/// Core trait every schedule source implements
#[async_trait::async_trait]
pub trait TabSource: Send + Sync {
    /// Encoding name, for logs
    fn source_name(&self) -> &'static str;

    /// Fetch one performer's tab as raw rows
    async fn fetch_rows(&self, performer: Performer) -> Result<Vec<RawRow>>;
}

/// Build the configured source over the reqwest HTTP client
pub fn create_source(config: &SourceConfig) -> Result<Arc<dyn TabSource>> {
    let http = Arc::new(ReqwestHttp::new(config.timeout_seconds)?);
    create_source_with_client(config, http)
}

/// Build the configured source over any HTTP client
pub fn create_source_with_client(
    config: &SourceConfig,
    http: Arc<dyn HttpClientPort>,
) -> Result<Arc<dyn TabSource>> {
    match create_decoder(config.encoding) {
        Some(decoder) => Ok(Arc::new(SheetSource::new(
            http,
            decoder,
            &config.base_url,
            &config.tab_param,
        )?)),
        None => {
            debug_assert_eq!(config.encoding, SourceEncoding::Demo);
            Ok(Arc::new(DemoSource::new()))
        }
    }
}

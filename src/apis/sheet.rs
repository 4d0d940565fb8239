use super::TabSource;
use crate::app::ports::HttpClientPort;
use crate::error::{Result, ScheduleError};
use crate::parser::{looks_like_markup, TabDecoder};
use crate::types::{Performer, RawRow};
use reqwest::Url;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Network-backed sheet source: one GET per tab, decoded by the configured
/// encoding
pub struct SheetSource {
    http: Arc<dyn HttpClientPort>,
    decoder: Box<dyn TabDecoder>,
    base_url: Url,
    tab_param: String,
}

impl SheetSource {
    pub fn new(
        http: Arc<dyn HttpClientPort>,
        decoder: Box<dyn TabDecoder>,
        base_url: &str,
        tab_param: &str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url.trim()).map_err(|e| {
            ScheduleError::Config(format!("Invalid source base_url '{base_url}': {e}"))
        })?;
        Ok(Self {
            http,
            decoder,
            base_url,
            tab_param: tab_param.to_string(),
        })
    }

    /// URL for one performer's tab; the tab name is query-encoded
    pub fn tab_url(&self, performer: Performer) -> String {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair(&self.tab_param, performer.tab_name());
        url.to_string()
    }
}

#[async_trait::async_trait]
impl TabSource for SheetSource {
    fn source_name(&self) -> &'static str {
        self.decoder.encoding()
    }

    #[instrument(skip(self))]
    async fn fetch_rows(&self, performer: Performer) -> Result<Vec<RawRow>> {
        let url = self.tab_url(performer);
        debug!("Fetching tab from {}", url);

        let response = self.http.get(&url).await?;
        if !response.is_success() {
            return Err(ScheduleError::unavailable(format!(
                "tab {} responded with HTTP {}",
                performer, response.status
            )));
        }

        let preview: String = response.body.chars().take(200).collect();
        debug!(content_type = %response.content_type, "Body preview: {}", preview);

        if looks_like_markup(&response.body) {
            warn!("Tab {} returned HTML (sheet not public?)", performer);
            return Err(ScheduleError::unavailable(format!(
                "tab {performer} returned an HTML page instead of data"
            )));
        }

        let rows = self.decoder.decode(&response.body)?;
        info!("Fetched {} raw rows for {}", rows.len(), performer);
        Ok(rows)
    }
}

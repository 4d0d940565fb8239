use super::normalize::{belongs_to, missing_fields, normalize};
use super::schedule::{process, PastShowPolicy, Schedule};
use crate::apis::TabSource;
use crate::error::ErrorKind;
use crate::types::{Performer, RawRow};
use chrono::NaiveDate;
use futures::future::join_all;
use metrics::counter;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabFailure {
    pub kind: ErrorKind,
    pub message: String,
}

/// One tab's result. A failed tab carries no rows.
#[derive(Debug, Clone)]
pub struct TabFetch {
    pub performer: Performer,
    pub rows: Vec<RawRow>,
    pub failure: Option<TabFailure>,
}

/// Every roster tab's result, in roster order
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tabs: Vec<TabFetch>,
}

impl LoadOutcome {
    pub fn has_failures(&self) -> bool {
        self.tabs.iter().any(|t| t.failure.is_some())
    }

    pub fn failed_performers(&self) -> Vec<Performer> {
        self.tabs
            .iter()
            .filter(|t| t.failure.is_some())
            .map(|t| t.performer)
            .collect()
    }

    /// Normalize, filter and sort every tab
    pub fn into_schedule(self, today: NaiveDate, policy: PastShowPolicy) -> Schedule {
        let mut schedule = Schedule::empty();
        for tab in self.tabs {
            let performer = tab.performer;
            if let Some(first) = tab.rows.first() {
                let missing = missing_fields(first);
                if !missing.is_empty() {
                    debug!("{} tab has no column for: {}", performer, missing.join(", "));
                }
            }
            let shows = tab
                .rows
                .iter()
                .filter(|row| belongs_to(row, performer))
                .map(|row| normalize(row, performer))
                .collect();
            let shows = process(shows, today, policy);
            debug!("{} has {} shows after processing", performer, shows.len());
            schedule.members.insert(performer, shows);
        }
        schedule
    }
}

/// Fetch one tab. Failures are logged and turned into an empty tab.
#[instrument(skip(source), fields(encoding = source.source_name()))]
pub async fn fetch_tab(source: &dyn TabSource, performer: Performer) -> TabFetch {
    match source.fetch_rows(performer).await {
        Ok(rows) => {
            counter!(
                "lh_tab_fetch_total",
                "performer" => performer.tab_name(),
                "outcome" => "ok"
            )
            .increment(1);
            TabFetch {
                performer,
                rows,
                failure: None,
            }
        }
        Err(e) => {
            let kind = e.kind();
            warn!("Tab {} failed ({}): {}", performer, kind.as_str(), e);
            counter!(
                "lh_tab_fetch_total",
                "performer" => performer.tab_name(),
                "outcome" => kind.as_str()
            )
            .increment(1);
            TabFetch {
                performer,
                rows: Vec::new(),
                failure: Some(TabFailure {
                    kind,
                    message: e.to_string(),
                }),
            }
        }
    }
}

/// Fetch every roster tab concurrently; resolves once all have settled
pub async fn load_all(source: &dyn TabSource) -> LoadOutcome {
    let tabs = join_all(Performer::ALL.into_iter().map(|p| fetch_tab(source, p))).await;
    let outcome = LoadOutcome { tabs };
    let failed = outcome.failed_performers();
    if failed.is_empty() {
        info!("Loaded {} tabs", outcome.tabs.len());
    } else {
        info!("Loaded {} tabs, failed: {:?}", outcome.tabs.len(), failed);
    }
    outcome
}

/// Like `load_all`, but returns `None` if `cancel` fires first. Results that
/// arrive after cancellation are discarded.
pub async fn load_schedule(
    source: &dyn TabSource,
    cancel: &CancellationToken,
) -> Option<LoadOutcome> {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        outcome = load_all(source) => Some(outcome),
    };
    if outcome.is_none() || cancel.is_cancelled() {
        info!("Load cancelled; discarding in-flight results");
        return None;
    }
    outcome
}

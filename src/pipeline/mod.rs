pub mod dates;
pub mod loader;
pub mod normalize;
pub mod query;
pub mod schedule;
pub mod state;

use crate::apis::TabSource;
use chrono::{Local, NaiveDate};
use state::ScheduleBoard;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Local calendar date used as the "past show" cutoff
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// One full load cycle into `board`. Returns `false` when the load was
/// cancelled and nothing was applied.
#[instrument(skip_all, fields(source = source.source_name()))]
pub async fn refresh(
    board: &mut ScheduleBoard,
    source: &dyn TabSource,
    cancel: &CancellationToken,
    today: NaiveDate,
) -> bool {
    board.begin_load();
    match loader::load_schedule(source, cancel).await {
        Some(outcome) => {
            board.apply_load(outcome, today);
            true
        }
        None => {
            board.abandon_load();
            false
        }
    }
}

use super::loader::LoadOutcome;
use super::query::{apply_filters, FilterSelection, Selection};
use super::schedule::{FilterFacets, PastShowPolicy, Schedule};
use crate::constants::LOAD_ERROR_MESSAGE;
use crate::types::{Performer, Show};
use chrono::NaiveDate;
use tracing::debug;

/// What the presentation layer reads: flags, facets, and the filtered view
#[derive(Debug, Clone)]
pub struct ScheduleBoard {
    loading: bool,
    error: Option<String>,
    schedule: Schedule,
    facets: FilterFacets,
    selection: FilterSelection,
    view: Schedule,
    policy: PastShowPolicy,
}

impl ScheduleBoard {
    pub fn new(policy: PastShowPolicy) -> Self {
        Self {
            loading: false,
            error: None,
            schedule: Schedule::empty(),
            facets: FilterFacets::default(),
            selection: FilterSelection::default(),
            view: Schedule::empty(),
            policy,
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn facets(&self) -> &FilterFacets {
        &self.facets
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Filtered shows for one performer
    pub fn shows_for(&self, performer: Performer) -> &[Show] {
        self.view.shows_for(performer)
    }

    /// Unfiltered processed shows for one performer
    pub fn all_shows_for(&self, performer: Performer) -> &[Show] {
        self.schedule.shows_for(performer)
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Replace the whole schedule with a fresh load. Facets are rebuilt and
    /// the current selection is reapplied.
    pub fn apply_load(&mut self, outcome: LoadOutcome, today: NaiveDate) {
        self.error = outcome
            .has_failures()
            .then(|| LOAD_ERROR_MESSAGE.to_string());
        self.schedule = outcome.into_schedule(today, self.policy);
        self.facets = self.schedule.facets();
        self.loading = false;
        self.recompute();
    }

    /// A load that was cancelled or torn down leaves the data untouched
    pub fn abandon_load(&mut self) {
        self.loading = false;
    }

    pub fn set_month(&mut self, month: Selection) {
        self.selection.month = month;
        self.recompute();
    }

    pub fn set_city(&mut self, city: Selection) {
        self.selection.city = city;
        self.recompute();
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
        self.recompute();
    }

    pub fn reset_filters(&mut self) {
        self.set_selection(FilterSelection::default());
    }

    fn recompute(&mut self) {
        let mut view = Schedule::empty();
        for (performer, shows) in &self.schedule.members {
            view.members
                .insert(*performer, apply_filters(shows, &self.selection));
        }
        debug!(
            month = %self.selection.month,
            city = %self.selection.city,
            "Recomputed view with {} shows",
            view.all_shows().count()
        );
        self.view = view;
    }
}

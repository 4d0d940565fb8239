//! Display adapter: turns the board into cards and columns. No business rules
//! live here beyond label formatting.

use crate::constants::ALL_SELECTION;
use crate::pipeline::dates::month_label;
use crate::pipeline::state::ScheduleBoard;
use crate::types::{Performer, Show};
use serde::Serialize;
use std::fmt::Write as _;

pub const EMPTY_COLUMN_TEXT: &str = "No upcoming shows match your filters.";
const SOLD_OUT_NOTE: &str = "No tickets available";
const PENDING_NOTE: &str = "Details coming soon";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowCard {
    pub when: String,
    pub venue: String,
    pub city: String,
    pub sold_out: bool,
    /// Present only when a link exists and the show is not sold out
    pub ticket_url: Option<String>,
    pub note: Option<&'static str>,
}

impl From<&Show> for ShowCard {
    fn from(show: &Show) -> Self {
        let when = match show.starts_at {
            Some(at) => at.format("%a, %b %-d, %-I:%M %p").to_string(),
            None => show.date.clone(),
        };
        let ticket_url = show.ticket_url.clone().filter(|_| !show.sold_out);
        let note = match (&ticket_url, show.sold_out) {
            (Some(_), _) => None,
            (None, true) => Some(SOLD_OUT_NOTE),
            (None, false) => Some(PENDING_NOTE),
        };
        ShowCard {
            when,
            venue: show.venue.clone(),
            city: show.city.clone(),
            sold_out: show.sold_out,
            ticket_url,
            note,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberColumn {
    pub name: &'static str,
    pub shows: Vec<ShowCard>,
    /// Upcoming shows before the month and city filters
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

/// Everything a page needs to render the live shows grid
#[derive(Debug, Clone, Serialize)]
pub struct ShowsPage {
    pub loading: bool,
    pub error: Option<String>,
    pub month: String,
    pub city: String,
    /// False when both filters are back at "all"
    pub filtered: bool,
    pub months: Vec<FacetOption>,
    pub cities: Vec<FacetOption>,
    pub members: Vec<MemberColumn>,
}

impl ShowsPage {
    pub fn from_board(board: &ScheduleBoard) -> Self {
        let members = Performer::ALL
            .into_iter()
            .map(|p| MemberColumn {
                name: p.tab_name(),
                shows: board.shows_for(p).iter().map(ShowCard::from).collect(),
                total: board.all_shows_for(p).len(),
            })
            .collect();

        let mut months = vec![FacetOption {
            value: ALL_SELECTION.to_string(),
            label: "All months".to_string(),
        }];
        months.extend(board.facets().months.iter().map(|m| FacetOption {
            value: m.clone(),
            label: month_label(m),
        }));

        let mut cities = vec![FacetOption {
            value: ALL_SELECTION.to_string(),
            label: "All cities".to_string(),
        }];
        cities.extend(board.facets().cities.iter().map(|c| FacetOption {
            value: c.clone(),
            label: c.clone(),
        }));

        ShowsPage {
            loading: board.loading(),
            error: board.error().map(str::to_string),
            month: board.selection().month.to_string(),
            city: board.selection().city.to_string(),
            filtered: !board.selection().is_reset(),
            months,
            cities,
            members,
        }
    }

    /// Plain-text rendering for terminals
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Live Shows");
        if self.loading {
            let _ = writeln!(out, "Loading…");
        }
        if let Some(err) = &self.error {
            let _ = writeln!(out, "{err}");
        }
        let _ = writeln!(out, "Month: {}  City: {}", self.month, self.city);

        for column in &self.members {
            if self.filtered {
                let _ = writeln!(
                    out,
                    "\n== {} ({} of {}) ==",
                    column.name,
                    column.shows.len(),
                    column.total
                );
            } else {
                let _ = writeln!(out, "\n== {} ==", column.name);
            }
            if column.shows.is_empty() {
                let _ = writeln!(out, "  {EMPTY_COLUMN_TEXT}");
                continue;
            }
            for card in &column.shows {
                let badge = if card.sold_out { " [SOLD OUT]" } else { "" };
                let _ = writeln!(out, "  {}{}", card.when, badge);
                let _ = writeln!(out, "    {}", card.venue);
                if !card.city.is_empty() {
                    let _ = writeln!(out, "    {}", card.city);
                }
                match (&card.ticket_url, card.note) {
                    (Some(url), _) => {
                        let _ = writeln!(out, "    Buy tickets: {url}");
                    }
                    (None, Some(note)) => {
                        let _ = writeln!(out, "    {note}");
                    }
                    (None, None) => {}
                }
            }
        }
        out
    }
}

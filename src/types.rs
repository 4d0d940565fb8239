use crate::constants::{DEVIN_TAB, MATT_TAB, PAT_TAB};
use crate::pipeline::dates;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw row as yielded by a tab decoder: column label -> trimmed cell text
pub type RawRow = HashMap<String, String>;

/// The fixed roster. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Performer {
    Devin,
    Pat,
    Matt,
}

impl Performer {
    pub const ALL: [Performer; 3] = [Performer::Devin, Performer::Pat, Performer::Matt];

    /// Name of this performer's tab in the upstream sheet
    pub fn tab_name(&self) -> &'static str {
        match self {
            Performer::Devin => DEVIN_TAB,
            Performer::Pat => PAT_TAB,
            Performer::Matt => MATT_TAB,
        }
    }

    /// Case-insensitive lookup by roster name
    pub fn from_name(name: &str) -> Option<Performer> {
        let name = name.trim();
        Performer::ALL
            .into_iter()
            .find(|p| p.tab_name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Performer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tab_name())
    }
}

/// A normalized, display-ready show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    pub performer: Performer,
    /// Canonical `YYYY-MM-DD` when recognized, otherwise the source text
    pub date: String,
    /// `H:MM AM|PM` when recognized, otherwise the source text
    pub time: Option<String>,
    pub city: String,
    pub venue: String,
    pub ticket_url: Option<String>,
    pub status: String,
    pub sold_out: bool,
    /// Canonical instant; `None` when date or time is missing or unparsable
    pub starts_at: Option<NaiveDateTime>,
}

impl Show {
    /// `YYYY-MM` key of the canonical instant
    pub fn month_key(&self) -> Option<String> {
        self.starts_at.as_ref().map(dates::month_key)
    }
}
